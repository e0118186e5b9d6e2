use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn potluck(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("potluck").unwrap();
    cmd.env("POTLUCK_DATA_DIR", dir.path());
    cmd
}

fn run(dir: &TempDir, args: &[&str]) {
    potluck(dir).args(args).assert().success();
}

/// Alice, Bob and Carol in a group called Trip
fn trip() -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in ["Alice", "Bob", "Carol"] {
        run(&dir, &["participant", "add", name]);
    }
    run(
        &dir,
        &["group", "create", "Trip", "-m", "Alice", "-m", "Bob", "-m", "Carol"],
    );
    dir
}

#[test]
fn test_no_command_prints_hint() {
    let dir = TempDir::new().unwrap();
    potluck(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("potluck --help"));
}

#[test]
fn test_participant_add_and_list() {
    let dir = TempDir::new().unwrap();
    potluck(&dir)
        .args(["participant", "add", "Alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added participant: Alice"));

    potluck(&dir)
        .args(["participant", "add", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    potluck(&dir)
        .args(["participant", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("Total: 1 participants"));
}

#[test]
fn test_group_needs_registered_members() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["participant", "add", "Alice"]);

    potluck(&dir)
        .args(["group", "create", "Trip", "-m", "Alice", "-m", "Zed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Participant not found: Zed"));
}

#[test]
fn test_three_policies_then_settle_up() {
    let dir = trip();

    potluck(&dir)
        .args(["expense", "add", "Trip", "Dinner", "300", "--paid-by", "Alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EQUAL split"));
    run(
        &dir,
        &[
            "expense", "add", "Trip", "Taxi", "300", "--paid-by", "Bob", "--split", "exact",
            "--share", "Alice=100", "--share", "Bob=100", "--share", "Carol=100",
        ],
    );
    run(
        &dir,
        &[
            "expense", "add", "Trip", "Hotel", "500", "--paid-by", "Carol", "--split", "percent",
            "--share", "Alice=50", "--share", "Bob=30%", "--share", "Carol=20",
        ],
    );

    potluck(&dir)
        .args(["balance", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-$150.00"))
        .stdout(predicate::str::contains("-$50.00"))
        .stdout(predicate::str::contains("$200.00"));

    potluck(&dir)
        .args(["simplify", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 payment(s), $200.00 in total"));

    potluck(&dir)
        .args(["settle-up", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("now settled"));

    potluck(&dir)
        .args(["simplify", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Everyone is settled up."));

    potluck(&dir)
        .args(["expense", "list", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hotel"))
        .stdout(predicate::str::contains("Total: 3 expenses, $1100.00"));
}

#[test]
fn test_exact_split_must_add_up() {
    let dir = trip();

    potluck(&dir)
        .args([
            "expense", "add", "Trip", "Snacks", "20", "--paid-by", "Alice", "--split", "exact",
            "--share", "Bob=10", "--share", "Carol=9.99",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Split mismatch"));

    potluck(&dir)
        .args(["expense", "list", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses recorded in Trip."));
}

#[test]
fn test_oversized_shares_are_a_mismatch() {
    let dir = trip();

    potluck(&dir)
        .args([
            "expense", "add", "Trip", "Snacks", "10", "--paid-by", "Alice", "--split", "percent",
            "--share", "Alice=40000000", "--share", "Bob=40000000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Split mismatch"));

    potluck(&dir)
        .args([
            "expense", "add", "Trip", "Snacks", "10", "--paid-by", "Alice", "--split", "exact",
            "--share", "Alice=50000000000000000", "--share", "Bob=50000000000000000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Split mismatch"));

    potluck(&dir)
        .args(["expense", "list", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses recorded in Trip."));
}

#[test]
fn test_unknown_split_policy_is_rejected() {
    let dir = trip();

    potluck(&dir)
        .args(["expense", "add", "Trip", "Snacks", "20", "--paid-by", "Alice", "--split", "shares"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid split policy"));
}

#[test]
fn test_settle_reports_overpayment() {
    let dir = trip();
    run(&dir, &["expense", "add", "Trip", "Dinner", "150", "--paid-by", "Alice"]);

    potluck(&dir)
        .args(["settle", "Trip", "Bob", "Alice", "70"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bob paid Alice $50.00"))
        .stdout(predicate::str::contains("$20.00 more than was owed"));

    potluck(&dir)
        .args(["settle", "Trip", "Bob", "Alice", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No outstanding balance"));

    potluck(&dir)
        .args(["balance", "Trip", "Carol"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Carol"))
        .stdout(predicate::str::contains("-$50.00"));
}

#[test]
fn test_export_formats() {
    let dir = trip();
    run(&dir, &["expense", "add", "Trip", "Dinner", "300", "--paid-by", "Alice"]);

    potluck(&dir)
        .args(["export", "Trip", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"schema_version\""))
        .stdout(predicate::str::contains("\"settlement_plan\""));

    potluck(&dir)
        .args(["export", "Trip", "--format", "debts-csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Kind,From,To,Amount"))
        .stdout(predicate::str::contains("debt,Bob,Alice,100.00"));

    let output = dir.path().join("trip.yaml");
    potluck(&dir)
        .args(["export", "Trip", "--format", "yaml", "--output"])
        .arg(&output)
        .assert()
        .success();
    let yaml = std::fs::read_to_string(&output).unwrap();
    assert!(yaml.starts_with("# Potluck group export: Trip"));
}

#[test]
fn test_config_changes_currency_and_history_records_changes() {
    let dir = trip();

    potluck(&dir)
        .args(["config", "--currency", "€"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved."));

    run(&dir, &["expense", "add", "Trip", "Dinner", "300", "--paid-by", "Alice"]);
    potluck(&dir)
        .args(["balance", "Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€200.00"));

    potluck(&dir)
        .args(["history", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Group"))
        .stdout(predicate::str::contains("CREATE Expense"));
}
