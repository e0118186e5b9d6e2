use anyhow::Result;
use clap::{Parser, Subcommand};

use potluck::cli::{
    handle_balance, handle_expense_command, handle_export_command, handle_group_command,
    handle_participant_command, handle_settle, handle_settle_up, handle_simplify, ExportArgs,
};
use potluck::config::{paths::PotluckPaths, settings::Settings};
use potluck::models::SplitKind;
use potluck::storage::Storage;

#[derive(Parser)]
#[command(
    name = "potluck",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based shared expense tracker",
    long_about = "Potluck tracks who paid for what in a group, splits each expense \
                  equally, by exact amounts or by percentage, and works out the \
                  payments that settle everyone up."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Participant management commands
    #[command(subcommand)]
    Participant(potluck::cli::ParticipantCommands),

    /// Group management commands
    #[command(subcommand)]
    Group(potluck::cli::GroupCommands),

    /// Expense commands
    #[command(subcommand)]
    Expense(potluck::cli::ExpenseCommands),

    /// Record a payment from one member to another
    Settle {
        /// Group name or ID
        group: String,
        /// Who is paying
        payer: String,
        /// Who is being paid
        payee: String,
        /// Amount paid
        amount: String,
    },

    /// Show what members owe and are owed
    Balance {
        /// Group name or ID
        group: String,
        /// Only show this participant
        participant: Option<String>,
    },

    /// Show the payments that would settle a group
    Simplify {
        /// Group name or ID
        group: String,
    },

    /// Record the settlement plan as paid and clear the group's debts
    SettleUp {
        /// Group name or ID
        group: String,
    },

    /// Export a group
    Export(ExportArgs),

    /// Show recent entries from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show or change configuration
    Config {
        /// Currency symbol used when printing amounts
        #[arg(long)]
        currency: Option<String>,
        /// Split policy used when `expense add` has no --split
        #[arg(long)]
        default_split: Option<SplitKind>,
        /// Enable or disable the audit log
        #[arg(long)]
        audit: Option<bool>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = PotluckPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?.with_audit(settings.audit_enabled);
    storage.load_all()?;

    match cli.command {
        Some(Commands::Participant(cmd)) => handle_participant_command(&storage, cmd)?,
        Some(Commands::Group(cmd)) => handle_group_command(&storage, &settings, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Settle {
            group,
            payer,
            payee,
            amount,
        }) => handle_settle(&storage, &settings, &group, &payer, &payee, &amount)?,
        Some(Commands::Balance { group, participant }) => {
            handle_balance(&storage, &settings, &group, participant.as_deref())?
        }
        Some(Commands::Simplify { group }) => handle_simplify(&storage, &settings, &group)?,
        Some(Commands::SettleUp { group }) => handle_settle_up(&storage, &settings, &group)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, args)?,
        Some(Commands::History { limit }) => match storage.audit() {
            Some(logger) => {
                let entries = logger.read_recent(limit)?;
                if entries.is_empty() {
                    println!("No audit entries yet.");
                }
                for entry in entries {
                    println!("{}", entry.format_human_readable());
                }
            }
            None => println!("Audit logging is disabled."),
        },
        Some(Commands::Config {
            currency,
            default_split,
            audit,
        }) => {
            let changed = currency.is_some() || default_split.is_some() || audit.is_some();
            if let Some(symbol) = currency {
                settings.currency_symbol = symbol;
            }
            if let Some(kind) = default_split {
                settings.default_split_policy = kind;
            }
            if let Some(enabled) = audit {
                settings.audit_enabled = enabled;
            }
            if changed {
                settings.save(&paths)?;
                println!("Settings saved.");
                println!();
            }

            println!("Potluck Configuration");
            println!("=====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Default split policy: {}", settings.default_split_policy);
            println!("  Audit log enabled:    {}", settings.audit_enabled);
        }
        None => {
            println!("Potluck - shared expense tracking");
            println!();
            println!("Run 'potluck --help' for usage information.");
        }
    }

    Ok(())
}
