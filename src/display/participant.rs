//! Participant display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Participant;

#[derive(Tabled)]
struct ParticipantRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Registered")]
    registered: String,
}

/// Format the participant registry as a table
pub fn format_participant_list(participants: &[Participant]) -> String {
    if participants.is_empty() {
        return "No participants found.".to_string();
    }

    let rows = participants.iter().map(|p| ParticipantRow {
        name: p.name.clone(),
        id: p.id.to_string(),
        registered: p.created_at.format("%Y-%m-%d").to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}
