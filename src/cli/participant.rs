//! Participant CLI commands

use clap::Subcommand;

use crate::display::format_participant_list;
use crate::error::PotluckResult;
use crate::services::ParticipantService;
use crate::storage::Storage;

/// Participant subcommands
#[derive(Subcommand)]
pub enum ParticipantCommands {
    /// Register a new participant
    Add {
        /// Participant name
        name: String,
    },
    /// List all participants
    List,
}

/// Handle a participant command
pub fn handle_participant_command(storage: &Storage, cmd: ParticipantCommands) -> PotluckResult<()> {
    let service = ParticipantService::new(storage);

    match cmd {
        ParticipantCommands::Add { name } => {
            let participant = service.create(&name)?;
            println!("Added participant: {}", participant.name);
            println!("  ID: {}", participant.id);
        }

        ParticipantCommands::List => {
            let participants = service.list()?;
            println!("{}", format_participant_list(&participants));
            if !participants.is_empty() {
                println!("\nTotal: {} participants", participants.len());
            }
        }
    }

    Ok(())
}
