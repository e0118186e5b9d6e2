//! Group CLI commands
//!
//! Creating groups and inspecting their members and debts.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_group_details, format_group_list};
use crate::error::PotluckResult;
use crate::services::{GroupService, ParticipantService};
use crate::storage::Storage;

/// Group subcommands
#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a group of registered participants
    Create {
        /// Group name
        name: String,
        /// Member name or ID (repeat for each member)
        #[arg(short, long = "member", required = true)]
        members: Vec<String>,
    },
    /// List all groups
    List,
    /// Show a group's members and outstanding debts
    Show {
        /// Group name or ID
        group: String,
    },
}

/// Handle a group command
pub fn handle_group_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GroupCommands,
) -> PotluckResult<()> {
    let service = GroupService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        GroupCommands::Create { name, members } => {
            let group = service.create_group(&name, &members)?;
            println!("Created group: {}", group.name);
            println!("  ID:      {}", group.id);
            println!("  Members: {}", members.join(", "));
        }

        GroupCommands::List => {
            let groups = service.list()?;
            println!("{}", format_group_list(&groups, symbol));
        }

        GroupCommands::Show { group } => {
            let group = service.require(&group)?;
            let names = ParticipantService::new(storage).names()?;
            print!("{}", format_group_details(&group, &names, symbol));
        }
    }

    Ok(())
}
