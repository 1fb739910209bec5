//! CLI command-name contract for logging and routing.

use crate::cli::parse::{Commands, ProfileCommands, RewardsCommands};

/// Command name string for log records (e.g. "profile.edit", "rewards.claim").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Profile { command } => format!("profile.{}", profile_command_name(command)),
        Commands::Rewards { command } => format!("rewards.{}", rewards_command_name(command)),
    }
}

pub fn profile_command_name(command: &ProfileCommands) -> &'static str {
    match command {
        ProfileCommands::Show { .. } => "show",
        ProfileCommands::Validate { .. } => "validate",
        ProfileCommands::Edit { .. } => "edit",
    }
}

pub fn rewards_command_name(command: &RewardsCommands) -> &'static str {
    match command {
        RewardsCommands::Show { .. } => "show",
        RewardsCommands::Claim { .. } => "claim",
    }
}
