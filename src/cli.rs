//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, ProfileCommands, RewardsCommands};
pub use presentation::{
    format_claim_receipt, format_field_errors, format_profile_json, format_profile_text,
    format_rewards_json, format_rewards_text, format_submit_outcome, format_validation_json,
    format_validation_text,
};
pub use route::{CommandOutput, RunContext};
