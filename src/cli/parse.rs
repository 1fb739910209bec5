//! CLI parse: clap types for profile-form. No behavior; definitions only.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// profile-form CLI - validate, edit and submit user profiles
#[derive(Parser)]
#[command(name = "profile-form")]
#[command(about = "Validate, edit and submit user profile records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile operations (show, validate, edit)
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Rewards operations (show, claim)
    Rewards {
        #[command(subcommand)]
        command: RewardsCommands,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Load and show the stored profile of a user
    Show {
        /// User ID
        #[arg(long)]
        user: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate a JSON profile record file without touching the store
    Validate {
        /// Path to a JSON profile record
        #[arg(long)]
        file: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Apply field edits to a user's profile and submit it
    Edit {
        /// User ID
        #[arg(long)]
        user: String,
        /// Field edit as NAME=VALUE, e.g. postalCode=0157 or notification_sms=true
        #[arg(long = "set", value_name = "NAME=VALUE", required = true)]
        set: Vec<String>,
        /// Account username (defaults to the user ID)
        #[arg(long)]
        username: Option<String>,
        /// Account email
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum RewardsCommands {
    /// Show point balance, rewards and achievements
    Show {
        /// Rewards catalog (TOML)
        #[arg(long)]
        catalog: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Evaluate expiry against this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Claim a reward, spending its points
    Claim {
        /// Reward ID
        reward_id: String,
        /// Rewards catalog (TOML); rewritten after a successful claim
        #[arg(long)]
        catalog: PathBuf,
        /// Evaluate expiry against this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}
