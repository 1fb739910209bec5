//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::command_name;
use crate::cli::parse::{Commands, ProfileCommands, RewardsCommands};
use crate::cli::presentation::{
    format_claim_receipt, format_profile_json, format_profile_text, format_rewards_json,
    format_rewards_text, format_submit_outcome, format_validation_json, format_validation_text,
};
use crate::config::{ConfigLoader, FormConfig};
use crate::edit::FieldEdit;
use crate::error::ApiError;
use crate::profile::{ProfileRecord, UserIdentity};
use crate::rewards::RewardsLedger;
use crate::session::{FormSession, SubmitOutcome};
use crate::store::{open_store, ProfileStore};
use crate::validator::ProfileFormValidator;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Output of one command: the text for stdout and whether the command succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }

    fn failed(text: String) -> Self {
        Self {
            text,
            success: false,
        }
    }
}

/// Runtime context for CLI execution: workspace, loaded configuration and validator.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: FormConfig,
    validator: ProfileFormValidator,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };

        config.validate().map_err(|errors| {
            let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(details.join("; "))
        })?;

        let validator = ProfileFormValidator::for_locale(&config.locale)?;
        debug!(
            workspace = %workspace_root.display(),
            country = %config.locale.country,
            backend = ?config.storage.backend,
            "Run context ready"
        );

        Ok(Self {
            workspace_root,
            config,
            validator,
        })
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        let name = command_name(command);
        let started = Instant::now();
        info!(command = %name, "Executing command");
        let result = self.execute_inner(command);
        match &result {
            Ok(output) => info!(
                command = %name,
                success = output.success,
                duration_ms = started.elapsed().as_millis() as u64,
                "Command finished"
            ),
            Err(e) => warn!(command = %name, error = %e, "Command failed"),
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        match command {
            Commands::Profile { command } => self.handle_profile_command(command),
            Commands::Rewards { command } => self.handle_rewards_command(command),
        }
    }

    fn handle_profile_command(&self, command: &ProfileCommands) -> Result<CommandOutput, ApiError> {
        match command {
            ProfileCommands::Show { user, format } => {
                let identity = UserIdentity::new(user.as_str(), user.as_str(), "");
                let session = block_on(async {
                    let mut session = self.open_session(identity)?;
                    session.mount().await;
                    Ok::<_, ApiError>(session)
                })?;
                let text = if format == "json" {
                    format_profile_json(
                        session.identity(),
                        session.record(),
                        session.general_error(),
                    )?
                } else {
                    format_profile_text(
                        session.identity(),
                        session.record(),
                        session.general_error(),
                    )
                };
                Ok(if session.general_error().is_some() {
                    CommandOutput::failed(text)
                } else {
                    CommandOutput::ok(text)
                })
            }
            ProfileCommands::Validate { file, format } => {
                let record = read_record_file(file)?;
                let outcome = self.validator.validate(&record);
                let text = if format == "json" {
                    format_validation_json(&outcome)?
                } else {
                    format_validation_text(&outcome)
                };
                Ok(if outcome.is_valid() {
                    CommandOutput::ok(text)
                } else {
                    CommandOutput::failed(text)
                })
            }
            ProfileCommands::Edit {
                user,
                set,
                username,
                email,
            } => {
                let edits = set
                    .iter()
                    .map(|assignment| parse_assignment(assignment))
                    .collect::<Result<Vec<_>, _>>()?;
                let identity = UserIdentity::new(
                    user.as_str(),
                    username.clone().unwrap_or_else(|| user.clone()),
                    email.clone().unwrap_or_default(),
                );
                block_on(async {
                    let mut session = self.open_session(identity)?;
                    session.mount().await;
                    if let Some(err) = session.general_error() {
                        // A record that failed to load is never submitted
                        return Ok(CommandOutput::failed(format!("Error: {}", err)));
                    }
                    for edit in edits {
                        session.apply_edit(edit);
                    }
                    let outcome = session.submit().await;
                    let text = format_submit_outcome(&outcome);
                    Ok::<_, ApiError>(match outcome {
                        SubmitOutcome::Succeeded(_) => CommandOutput::ok(text),
                        _ => CommandOutput::failed(text),
                    })
                })
            }
        }
    }

    fn handle_rewards_command(&self, command: &RewardsCommands) -> Result<CommandOutput, ApiError> {
        match command {
            RewardsCommands::Show {
                catalog,
                format,
                today,
            } => {
                let ledger = RewardsLedger::load_from_file(catalog)?;
                let today = today.unwrap_or_else(local_today);
                let text = if format == "json" {
                    format_rewards_json(&ledger, today)?
                } else {
                    format_rewards_text(&ledger, today)
                };
                Ok(CommandOutput::ok(text))
            }
            RewardsCommands::Claim {
                reward_id,
                catalog,
                today,
            } => {
                let mut ledger = RewardsLedger::load_from_file(catalog)?;
                let receipt = ledger.claim(reward_id, today.unwrap_or_else(local_today))?;
                ledger.save_to_file(catalog)?;
                Ok(CommandOutput::ok(format_claim_receipt(&receipt)))
            }
        }
    }

    fn open_session(&self, identity: UserIdentity) -> Result<FormSession, ApiError> {
        let store: Arc<dyn ProfileStore> = open_store(&self.config.storage, &self.workspace_root)?;
        Ok(FormSession::new(
            identity,
            store,
            self.validator.clone(),
            self.config.session.clone(),
        ))
    }
}

/// Drive one async operation to completion on a fresh current-thread runtime.
fn block_on<T, F>(future: F) -> Result<T, ApiError>
where
    F: std::future::Future<Output = Result<T, ApiError>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn read_record_file(path: &Path) -> Result<ProfileRecord, ApiError> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        ApiError::InvalidInput(format!(
            "Failed to parse profile record {}: {}",
            path.display(),
            e
        ))
    })
}

/// Parse a `NAME=VALUE` assignment into a typed edit. Only the first `=` splits.
fn parse_assignment(assignment: &str) -> Result<FieldEdit, ApiError> {
    let (name, value) = assignment.split_once('=').ok_or_else(|| {
        ApiError::InvalidInput(format!(
            "Expected NAME=VALUE for --set, got '{}'",
            assignment
        ))
    })?;
    FieldEdit::parse(name.trim(), value)
}
