//! Config loader: assembles sources in precedence order and deserializes the result.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::FormConfig;
use config::{Config, ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): built-in defaults, global file,
    /// `config/config.toml`, `config/{PROFILE_FORM_ENV}.toml`, `PROFILE_FORM__*`
    /// environment variables.
    pub fn load(workspace_root: &Path) -> Result<FormConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: FormConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from a single file (plus defaults and environment overrides).
    pub fn load_from_file(path: &Path) -> Result<FormConfig, ConfigError> {
        let path_str = path.to_str().ok_or_else(|| {
            ConfigError::Message(format!("Config path is not valid UTF-8: {:?}", path))
        })?;
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::with_name(path_str).required(true));
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Path of the global config file, if HOME is known.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Defaults only, with no file or environment sources.
    pub fn defaults() -> Result<FormConfig, ConfigError> {
        let config: Config = merge_policy::builder_with_defaults()?.build()?;
        config.try_deserialize()
    }
}
