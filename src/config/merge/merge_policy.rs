//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("locale.country", crate::profile::DEFAULT_COUNTRY)?
        .set_default("session.success_display_ms", 3000)?
        .set_default("storage.backend", "sled")?
        .set_default("storage.store_path", ".profile-form/store")
}
