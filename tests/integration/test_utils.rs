//! Shared test utilities for integration tests
//!
//! Centralizes HOME and PROFILE_FORM_* isolation so config-loading tests do not
//! pick up the developer's global configuration or race on the environment.

use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes environment variable access across all integration tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const TOUCHED_VARS: [&str; 3] = ["HOME", "PROFILE_FORM_ENV", "PROFILE_FORM__SESSION__SUCCESS_DISPLAY_MS"];

struct EnvState {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            saved: TOUCHED_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.saved {
            match value {
                Some(v) => std::env::set_var(name, v),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with HOME pointed at `<test_dir>/home` and the PROFILE_FORM_* variables
/// cleared, restoring the original environment afterwards.
pub fn with_isolated_home<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();
    std::env::set_var("HOME", &test_home);
    std::env::remove_var("PROFILE_FORM_ENV");
    std::env::remove_var("PROFILE_FORM__SESSION__SUCCESS_DISPLAY_MS");

    let result = f();

    env_state.restore();

    result
}
