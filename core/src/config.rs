//! # Settings
//!
//! Per-environment configuration for the API test harness.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults (the public Petstore).
//! 2. `<env_dir>/<env_name>.env`, read with `dotenvy`.
//! 3. Process environment variables (`BASE_URL`, `API_KEY`, `TIMEOUT`, `LOG_LEVEL`),
//!    matched by exact name. Keys in the `.env` file are case-insensitive.
//! 4. Explicit overrides, e.g. from command line flags.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default directory holding `<env>.env` files.
pub const DEFAULT_ENV_DIR: &str = "config/environments";

/// Harness settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL for the API.
    pub base_url: String,
    /// API key sent in the `api_key` header.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Logging level (`DEBUG`, `INFO`, ...).
    pub log_level: String,
    /// Current environment name.
    pub env_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: "https://petstore.swagger.io/v2".to_string(),
            api_key: "special-key".to_string(),
            timeout: 30,
            log_level: "DEBUG".to_string(),
            env_name: "dev".to_string(),
        }
    }
}

/// Explicit values that win over every other source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    /// Replaces `base_url`.
    pub base_url: Option<String>,
    /// Replaces `api_key`.
    pub api_key: Option<String>,
}

impl Settings {
    /// Loads settings for `env_name` from `env_dir` and the process environment.
    pub fn load(env_name: &str, env_dir: impl AsRef<Path>) -> AppResult<Self> {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
        Self::load_with_vars(env_name, env_dir, vars)
    }

    /// Like [`Settings::load`], with `vars` standing in for the process environment.
    pub fn load_with_vars<I>(env_name: &str, env_dir: impl AsRef<Path>, vars: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut settings = Settings {
            env_name: env_name.to_string(),
            ..Settings::default()
        };

        if let Some(env_file) = env_file_path(env_dir.as_ref(), env_name) {
            debug!("Reading environment file {:?}", env_file);
            let entries = dotenvy::from_path_iter(&env_file).map_err(|e| {
                AppError::Config(format!("Failed to open {:?}: {}", env_file, e))
            })?;
            for entry in entries {
                let (key, value) = entry.map_err(|e| {
                    AppError::Config(format!("Failed to parse {:?}: {}", env_file, e))
                })?;
                settings.apply(&key.to_ascii_uppercase(), value)?;
            }
        }

        settings.apply_vars(vars)?;
        Ok(settings)
    }

    /// Overlays environment variables. Only the exact upper-case names are honoured.
    pub fn apply_vars<I>(&mut self, vars: I) -> AppResult<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .try_for_each(|(key, value)| self.apply(&key, value))
    }

    /// Applies explicit overrides.
    pub fn with_overrides(mut self, overrides: &SettingsOverrides) -> Self {
        if let Some(base_url) = &overrides.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(api_key) = &overrides.api_key {
            self.api_key = api_key.clone();
        }
        self
    }

    /// Timeout as a `Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    // Unknown keys are ignored.
    fn apply(&mut self, key: &str, value: String) -> AppResult<()> {
        match key {
            "BASE_URL" => self.base_url = value,
            "API_KEY" => self.api_key = value,
            "TIMEOUT" => {
                self.timeout = value.trim().parse().map_err(|_| {
                    AppError::Config(format!("TIMEOUT must be a whole number of seconds, got '{}'", value))
                })?
            }
            "LOG_LEVEL" => self.log_level = value,
            _ => {}
        }
        Ok(())
    }
}

/// `<env_dir>/<env_name>.env` if it exists.
pub fn env_file_path(env_dir: &Path, env_name: &str) -> Option<PathBuf> {
    let env_file = env_dir.join(format!("{}.env", env_name));
    env_file.exists().then_some(env_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, "https://petstore.swagger.io/v2");
        assert_eq!(settings.api_key, "special-key");
        assert_eq!(settings.timeout_duration(), Duration::from_secs(30));
    }

    fn no_vars() -> std::iter::Empty<(String, String)> {
        std::iter::empty()
    }

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_load_from_env_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("staging.env"),
            "BASE_URL=https://staging.example.com/v2\napi_key=staging-key\nTIMEOUT=5\n# comment\nUNRELATED=1\n",
        )
        .unwrap();

        let settings = Settings::load_with_vars("staging", dir.path(), no_vars()).unwrap();
        assert_eq!(settings.env_name, "staging");
        assert_eq!(settings.base_url, "https://staging.example.com/v2");
        assert_eq!(settings.api_key, "staging-key");
        assert_eq!(settings.timeout, 5);
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_env_vars_override_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("staging.env"),
            "BASE_URL=https://staging.example.com/v2\nTIMEOUT=5\n",
        )
        .unwrap();

        let settings = Settings::load_with_vars(
            "staging",
            dir.path(),
            vars(&[("TIMEOUT", "12"), ("LOG_LEVEL", "INFO")]),
        )
        .unwrap();
        assert_eq!(settings.base_url, "https://staging.example.com/v2");
        assert_eq!(settings.timeout, 12);
        assert_eq!(settings.log_level, "INFO");
    }

    #[test]
    fn test_lowercase_env_vars_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_with_vars(
            "dev",
            dir.path(),
            vars(&[("timeout", "soon"), ("base_url", "http://elsewhere")]),
        )
        .unwrap();
        assert_eq!(settings.timeout, 30);
        assert_eq!(settings.base_url, Settings::default().base_url);
    }

    #[test]
    fn test_missing_env_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_with_vars("qa", dir.path(), no_vars()).unwrap();
        assert_eq!(settings.env_name, "qa");
        assert_eq!(settings.api_key, "special-key");
        assert!(env_file_path(dir.path(), "qa").is_none());
    }

    #[test]
    fn test_bad_timeout_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dev.env"), "TIMEOUT=soon\n").unwrap();
        let err = Settings::load_with_vars("dev", dir.path(), no_vars()).unwrap_err();
        assert!(matches!(err, AppError::Config(ref m) if m.contains("soon")));

        let mut settings = Settings::default();
        let err = settings.apply_vars(vars(&[("TIMEOUT", "later")])).unwrap_err();
        assert!(matches!(err, AppError::Config(ref m) if m.contains("later")));
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings::default().with_overrides(&SettingsOverrides {
            base_url: Some("http://127.0.0.1:8080/v2".into()),
            api_key: None,
        });
        assert_eq!(settings.base_url, "http://127.0.0.1:8080/v2");
        assert_eq!(settings.api_key, "special-key");
    }
}
