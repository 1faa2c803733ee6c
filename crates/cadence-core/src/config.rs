use anyhow::Result;
use chrono::NaiveDate;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::constants::{DEFAULT_MAX_OCCURRENCES, DEFAULT_SAFETY_HORIZON};
use crate::error::CoreError;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub recurrence: RecurrenceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the address the server binds to, in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Limits applied when expanding recurring events.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RecurrenceConfig {
    /// Last date produced by rules without an end condition.
    pub horizon: NaiveDate,
    /// Cap on the size of one generated batch.
    pub max_occurrences: usize,
}

impl Default for RecurrenceConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_SAFETY_HORIZON,
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// JSON file with an `events` array loaded into the store at startup.
    pub seed_file: Option<String>,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional `config.toml`.
    /// Environment variables (`CADENCE_SECTION__KEY`) take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating the recurrence limits fails.
    pub fn load() -> Result<Self> {
        let settings = Self::builder_with_defaults()?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env
            .add_source(
                config::Environment::with_prefix("CADENCE")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Returns a configuration builder pre-populated with every default value.
    ///
    /// ## Errors
    /// Returns an error if a default value cannot be registered.
    pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("logging.level", "debug")?
            .set_default("recurrence.horizon", DEFAULT_SAFETY_HORIZON.to_string())?
            .set_default(
                "recurrence.max_occurrences",
                u64::try_from(DEFAULT_MAX_OCCURRENCES)?,
            )?)
    }

    /// ## Summary
    /// Checks values that deserialize fine but cannot drive the engine.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if `recurrence.max_occurrences` is zero.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.recurrence.max_occurrences == 0 {
            return Err(CoreError::ConfigError(
                "recurrence.max_occurrences must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(
        horizon = %settings.recurrence.horizon,
        max_occurrences = settings.recurrence.max_occurrences,
        "Recurrence limits configured"
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn settings_from_toml(toml: &str) -> Settings {
        Settings::builder_with_defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_apply_without_sources() {
        let settings = settings_from_toml("");
        assert_eq!(settings.server.bind_addr(), "0.0.0.0:8698");
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.recurrence.horizon, DEFAULT_SAFETY_HORIZON);
        assert_eq!(
            settings.recurrence.max_occurrences,
            DEFAULT_MAX_OCCURRENCES
        );
        assert!(settings.storage.seed_file.is_none());
    }

    #[test]
    fn test_file_overrides_recurrence_limits() {
        let settings = settings_from_toml(
            r#"
[recurrence]
horizon = "2030-06-30"
max_occurrences = 12

[storage]
seed_file = "events.json"
"#,
        );
        assert_eq!(
            settings.recurrence.horizon,
            NaiveDate::from_ymd_opt(2030, 6, 30).unwrap()
        );
        assert_eq!(settings.recurrence.max_occurrences, 12);
        assert_eq!(settings.storage.seed_file.as_deref(), Some("events.json"));
    }

    #[test]
    fn test_zero_cap_is_rejected() {
        let settings = settings_from_toml("[recurrence]\nmax_occurrences = 0\n");
        assert!(matches!(
            settings.validate(),
            Err(CoreError::ConfigError(_))
        ));
    }
}
