//! Configuration management for the vfsh shell
//!
//! Loads the shell's tunable constants from config.toml with environment
//! overrides, falling back to built-in defaults for anything unset.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Shell configuration
///
/// Every field has a default, so a missing config.toml is not an error.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct VfshConfig {
    // ═══ STORAGE ═══
    /// Path of the persisted partition document
    pub partition_path: String,

    // ═══ PASSWORD POLICY ═══
    /// Minimum password length in characters
    pub password_min_length: usize,

    /// Require at least one alphabetic character
    pub password_require_letters: bool,

    /// Require at least one decimal digit (off by default)
    pub password_require_digits: bool,

    /// Days until a password expires and must be reset
    pub password_expire_days: i64,

    // ═══ ACCOUNT LIMITS ═══
    /// Maximum number of accounts in the user directory
    pub max_users: usize,

    /// Consecutive wrong passwords for one account before it is deleted
    pub max_login_attempts: u32,

    // ═══ IDENTITY CONFIRMATION ═══
    /// Wrong answers allowed per confirmation challenge
    pub max_answer_attempts: u32,

    /// Seconds until the first re-confirmation of a fresh session
    pub confirm_initial_delay_secs: u64,

    /// Seconds between subsequent re-confirmations
    pub confirm_interval_secs: u64,
}

impl Default for VfshConfig {
    fn default() -> Self {
        VfshConfig {
            partition_path: "partition.json".to_string(),
            password_min_length: 4,
            password_require_letters: true,
            password_require_digits: false,
            password_expire_days: 30,
            max_users: 10,
            max_login_attempts: 3,
            max_answer_attempts: 3,
            confirm_initial_delay_secs: 20,
            confirm_interval_secs: 60,
        }
    }
}

impl VfshConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("VFSH"))
            .build()?;

        let config: VfshConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.partition_path.is_empty() {
            return Err(config::ConfigError::Message(
                "partition_path cannot be empty".into(),
            ));
        }

        if self.password_min_length == 0 {
            return Err(config::ConfigError::Message(
                "password_min_length must be greater than 0".into(),
            ));
        }

        if self.password_expire_days <= 0 {
            return Err(config::ConfigError::Message(
                "password_expire_days must be greater than 0".into(),
            ));
        }

        if self.max_users == 0 {
            return Err(config::ConfigError::Message(
                "max_users must be greater than 0".into(),
            ));
        }

        if self.max_login_attempts == 0 {
            return Err(config::ConfigError::Message(
                "max_login_attempts must be greater than 0".into(),
            ));
        }

        if self.max_answer_attempts == 0 {
            return Err(config::ConfigError::Message(
                "max_answer_attempts must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Delay before the first re-confirmation as a Duration
    pub fn confirm_initial_delay(&self) -> Duration {
        Duration::from_secs(self.confirm_initial_delay_secs)
    }

    /// Interval between re-confirmations as a Duration
    pub fn confirm_interval(&self) -> Duration {
        Duration::from_secs(self.confirm_interval_secs)
    }
}
