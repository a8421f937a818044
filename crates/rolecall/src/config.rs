//! Startup configuration.
//!
//! Tunables are layered with the `config` crate:
//! 1. Bundled defaults (`rolecall.toml` shipped with the binary)
//! 2. A user file (`./rolecall.toml`, or the path given with `--config`)
//! 3. `ROLECALL_` environment variables, `__` separating nested keys
//!
//! Secrets never come from files: the Discord credentials and the database
//! URL are read from the environment (a `.env` file is loaded first).

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use rolecall_database::StoreSettings;
use rolecall_discord::DispatchSettings;
use rolecall_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_SETTINGS: &str = include_str!("../rolecall.toml");
const USER_SETTINGS: &str = "rolecall";
const ENV_PREFIX: &str = "ROLECALL";

/// Role store tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSection {
    /// Maximum pooled connections
    pub pool_size: u32,
    /// Per-call timeout in milliseconds
    pub timeout_ms: u64,
}

/// Listing and self-assignment tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolesSection {
    /// Hidden-name marker for listings
    pub reserved_prefix: String,
    /// Names per listing column
    pub column_size: usize,
    /// Enforce the curated available-role list
    pub require_available: bool,
}

/// All non-secret settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Role store section
    pub store: StoreSection,
    /// Roles section
    pub roles: RolesSection,
}

impl Settings {
    /// Load settings from defaults, an optional file, and the environment.
    ///
    /// An explicit `path` must exist; without one, `./rolecall.toml` is used
    /// when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read, a value has the wrong
    /// type, or a value is out of range.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`Settings::load`], reading overrides from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let user_file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(USER_SETTINGS).required(false),
        };

        let settings: Self = Config::builder()
            .add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml))
            .add_source(user_file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        settings.validate()?;
        debug!(?settings, "Configuration loaded");
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.store.pool_size == 0 {
            return Err(ConfigError::new("store.pool_size must be at least 1"));
        }
        if self.store.timeout_ms == 0 {
            return Err(ConfigError::new("store.timeout_ms must be at least 1"));
        }
        if self.roles.column_size == 0 {
            return Err(ConfigError::new("roles.column_size must be at least 1"));
        }
        Ok(())
    }

    /// Pool and timeout settings for the role store.
    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            pool_size: self.store.pool_size,
            timeout: Duration::from_millis(self.store.timeout_ms),
        }
    }

    /// Dispatcher settings.
    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            reserved_prefix: self.roles.reserved_prefix.clone(),
            column_size: self.roles.column_size,
            require_available: self.roles.require_available,
        }
    }
}

/// Credentials for connecting to Discord.
#[derive(Clone, Getters)]
pub struct DiscordCredentials {
    token: String,
    application_id: NonZeroU64,
}

impl std::fmt::Debug for DiscordCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordCredentials")
            .field("token", &"<redacted>")
            .field("application_id", &self.application_id)
            .finish()
    }
}

impl DiscordCredentials {
    /// Read `DISCORD_TOKEN` and `DISCORD_APPLICATION_ID` from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if either is missing or the application id is not a
    /// non-zero integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the credentials through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = require(&lookup, "DISCORD_TOKEN")?;
        let raw_id = require(&lookup, "DISCORD_APPLICATION_ID")?;
        let application_id = raw_id.trim().parse::<NonZeroU64>().map_err(|e| {
            ConfigError::new(format!(
                "DISCORD_APPLICATION_ID must be a non-zero integer, got {:?}: {}",
                raw_id, e
            ))
        })?;

        Ok(Self {
            token,
            application_id,
        })
    }
}

/// Read `DATABASE_URL` from the environment.
///
/// # Errors
///
/// Returns an error if the variable is missing or empty.
pub fn database_url_from_env() -> Result<String, ConfigError> {
    require(&|key: &str| std::env::var(key).ok(), "DATABASE_URL")
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::new(format!(
            "{} environment variable not set",
            key
        ))),
    }
}
