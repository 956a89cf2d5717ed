//! # vs-config
//!
//! Layered configuration loading for vars-summary using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VARS_SUMMARY_*` prefix, `__` as separator)
//! 2. Project-level `./vars-summary.toml`
//! 3. User-level `~/.config/vars-summary/config.toml`
//! 4. Built-in defaults
//!
//! Command-line flags are applied on top by `vs-cli`.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VARS_SUMMARY_DATABASE__URL` -> `database.url`,
//! `VARS_SUMMARY_KB__RANK` -> `kb.rank`, etc. The `__` (double underscore)
//! separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use vs_config::SummaryConfig;
//!
//! let config = SummaryConfig::load_with_dotenv().expect("config");
//! if config.database.is_remote() {
//!     println!("Remote database: {}", config.database.url);
//! }
//! ```

mod database;
mod error;
mod kb;
mod output;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use kb::KbConfig;
pub use output::OutputConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "VARS_SUMMARY_";

/// Project-local config file name, resolved against the current directory.
pub const LOCAL_CONFIG_FILE: &str = "vars-summary.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SummaryConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub kb: KbConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl SummaryConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// A missing `.env` is not an error.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vars-summary").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vs_core::ReportVariant;

    #[test]
    fn default_config_loads() {
        let config = SummaryConfig::default();
        assert_eq!(config.database.url, "vars.db");
        assert!(!config.database.is_remote());
        assert_eq!(config.kb.rank, "genus");
        assert_eq!(config.output.variant, ReportVariant::Basic);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: SummaryConfig = SummaryConfig::figment().extract()?;
            assert_eq!(config.output.file_name, "counts.csv");
            assert_eq!(config.kb.timeout_secs, 10);
            Ok(())
        });
    }
}
