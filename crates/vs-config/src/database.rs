//! Annotation database connection settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_url() -> String {
    String::from("vars.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database path, or a `libsql://` / `https://` URL for a remote
    /// database.
    #[serde(default = "default_url")]
    pub url: String,

    /// Auth token for remote databases. Ignored for local paths.
    #[serde(default)]
    pub auth_token: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            auth_token: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Whether `url` points at a remote database rather than a local file.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        ["libsql://", "https://", "http://", "wss://", "ws://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }

    /// Check that the section holds enough to open a connection.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] if `url` is blank and
    /// [`ConfigError::InvalidValue`] if a remote `url` has no auth token.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "database".into(),
            });
        }
        if self.is_remote() && self.auth_token.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.auth_token".into(),
                reason: format!("remote database '{}' requires an auth token", self.url),
            });
        }
        Ok(())
    }
}
