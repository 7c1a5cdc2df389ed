//! Warehouse connection settings.

use serde::Deserialize;

use crate::adapter::outbound::warehouse::DatabaseTarget;
use crate::error::{ConfigError, Result};

pub const DEFAULT_PORT: u16 = 3306;

/// Connection settings for the analytics warehouse.
///
/// Either `url` is set, or `host`, `user` and `name` together describe a MySQL
/// server. The password is loaded from `DB_PASS` at runtime, never from the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Full connection URL (`mysql://...`, `sqlite://...` or a SQLite path).
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub name: Option<String>,
    /// Loaded from `DB_PASS`.
    #[serde(skip)]
    pub password: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: None,
            port: DEFAULT_PORT,
            user: None,
            name: None,
            password: None,
        }
    }
}

impl DatabaseConfig {
    /// Resolve the settings into a connection target.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingField`] when no URL is set and one of the
    /// host, user or database name is missing.
    pub fn target(&self) -> Result<DatabaseTarget> {
        if let Some(url) = non_empty(self.url.as_deref()) {
            return DatabaseTarget::parse(url);
        }

        let host = non_empty(self.host.as_deref())
            .ok_or(ConfigError::MissingField { field: "DB_HOST" })?;
        let user = non_empty(self.user.as_deref())
            .ok_or(ConfigError::MissingField { field: "DB_USER" })?;
        let name = non_empty(self.name.as_deref())
            .ok_or(ConfigError::MissingField { field: "DB_NAME" })?;

        DatabaseTarget::mysql(host, self.port, user, self.password.as_deref(), name)
    }

    /// Whether any connection detail is configured at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        non_empty(self.url.as_deref()).is_some() || non_empty(self.host.as_deref()).is_some()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
