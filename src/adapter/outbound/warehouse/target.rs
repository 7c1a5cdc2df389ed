//! Where the warehouse lives and how to display it safely.

use std::fmt;

use url::Url;

use super::dialect::Dialect;
use crate::error::{ConfigError, Error, Result, WarehouseError};

/// A warehouse location: a MySQL server or a SQLite file.
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    Mysql { url: Url },
    Sqlite { path: String },
}

impl DatabaseTarget {
    /// Parse a `mysql://` or `sqlite://` URL, or a plain SQLite file path.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::MissingField { field: "database.url" }.into());
        }

        if let Some(path) = raw.strip_prefix("sqlite://") {
            return Ok(Self::Sqlite {
                path: path.to_string(),
            });
        }

        match raw.split_once("://") {
            Some(("mysql", _)) => Ok(Self::Mysql {
                url: Url::parse(raw)?,
            }),
            Some((scheme, _)) => Err(WarehouseError::UnsupportedBackend {
                scheme: scheme.to_string(),
                hint: " (expected mysql:// or sqlite://)",
            }
            .into()),
            None => Ok(Self::Sqlite {
                path: raw.to_string(),
            }),
        }
    }

    /// Assemble a MySQL URL from separate settings, percent-encoding the credentials.
    pub fn mysql(
        host: &str,
        port: u16,
        user: &str,
        password: Option<&str>,
        database: &str,
    ) -> Result<Self> {
        let mut url = Url::parse(&format!("mysql://{host}:{port}"))?;
        url.set_path(database);
        url.set_username(user)
            .map_err(|()| Error::Parse(format!("cannot use '{user}' as a database user")))?;
        url.set_password(password)
            .map_err(|()| Error::Parse("cannot attach a password to this URL".to_string()))?;
        Ok(Self::Mysql { url })
    }

    #[must_use]
    pub fn dialect(&self) -> Dialect {
        match self {
            Self::Mysql { .. } => Dialect::Mysql,
            Self::Sqlite { .. } => Dialect::Sqlite,
        }
    }

    /// The string handed to the diesel connection.
    #[must_use]
    pub fn connection_string(&self) -> String {
        match self {
            Self::Mysql { url } => url.as_str().to_string(),
            Self::Sqlite { path } => path.clone(),
        }
    }

    /// Display form with any password masked.
    #[must_use]
    pub fn redacted(&self) -> String {
        match self {
            Self::Mysql { url } => {
                let mut masked = url.clone();
                if masked.password().is_some() {
                    // Only fails for URLs that cannot carry credentials.
                    let _ = masked.set_password(Some("****"));
                }
                masked.to_string()
            }
            Self::Sqlite { path } => format!("sqlite://{path}"),
        }
    }

    #[must_use]
    pub fn database_name(&self) -> String {
        match self {
            Self::Mysql { url } => url.path().trim_start_matches('/').to_string(),
            Self::Sqlite { path } => std::path::Path::new(path)
                .file_name()
                .map_or_else(|| path.clone(), |name| name.to_string_lossy().into_owned()),
        }
    }

    #[must_use]
    pub fn host(&self) -> String {
        match self {
            Self::Mysql { url } => url.host_str().unwrap_or("localhost").to_string(),
            Self::Sqlite { .. } => "local file".to_string(),
        }
    }
}

impl fmt::Debug for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DatabaseTarget").field(&self.redacted()).finish()
    }
}

impl fmt::Display for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}
