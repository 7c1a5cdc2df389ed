use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Warehouse access errors.
#[derive(Error, Debug)]
pub enum WarehouseError {
    #[error("database connection failed: {0}")]
    Connect(String),

    #[error("query {query} failed: {message}")]
    Query { query: &'static str, message: String },

    #[error("unsupported database backend '{scheme}'{hint}")]
    UnsupportedBackend { scheme: String, hint: &'static str },

    #[error("unexpected value in {query}: {reason}")]
    Decode { query: &'static str, reason: String },
}

/// Snapshot file errors.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("No data file found at {path}. Run `paddock update` first.")]
    Missing { path: String },

    #[error("No data available in {path}.")]
    Empty { path: String },

    #[error("failed to read snapshot {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("No data to save: the warehouse returned no P&L rows")]
    NothingToSave,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Warehouse(#[from] WarehouseError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
