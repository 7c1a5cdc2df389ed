//! Backend-specific SQL fragments.
//!
//! Query text is shared between MySQL and SQLite. The handful of places where
//! the two disagree (cast targets, unix time bucketing, session setup) go
//! through [`Dialect`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Mysql,
}

impl Dialect {
    /// Cast to a 64-bit integer. MySQL `SUM` returns `DECIMAL` otherwise.
    #[must_use]
    pub fn integer(self, expr: &str) -> String {
        match self {
            Self::Mysql => format!("CAST({expr} AS SIGNED)"),
            Self::Sqlite => format!("CAST({expr} AS INTEGER)"),
        }
    }

    /// Cast to a double.
    #[must_use]
    pub fn real(self, expr: &str) -> String {
        match self {
            Self::Mysql => format!("CAST({expr} AS DOUBLE)"),
            Self::Sqlite => format!("CAST({expr} AS REAL)"),
        }
    }

    #[must_use]
    pub fn text(self, expr: &str) -> String {
        match self {
            Self::Mysql => format!("CAST({expr} AS CHAR)"),
            Self::Sqlite => format!("CAST({expr} AS TEXT)"),
        }
    }

    /// `YYYY-MM-DD` UTC day of a unix timestamp column.
    #[must_use]
    pub fn utc_day(self, column: &str) -> String {
        match self {
            Self::Mysql => format!("DATE_FORMAT(FROM_UNIXTIME({column}), '%Y-%m-%d')"),
            Self::Sqlite => format!("strftime('%Y-%m-%d', {column}, 'unixepoch')"),
        }
    }

    /// Statements run once after connecting.
    #[must_use]
    pub fn session_setup(self) -> &'static [&'static str] {
        match self {
            // FROM_UNIXTIME follows the session zone.
            Self::Mysql => &["SET time_zone = '+00:00'"],
            Self::Sqlite => &[],
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }
}
