//! Warehouse connections using Diesel.
//!
//! Queries are plain SQL text loaded through `sql_query`, so a single row type
//! serves every backend compiled in. MySQL support is behind the `mysql` feature
//! because it links against the native client library.

use std::path::Path;

use diesel::prelude::*;
use diesel::deserialize::QueryableByName;
use diesel::sqlite::{Sqlite, SqliteConnection};
use tracing::debug;

#[cfg(feature = "mysql")]
use diesel::mysql::{Mysql, MysqlConnection};

use super::dialect::Dialect;
use super::target::DatabaseTarget;
use crate::error::{Result, WarehouseError};

/// A row type loadable from every compiled-in backend.
#[cfg(not(feature = "mysql"))]
pub trait WarehouseRow: QueryableByName<Sqlite> + 'static {}

#[cfg(not(feature = "mysql"))]
impl<T> WarehouseRow for T where T: QueryableByName<Sqlite> + 'static {}

/// A row type loadable from every compiled-in backend.
#[cfg(feature = "mysql")]
pub trait WarehouseRow: QueryableByName<Sqlite> + QueryableByName<Mysql> + 'static {}

#[cfg(feature = "mysql")]
impl<T> WarehouseRow for T where T: QueryableByName<Sqlite> + QueryableByName<Mysql> + 'static {}

/// The operations reports need from a live connection.
pub trait WarehouseConnection {
    fn dialect(&self) -> Dialect;

    fn load_rows<R: WarehouseRow>(&mut self, sql: &str) -> QueryResult<Vec<R>>;

    fn execute_sql(&mut self, sql: &str) -> QueryResult<usize>;
}

impl WarehouseConnection for SqliteConnection {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn load_rows<R: WarehouseRow>(&mut self, sql: &str) -> QueryResult<Vec<R>> {
        diesel::sql_query(sql).load::<R>(self)
    }

    fn execute_sql(&mut self, sql: &str) -> QueryResult<usize> {
        diesel::sql_query(sql).execute(self)
    }
}

#[cfg(feature = "mysql")]
impl WarehouseConnection for MysqlConnection {
    fn dialect(&self) -> Dialect {
        Dialect::Mysql
    }

    fn load_rows<R: WarehouseRow>(&mut self, sql: &str) -> QueryResult<Vec<R>> {
        diesel::sql_query(sql).load::<R>(self)
    }

    fn execute_sql(&mut self, sql: &str) -> QueryResult<usize> {
        diesel::sql_query(sql).execute(self)
    }
}

/// A connection to whichever backend the target names.
pub enum AnyConnection {
    Sqlite(SqliteConnection),
    #[cfg(feature = "mysql")]
    Mysql(MysqlConnection),
}

impl AnyConnection {
    /// Connect and apply the dialect's session setup.
    ///
    /// # Errors
    /// Returns [`WarehouseError::Connect`] if the connection or setup fails, and
    /// [`WarehouseError::UnsupportedBackend`] for MySQL in a build without it.
    pub fn establish(target: &DatabaseTarget) -> Result<Self> {
        debug!(database = %target, "connecting to warehouse");
        let mut conn = match target {
            DatabaseTarget::Sqlite { path } => {
                ensure_sqlite_file(path)?;
                SqliteConnection::establish(path)
                    .map(Self::Sqlite)
                    .map_err(|e| WarehouseError::Connect(e.to_string()))?
            }
            #[cfg(feature = "mysql")]
            DatabaseTarget::Mysql { .. } => {
                MysqlConnection::establish(&target.connection_string())
                    .map(Self::Mysql)
                    .map_err(|e| WarehouseError::Connect(e.to_string()))?
            }
            #[cfg(not(feature = "mysql"))]
            DatabaseTarget::Mysql { .. } => {
                return Err(WarehouseError::UnsupportedBackend {
                    scheme: "mysql".to_string(),
                    hint: " (this build was compiled without the `mysql` feature)",
                }
                .into());
            }
        };

        for statement in conn.dialect().session_setup() {
            conn.execute_sql(statement)
                .map_err(|e| WarehouseError::Connect(e.to_string()))?;
        }

        Ok(conn)
    }
}

/// SQLite would create a missing file and hand back an empty warehouse.
fn ensure_sqlite_file(path: &str) -> Result<()> {
    if path == ":memory:" || path.starts_with("file:") || Path::new(path).is_file() {
        return Ok(());
    }
    Err(WarehouseError::Connect(format!("SQLite database file not found: {path}")).into())
}

impl WarehouseConnection for AnyConnection {
    fn dialect(&self) -> Dialect {
        match self {
            Self::Sqlite(conn) => conn.dialect(),
            #[cfg(feature = "mysql")]
            Self::Mysql(conn) => conn.dialect(),
        }
    }

    fn load_rows<R: WarehouseRow>(&mut self, sql: &str) -> QueryResult<Vec<R>> {
        match self {
            Self::Sqlite(conn) => conn.load_rows(sql),
            #[cfg(feature = "mysql")]
            Self::Mysql(conn) => conn.load_rows(sql),
        }
    }

    fn execute_sql(&mut self, sql: &str) -> QueryResult<usize> {
        match self {
            Self::Sqlite(conn) => conn.execute_sql(sql),
            #[cfg(feature = "mysql")]
            Self::Mysql(conn) => conn.execute_sql(sql),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::sql_types::BigInt;

    #[derive(QueryableByName)]
    struct One {
        #[diesel(sql_type = BigInt)]
        value: i64,
    }

    #[test]
    fn establish_opens_sqlite_memory_db() {
        let target = DatabaseTarget::parse(":memory:").unwrap();
        let mut conn = AnyConnection::establish(&target).unwrap();
        assert_eq!(conn.dialect(), Dialect::Sqlite);

        let rows: Vec<One> = conn.load_rows("SELECT 41 + 1 AS value").unwrap();
        assert_eq!(rows[0].value, 42);
    }

    #[test]
    fn load_rows_reports_sql_errors() {
        let target = DatabaseTarget::parse(":memory:").unwrap();
        let mut conn = AnyConnection::establish(&target).unwrap();
        let result: QueryResult<Vec<One>> = conn.load_rows("SELECT value FROM missing_table");
        assert!(result.is_err());
    }

    #[test]
    fn missing_sqlite_file_is_a_connect_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warehuose.db");
        let target = DatabaseTarget::parse(&path.display().to_string()).unwrap();

        assert!(matches!(
            AnyConnection::establish(&target),
            Err(crate::error::Error::Warehouse(WarehouseError::Connect(_)))
        ));
        assert!(!path.exists());
    }

    #[cfg(not(feature = "mysql"))]
    #[test]
    fn mysql_target_needs_the_feature() {
        let target = DatabaseTarget::parse("mysql://u@localhost/db").unwrap();
        assert!(matches!(
            AnyConnection::establish(&target),
            Err(crate::error::Error::Warehouse(WarehouseError::UnsupportedBackend { .. }))
        ));
    }
}
