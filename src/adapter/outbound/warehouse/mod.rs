//! Analytics warehouse adapter (MySQL in production, SQLite for fixtures).

pub mod connection;
pub mod dialect;
pub mod query;
pub mod reader;
pub mod row;
pub mod target;

pub use connection::{AnyConnection, WarehouseConnection, WarehouseRow};
pub use dialect::Dialect;
pub use query::QueryContext;
pub use reader::{collect_snapshot, DieselWarehouse};
pub use target::DatabaseTarget;
