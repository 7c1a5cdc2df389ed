//! Handler for `paddock check warehouse`.

use super::output;
use crate::error::{Result, WarehouseError};
use crate::infrastructure::config::Config;
use crate::port::WarehouseReader;

/// Test the connection, then count rows in every table the reports read.
///
/// Fails when the connection fails or any table cannot be read.
pub fn execute_warehouse(config: &Config) -> Result<()> {
    let warehouse = config.warehouse()?;

    output::section("Warehouse Check");
    output::field("Database", warehouse.describe());

    let pb = output::spinner("Connecting...");
    let counts = match warehouse.probe() {
        Ok(counts) => {
            output::spinner_success(&pb, "Connected");
            counts
        }
        Err(e) => {
            output::spinner_fail(&pb, "Connection failed");
            return Err(e);
        }
    };

    output::section("Tables");
    let mut unreadable = 0;
    for count in &counts {
        match &count.rows {
            Ok(rows) => output::field(count.table, rows),
            Err(message) => {
                unreadable += 1;
                output::warning(&format!("{}: {message}", count.table));
            }
        }
    }

    if unreadable > 0 {
        return Err(WarehouseError::Query {
            query: "check",
            message: format!("{unreadable} of {} tables could not be read", counts.len()),
        }
        .into());
    }

    output::success("Warehouse checks passed");
    Ok(())
}
