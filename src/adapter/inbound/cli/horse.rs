//! Handler for `paddock horse <user_horse_id>`.

use super::output;
use crate::application::report::horse_report;
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::WarehouseReader;

pub fn execute(config: &Config, user_horse_id: i64) -> Result<()> {
    let warehouse = config.warehouse()?;

    let pb = output::spinner(&format!("Loading races for horse {user_horse_id}..."));
    let races = match warehouse.race_history(user_horse_id) {
        Ok(races) => {
            output::spinner_success(&pb, &format!("Loaded {} races", races.len()));
            races
        }
        Err(e) => {
            output::spinner_fail(&pb, "Race history query failed");
            return Err(e);
        }
    };

    output::report("horse", &horse_report(user_horse_id, &races));
    Ok(())
}
