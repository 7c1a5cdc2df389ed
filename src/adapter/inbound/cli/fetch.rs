//! Handler for `paddock fetch`: the fleet metrics as one JSON document.
//!
//! The envelope is always JSON, with or without `--json`:
//!
//! ```json
//! {"success": true, "data": {...}, "bot_names": {"10111491": "Alba"}, "timestamp": "..."}
//! {"success": false, "error": "...", "timestamp": "..."}
//! ```

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::{json, Value};

use super::output;
use crate::domain::{Roster, Snapshot};
use crate::error::Result;
use crate::infrastructure::config::Config;
use crate::port::WarehouseReader;

fn envelope(snapshot: &Snapshot, roster: &Roster) -> Result<Value> {
    let bot_names: BTreeMap<String, &str> = roster
        .bots()
        .iter()
        .map(|bot| (bot.id.to_string(), bot.name.as_str()))
        .collect();

    Ok(json!({
        "success": true,
        "data": {
            "total_pnl": serde_json::to_value(&snapshot.total_pnl)?,
            "reserve_balance": serde_json::to_value(&snapshot.reserve_balance)?,
            "in_play_balance": serde_json::to_value(&snapshot.in_play_balance)?,
            "races_entered": serde_json::to_value(&snapshot.races_entered)?,
            "daily_pnl": serde_json::to_value(&snapshot.daily_pnl)?,
            "failures": serde_json::to_value(&snapshot.failures)?,
        },
        "bot_names": bot_names,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

fn failure(message: &str) -> Value {
    json!({
        "success": false,
        "error": message,
        "timestamp": Utc::now().to_rfc3339(),
    })
}

pub fn execute(config: &Config) -> Result<()> {
    let roster = config.roster();
    let result = config
        .warehouse()
        .and_then(|warehouse| warehouse.fetch(&config.fetch_request(false)))
        .and_then(|snapshot| envelope(&snapshot, &roster));

    match result {
        Ok(value) => {
            output::json_output(&value);
            Ok(())
        }
        Err(e) => {
            output::json_output(&failure(&e.to_string()));
            Err(e)
        }
    }
}
