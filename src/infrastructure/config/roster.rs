//! Which bots are reported on and what they are called.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::domain::bot::parse_id_list;
use crate::domain::{Bot, Roster, UserId};
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BotEntry {
    pub id: i64,
    pub name: String,
}

/// The `[[roster.bots]]` table plus the optional `BOT_USER_IDS` selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub bots: Vec<BotEntry>,
    /// Ids picked by `BOT_USER_IDS`, in the order given.
    #[serde(skip)]
    pub selected: Option<Vec<UserId>>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            bots: Roster::house()
                .bots()
                .iter()
                .map(|bot| BotEntry {
                    id: bot.id.0,
                    name: bot.name.clone(),
                })
                .collect(),
            selected: None,
        }
    }
}

impl RosterConfig {
    /// Apply a raw `BOT_USER_IDS` value.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] when an entry is not an integer id
    /// or an id is listed twice.
    pub fn select_from_env(&mut self, raw: &str) -> Result<()> {
        let ids = parse_id_list(raw).map_err(|reason| ConfigError::InvalidValue {
            field: "BOT_USER_IDS",
            reason,
        })?;
        let mut seen = BTreeSet::new();
        if let Some(id) = ids.iter().find(|id| !seen.insert(**id)) {
            return Err(ConfigError::InvalidValue {
                field: "BOT_USER_IDS",
                reason: format!("duplicate bot id {id}"),
            }
            .into());
        }
        self.selected = Some(ids);
        Ok(())
    }

    /// The roster reports should use.
    #[must_use]
    pub fn roster(&self) -> Roster {
        let all = Roster::new(
            self.bots
                .iter()
                .map(|entry| Bot::new(entry.id, entry.name.clone()))
                .collect(),
        );
        match &self.selected {
            Some(ids) => all.select(ids),
            None => all,
        }
    }

    pub(super) fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for entry in &self.bots {
            if !seen.insert(entry.id) {
                return Err(ConfigError::InvalidValue {
                    field: "roster.bots",
                    reason: format!("duplicate bot id {}", entry.id),
                }
                .into());
            }
            if entry.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "roster.bots",
                    reason: format!("bot {} has an empty name", entry.id),
                }
                .into());
            }
        }

        if self.roster().is_empty() {
            let reason = if self.selected.is_some() {
                "BOT_USER_IDS selects no bots".to_string()
            } else {
                "at least one bot is required".to_string()
            };
            return Err(ConfigError::InvalidValue {
                field: "roster.bots",
                reason,
            }
            .into());
        }
        Ok(())
    }
}
