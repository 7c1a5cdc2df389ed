//! Bot identities and the monitored roster.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Warehouse user identifier of a player account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A monitored bot account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bot {
    pub id: UserId,
    pub name: String,
}

impl Bot {
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            name: name.into(),
        }
    }
}

/// Ordered set of bots whose activity is reported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    bots: Vec<Bot>,
}

impl Roster {
    #[must_use]
    pub fn new(bots: Vec<Bot>) -> Self {
        Self { bots }
    }

    /// The five house bots.
    #[must_use]
    pub fn house() -> Self {
        Self::new(vec![
            Bot::new(10111491, "Alba"),
            Bot::new(10211493, "Eirean"),
            Bot::new(10411491, "Kernow"),
            Bot::new(10711491, "Cymru"),
            Bot::new(11011491, "Albion"),
        ])
    }

    /// Restrict or extend the roster to exactly `ids`, in that order.
    ///
    /// Ids already known keep their name; unknown ids get a generated one.
    #[must_use]
    pub fn select(&self, ids: &[UserId]) -> Self {
        let bots = ids
            .iter()
            .map(|id| Bot {
                id: *id,
                name: self.name_of(*id),
            })
            .collect();
        Self { bots }
    }

    #[must_use]
    pub fn bots(&self) -> &[Bot] {
        &self.bots
    }

    #[must_use]
    pub fn ids(&self) -> Vec<UserId> {
        self.bots.iter().map(|bot| bot.id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: UserId) -> bool {
        self.bots.iter().any(|bot| bot.id == id)
    }

    /// Display name for a user id, falling back to `Bot <id>`.
    #[must_use]
    pub fn name_of(&self, id: UserId) -> String {
        self.bots
            .iter()
            .find(|bot| bot.id == id)
            .map(|bot| bot.name.clone())
            .unwrap_or_else(|| format!("Bot {id}"))
    }

    /// Comma-separated id list for `IN (...)` clauses.
    #[must_use]
    pub fn sql_id_list(&self) -> String {
        self.ids()
            .iter()
            .map(UserId::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse a `BOT_USER_IDS`-style comma list.
pub fn parse_id_list(raw: &str) -> std::result::Result<Vec<UserId>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map(UserId)
                .map_err(|_| format!("'{part}' is not a numeric user id"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn house_roster_has_five_bots_in_order() {
        let roster = Roster::house();
        assert_eq!(roster.len(), 5);
        assert_eq!(roster.bots()[0].name, "Alba");
        assert_eq!(roster.bots()[4].id, UserId(11011491));
    }

    #[test]
    fn name_of_falls_back_for_unknown_ids() {
        let roster = Roster::house();
        assert_eq!(roster.name_of(UserId(10411491)), "Kernow");
        assert_eq!(roster.name_of(UserId(42)), "Bot 42");
    }

    #[test]
    fn sql_id_list_joins_ids() {
        let roster = Roster::new(vec![Bot::new(1, "a"), Bot::new(2, "b")]);
        assert_eq!(roster.sql_id_list(), "1, 2");
    }

    #[test]
    fn select_keeps_known_names_and_order() {
        let roster = Roster::house().select(&[UserId(10711491), UserId(7)]);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.bots()[0].name, "Cymru");
        assert_eq!(roster.bots()[1].name, "Bot 7");
    }

    #[test]
    fn parse_id_list_trims_whitespace() {
        let ids = parse_id_list(" 10111491, 10211493 ,10411491").unwrap();
        assert_eq!(ids, vec![UserId(10111491), UserId(10211493), UserId(10411491)]);
    }

    #[test]
    fn parse_id_list_rejects_non_numeric() {
        let err = parse_id_list("10111491,alba").unwrap_err();
        assert!(err.contains("alba"));
    }
}
