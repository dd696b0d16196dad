//! Player roster model.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A player as listed in the roster table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,

    /// Display name
    pub gamer_tag: String,

    /// Lowercase country code; empty when unknown
    pub country_code: String,

    /// Birthday as exported (free-form, may be empty)
    pub birthday: String,
}

impl Player {
    pub fn new(player_id: PlayerId, gamer_tag: String, country_code: String) -> Self {
        Self {
            player_id,
            gamer_tag,
            country_code,
            birthday: String::new(),
        }
    }

    /// Builder method to set birthday.
    pub fn with_birthday(mut self, birthday: String) -> Self {
        self.birthday = birthday;
        self
    }

    /// Whether a country is recorded for this player.
    pub fn has_country(&self) -> bool {
        !self.country_code.is_empty()
    }
}
