//! Match model: one completed set between two players.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Which slot of a match a player occupied.
///
/// The exported tables always put the set winner in `Player1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }

    pub fn is_winner(self) -> bool {
        self == Side::Player1
    }
}

/// Rating change produced by one match.
///
/// Stored as a non-negative magnitude; the sign is resolved per side when
/// read. Player1 gains the magnitude and Player2 loses the same amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct RatingDelta {
    magnitude: f64,
}

impl RatingDelta {
    /// Create a delta from its stored magnitude; `None` unless it is finite and non-negative.
    pub fn new(magnitude: f64) -> Option<Self> {
        (magnitude.is_finite() && magnitude >= 0.0).then_some(Self { magnitude })
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Signed change for the player on `side`.
    pub fn for_side(&self, side: Side) -> f64 {
        match side {
            Side::Player1 => self.magnitude,
            Side::Player2 => -self.magnitude,
        }
    }
}

/// A single completed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Completion time; `None` when the export has no usable timestamp
    pub datetime: Option<DateTime<Utc>>,

    /// Event name
    pub event: String,

    /// Bracket / phase name (e.g. "Top 24")
    pub bracket: String,

    /// Round name (e.g. "Winners Semi-Final")
    pub round: String,

    pub player1: PlayerId,
    pub player2: PlayerId,

    /// Raw set score; numeric, or a walkover marker such as "W" / "L (DQ/FF)"
    pub player1_score: String,
    pub player2_score: String,

    /// Comma-separated character names, may be empty or "N/A"
    pub player1_chars: String,
    pub player2_chars: String,

    pub rate_diff: RatingDelta,
}

impl Match {
    /// Which side `player` occupied, if any.
    pub fn side_of(&self, player: &PlayerId) -> Option<Side> {
        if &self.player1 == player {
            Some(Side::Player1)
        } else if &self.player2 == player {
            Some(Side::Player2)
        } else {
            None
        }
    }

    pub fn involves(&self, player: &PlayerId) -> bool {
        self.side_of(player).is_some()
    }

    pub fn player(&self, side: Side) -> &PlayerId {
        match side {
            Side::Player1 => &self.player1,
            Side::Player2 => &self.player2,
        }
    }

    pub fn score(&self, side: Side) -> &str {
        match side {
            Side::Player1 => &self.player1_score,
            Side::Player2 => &self.player2_score,
        }
    }

    pub fn chars(&self, side: Side) -> &str {
        match side {
            Side::Player1 => &self.player1_chars,
            Side::Player2 => &self.player2_chars,
        }
    }

    /// Signed rating change for `player`; zero when they did not play this match.
    pub fn delta_for(&self, player: &PlayerId) -> f64 {
        self.side_of(player)
            .map(|side| self.rate_diff.for_side(side))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// Build a match at `minute` past 2025-03-01 12:00 UTC.
    pub fn match_at(minute: u32, p1: &str, p2: &str, rate_diff: f64) -> Match {
        Match {
            datetime: Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, minute, 0).unwrap()),
            event: "Test Event".to_string(),
            bracket: "Pools".to_string(),
            round: format!("Round {}", minute),
            player1: PlayerId::from(p1),
            player2: PlayerId::from(p2),
            player1_score: "2".to_string(),
            player2_score: "0".to_string(),
            player1_chars: String::new(),
            player2_chars: String::new(),
            rate_diff: RatingDelta::new(rate_diff).unwrap(),
        }
    }
}
