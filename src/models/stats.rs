//! Derived, view-facing statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PlayerId;

/// One row of the ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRatingElement {
    pub player_id: PlayerId,

    /// 1-based position; reassigned after every country filter
    pub rank: u32,

    pub name: String,

    pub country_code: String,

    pub rating: f64,

    /// Rounded percentage (0 to 100)
    pub win_rate: u32,

    pub game_count: u32,

    pub win_count: u32,

    /// Accumulated CPT points over all placements
    pub cpt_point: f64,

    /// Number of events won
    pub tournament_win_count: u32,
}

/// Set count shown in a battle record.
///
/// Numeric scores pass through unchanged. Non-numeric scores (walkovers,
/// disqualifications) are replaced by a `W` / `L` marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetScore(String);

impl SetScore {
    pub const WIN_MARKER: &'static str = "W";
    pub const LOSE_MARKER: &'static str = "L";

    /// Resolve a raw score for the side that did (`won = true`) or did not win the set.
    pub fn resolve(raw: &str, won: bool) -> Self {
        let numeric = raw.trim().parse::<f64>().is_ok_and(|v| v.is_finite());
        if numeric {
            Self(raw.to_string())
        } else if won {
            Self(Self::WIN_MARKER.to_string())
        } else {
            Self(Self::LOSE_MARKER.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a walkover marker rather than a set count.
    pub fn is_marker(&self) -> bool {
        self.0 == Self::WIN_MARKER || self.0 == Self::LOSE_MARKER
    }
}

impl std::fmt::Display for SetScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One match from a single player's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleRecord {
    /// `None` for a match exported without a timestamp
    pub date: Option<DateTime<Utc>>,
    pub event: String,
    pub bracket: String,
    pub round: String,
    pub is_win: bool,

    /// The queried player's set count
    pub win_set_count: SetScore,

    /// The opponent's set count
    pub lose_set_count: SetScore,

    pub opponent_tag: String,
    pub opponent_id: PlayerId,

    /// Opponent characters for this set (empty when unrecorded)
    pub opponent_chars: String,

    /// Rating after this match
    pub running_rating: f64,

    /// Magnitude of the rating change
    pub rating_delta: f64,

    /// Rating change signed for the queried player
    pub signed_delta: f64,
}

/// A placement in a player's event history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    pub event: String,
    pub placement: u32,
    pub cpt_point: f64,

    /// Prize money for this placement; zero when the prize table has no entry
    pub prize: f64,
}

/// Summary card for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player_id: PlayerId,
    pub gamer_tag: String,
    pub country_code: String,
    pub birthday: String,

    /// Characters used, comma-joined in first-seen order
    pub characters: String,

    pub rank: u32,
    pub latest_rating: f64,

    /// Highest and lowest point of the replayed trajectory (baseline included)
    pub best_rating: f64,
    pub worst_rating: f64,

    pub win_rate: u32,
    pub win_count: u32,
    pub lose_count: u32,

    pub results: Vec<PlacementResult>,
    pub total_prize: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_score_numeric_passthrough() {
        assert_eq!(SetScore::resolve("3", true).as_str(), "3");
        assert_eq!(SetScore::resolve("0", false).as_str(), "0");
        assert!(!SetScore::resolve("2", true).is_marker());
    }

    #[test]
    fn test_set_score_walkover_markers() {
        assert_eq!(SetScore::resolve("W", true).as_str(), "W");
        assert_eq!(SetScore::resolve("L (DQ/FF)", false).as_str(), "L");
        assert_eq!(SetScore::resolve("DQ/FF", true).as_str(), "W");
        assert!(SetScore::resolve("", false).is_marker());
    }

    #[test]
    fn test_set_score_display() {
        assert_eq!(format!("{}", SetScore::resolve("W (DQ/FF)", true)), "W");
    }
}
