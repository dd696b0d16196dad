//! Column layouts of the exported tables, one adapter per export version.

use serde::{Deserialize, Serialize};

/// Known export layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// Current per-table exports (`player_ratings.tsv`, `all_player.tsv`, ...)
    #[default]
    Cpt2025,

    /// Older single `player_data.tsv` export that carries both roster and rating columns
    Legacy2023,
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaVersion::Cpt2025 => write!(f, "cpt2025"),
            SchemaVersion::Legacy2023 => write!(f, "legacy2023"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingColumns {
    pub player_id: &'static str,
    pub rating: &'static str,
    pub win_count: &'static str,
    pub lose_count: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerColumns {
    pub player_id: &'static str,
    pub gamer_tag: &'static str,
    pub country_code: &'static str,
    /// Not every export carries a birthday
    pub birthday: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementColumns {
    pub player_id: &'static str,
    pub event: &'static str,
    pub placement: &'static str,
    pub cpt_point: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchColumns {
    pub datetime: &'static str,
    pub event: &'static str,
    pub bracket: &'static str,
    pub round: &'static str,
    pub player1: &'static str,
    pub player2: &'static str,
    pub player1_score: &'static str,
    pub player2_score: &'static str,
    pub player1_chars: &'static str,
    pub player2_chars: &'static str,
    pub rate_diff: &'static str,
}

/// Column names for all four tables of one export version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub ratings: RatingColumns,
    pub players: PlayerColumns,
    pub placements: PlacementColumns,
    pub matches: MatchColumns,
}

impl TableSchema {
    pub fn for_version(version: SchemaVersion) -> Self {
        match version {
            SchemaVersion::Cpt2025 => Self::cpt2025(),
            SchemaVersion::Legacy2023 => Self::legacy2023(),
        }
    }

    pub fn cpt2025() -> Self {
        Self {
            ratings: RatingColumns {
                player_id: "PlayerId",
                rating: "Rating",
                win_count: "WinCnt",
                lose_count: "LoseCnt",
            },
            players: PlayerColumns {
                player_id: "PlayerId",
                gamer_tag: "GamerTag",
                country_code: "CountryCode",
                birthday: Some("Birthday"),
            },
            placements: PlacementColumns {
                player_id: "PlayerId",
                event: "Event",
                placement: "FinalPlacement",
                cpt_point: "CPTPoint",
            },
            matches: MatchColumns {
                datetime: "Datetime(UTC)",
                event: "Event",
                bracket: "Bracket",
                round: "Round",
                player1: "Player1",
                player2: "Player2",
                player1_score: "Player1Score",
                player2_score: "Player2Score",
                player1_chars: "Player1Chars",
                player2_chars: "Player2Chars",
                rate_diff: "RateDiff",
            },
        }
    }

    /// The 2023 export kept ratings and roster in one table; placements and
    /// matches were already in the current layout.
    pub fn legacy2023() -> Self {
        let current = Self::cpt2025();
        Self {
            ratings: RatingColumns {
                player_id: "playerId",
                rating: "latest_rating",
                win_count: "win_n",
                lose_count: "lose_n",
            },
            players: PlayerColumns {
                player_id: "playerId",
                gamer_tag: "playerTag",
                country_code: "country",
                birthday: None,
            },
            ..current
        }
    }
}

impl Default for TableSchema {
    fn default() -> Self {
        Self::cpt2025()
    }
}
