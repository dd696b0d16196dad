//! View loading.
//!
//! Each view fetches all of its tables concurrently and aggregates only once
//! every fetch has succeeded. Any failure fails the whole load: no partial
//! snapshot is ever produced. Nothing is cached between loads.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::calculate::{
    battle_records, build_ranking, event_list, player_summary, rostered_ratings, PlayerTables,
    PrizeTable, RatingTrajectory,
};
use crate::config::SeasonConfig;
use crate::fetch::{AssetSource, FetchError};
use crate::mapping::{
    index_players, index_ratings, map_matches_for, map_placements, map_players, map_ratings,
    TableSchema,
};
use crate::models::{BattleRecord, PlayerId, PlayerRatingElement, PlayerSummary};
use crate::table::{decode, Table};
use crate::view::{country_list, filter_ranking, CountryFilter};

/// Errors that abort a view load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to fetch {path}: {source}")]
    Fetch {
        path: String,
        #[source]
        source: FetchError,
    },

    #[error("Invalid prize table {path}: {source}")]
    PrizeTable {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Player not found: {0}")]
    PlayerNotFound(String),
}

/// Everything the ranking view shows.
#[derive(Debug, Clone, Serialize)]
pub struct RankingSnapshot {
    pub season: String,

    /// Full ranking in rating order
    pub ranking: Vec<PlayerRatingElement>,

    /// Filter options, "All" first
    pub countries: Vec<String>,

    pub events: Vec<String>,
}

impl RankingSnapshot {
    /// The ranking restricted to one country, re-ranked from 1.
    pub fn filtered(&self, filter: &CountryFilter) -> Vec<PlayerRatingElement> {
        filter_ranking(&self.ranking, filter)
    }
}

/// Everything the player view shows.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub summary: PlayerSummary,

    /// Rating after each match, baseline first
    pub trajectory: Vec<f64>,

    /// Most recent first
    pub battle_records: Vec<BattleRecord>,
}

/// Loads view snapshots for one season.
pub struct ViewLoader {
    source: Arc<dyn AssetSource>,
    season: SeasonConfig,
    schema: TableSchema,
}

impl ViewLoader {
    pub fn new(source: Arc<dyn AssetSource>, season: SeasonConfig) -> Self {
        let schema = TableSchema::for_version(season.schema);
        Self {
            source,
            season,
            schema,
        }
    }

    pub fn season(&self) -> &SeasonConfig {
        &self.season
    }

    async fn fetch_table(&self, path: &str) -> Result<Table, LoadError> {
        let text = self
            .source
            .fetch_text(path)
            .await
            .map_err(|source| LoadError::Fetch {
                path: path.to_string(),
                source,
            })?;
        let table = decode(&text, self.season.delimiter_char());
        debug!("Decoded {} rows from {} ({})", table.len(), path, self.source.name());
        Ok(table)
    }

    async fn fetch_prizes(&self) -> Result<PrizeTable, LoadError> {
        let Some(path) = self.season.prize_table_path.as_deref() else {
            return Ok(PrizeTable::new());
        };
        let text = self
            .source
            .fetch_text(path)
            .await
            .map_err(|source| LoadError::Fetch {
                path: path.to_string(),
                source,
            })?;
        PrizeTable::from_json(&text).map_err(|source| LoadError::PrizeTable {
            path: path.to_string(),
            source,
        })
    }

    /// Load the ranking view: ratings, roster and placements.
    pub async fn load_ranking(&self) -> Result<RankingSnapshot, LoadError> {
        let season = &self.season;
        let (ratings, players, placements) = tokio::try_join!(
            self.fetch_table(&season.ratings_path),
            self.fetch_table(&season.players_path),
            self.fetch_table(&season.placements_path),
        )?;

        let ratings = map_ratings(&ratings.rows, &self.schema.ratings);
        let players = index_players(map_players(&players.rows, &self.schema.players));
        let placements = map_placements(&placements.rows, &self.schema.placements);

        let ranking = build_ranking(&ratings, &players, &placements);
        let countries = country_list(&ranking);
        let events = event_list(&placements);

        info!(
            "Loaded {} ranking: {} players, {} countries, {} events",
            season.name,
            ranking.len(),
            countries.len().saturating_sub(1),
            events.len()
        );

        Ok(RankingSnapshot {
            season: season.name.clone(),
            ranking,
            countries,
            events,
        })
    }

    /// Load the player view: all four tables plus the prize table.
    pub async fn load_player(&self, player_id: &PlayerId) -> Result<PlayerSnapshot, LoadError> {
        let season = &self.season;
        let (ratings, players, placements, matches, prizes) = tokio::try_join!(
            self.fetch_table(&season.ratings_path),
            self.fetch_table(&season.players_path),
            self.fetch_table(&season.placements_path),
            self.fetch_table(&season.matches_path),
            self.fetch_prizes(),
        )?;

        let players = index_players(map_players(&players.rows, &self.schema.players));
        let ratings = map_ratings(&ratings.rows, &self.schema.ratings);
        let ratings = index_ratings(rostered_ratings(&ratings, &players));
        let placements = map_placements(&placements.rows, &self.schema.placements);
        let matches = map_matches_for(&matches.rows, &self.schema.matches, player_id);

        let tables = PlayerTables {
            ratings: &ratings,
            players: &players,
            placements: &placements,
            matches: &matches,
            prizes: &prizes,
        };
        let summary = player_summary(player_id, &tables, season.baseline_rating)
            .ok_or_else(|| LoadError::PlayerNotFound(player_id.to_string()))?;

        let trajectory =
            RatingTrajectory::new(player_id, &matches, season.baseline_rating).points();
        let battle_records =
            battle_records(player_id, &matches, &players, season.baseline_rating);

        info!(
            "Loaded {} player {}: {} matches",
            season.name,
            summary.gamer_tag,
            matches.len()
        );

        Ok(PlayerSnapshot {
            summary,
            trajectory,
            battle_records,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use crate::fetch::{AssetSource, FetchError};

    pub const RATINGS: &str = "Rating\tPlayerId\tWinCnt\tLoseCnt\n\
        1530\t100\t3\t1\n\
        1510\t200\t2\t2\n\
        1490\t300\t1\t3\n\
        1470\t400\t0\t0\n";

    pub const PLAYERS: &str = "PlayerId\tGamerTag\tCountryCode\tBirthday\n\
        100\tAlpha\tjp\t1990-01-01\n\
        200\tBravo\tus\t\n\
        300\tCharlie\tjp\t\n\
        400\tDelta\t\t\n";

    pub const PLACEMENTS: &str = "PlayerId\tEvent\tFinalPlacement\tCPTPoint\n\
        100\tEVO\t1\t800\n\
        200\tEVO\t2\t500\n\
        100\tCEO\t3\t200\n\
        300\tCEO\t1\t300\n";

    pub const MATCHES: &str = "Datetime(UTC)\tEvent\tBracket\tRound\tPlayer1\tPlayer2\tPlayer1Score\tPlayer2Score\tPlayer1Chars\tPlayer2Chars\tRateDiff\n\
        2025-04-02 10:00:00 UTC\tCEO\tTop 8\tGrand Final\t300\t100\t3\t2\tLuke\tJuri\t15\n\
        2025-03-01 10:00:00 UTC\tEVO\tTop 8\tGrand Final\t100\t200\tW\tL\tJuri, Cammy\tKen\t20\n\
        2025-03-01 09:00:00 UTC\tEVO\tTop 8\tWinners Final\t100\t300\t3\t0\tJuri\tLuke\t25\n\
        2025-03-01 08:00:00 UTC\tEVO\tTop 8\tLosers Final\t200\t400\t3\t1\tKen\tN/A\t10\n";

    pub const PRIZES: &str = r#"{"EVO": {"1": 30000, "2": 12000}, "CEO": {"1": 5000}}"#;

    /// In-memory asset source keyed by path.
    #[derive(Default)]
    pub struct MemorySource {
        assets: HashMap<String, String>,
    }

    impl MemorySource {
        pub fn with_asset(mut self, path: &str, text: &str) -> Self {
            self.assets.insert(path.to_string(), text.to_string());
            self
        }

        /// All four default season tables plus a prize table.
        pub fn season() -> Self {
            Self::default()
                .with_asset("cpt_2025/player_ratings.tsv", RATINGS)
                .with_asset("cpt_2025/all_player.tsv", PLAYERS)
                .with_asset("cpt_2025/all_placements.tsv", PLACEMENTS)
                .with_asset("cpt_2025/all_matches.tsv", MATCHES)
                .with_asset("prizes.json", PRIZES)
        }
    }

    #[async_trait]
    impl AssetSource for MemorySource {
        fn name(&self) -> &str {
            "memory"
        }

        async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
            self.assets
                .get(path)
                .cloned()
                .ok_or_else(|| FetchError::InvalidPath(path.to_string()))
        }
    }
}
