//! Entity mappers: decoded rows to typed records.
//!
//! Every mapper reads columns through a [`TableSchema`] and validates each
//! field it needs. A row that fails validation is reported as a
//! [`MappingError`]; the batch mappers log it as a data-quality warning and
//! skip the row instead of propagating half-filled records.

mod schema;

pub use schema::*;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Match, Placement, Player, PlayerId, Rating, RatingDelta};
use crate::table::RawRow;

/// Errors raised while mapping a single row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    #[error("line {line}: missing field `{field}`")]
    MissingField { line: usize, field: String },

    #[error("line {line}: field `{field}` is not a number: {value:?}")]
    InvalidNumber {
        line: usize,
        field: String,
        value: String,
    },

    #[error("line {line}: field `{field}` is not a non-negative whole number: {value:?}")]
    InvalidCount {
        line: usize,
        field: String,
        value: String,
    },

    #[error("line {line}: field `{field}` must be a non-negative rating change: {value:?}")]
    NegativeRatingDelta {
        line: usize,
        field: String,
        value: String,
    },
}

fn require<'r>(row: &'r RawRow, field: &str) -> Result<&'r str, MappingError> {
    row.get(field).ok_or_else(|| MappingError::MissingField {
        line: row.line(),
        field: field.to_string(),
    })
}

fn parse_number(row: &RawRow, field: &str) -> Result<f64, MappingError> {
    let raw = require(row, field)?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(MappingError::InvalidNumber {
            line: row.line(),
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Parse a count. Accepts integral decimals such as `"12.0"`.
fn parse_count(row: &RawRow, field: &str) -> Result<u32, MappingError> {
    let value = parse_number(row, field)?;
    if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(MappingError::InvalidCount {
            line: row.line(),
            field: field.to_string(),
            value: require(row, field)?.to_string(),
        });
    }
    Ok(value as u32)
}

fn parse_player_id(row: &RawRow, field: &str) -> Result<PlayerId, MappingError> {
    let raw = require(row, field)?.trim();
    if raw.is_empty() {
        return Err(MappingError::MissingField {
            line: row.line(),
            field: field.to_string(),
        });
    }
    Ok(PlayerId::from(raw))
}

/// Rewrite the export timestamp (`2025-03-01 12:34:56 UTC`) as an ISO-8601
/// instant (`2025-03-01T12:34:56Z`). Already-normalized input is unchanged.
pub fn normalize_timestamp(raw: &str) -> String {
    raw.trim().replacen(" UTC", "Z", 1).replacen(' ', "T", 1)
}

/// Parse an export timestamp into a UTC instant.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&normalize_timestamp(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Map one ratings row. `rank` is supplied by the caller from row order.
pub fn rating_from_row(
    row: &RawRow,
    cols: &RatingColumns,
    rank: u32,
) -> Result<Rating, MappingError> {
    Ok(Rating::new(
        parse_player_id(row, cols.player_id)?,
        rank,
        parse_number(row, cols.rating)?,
        parse_count(row, cols.win_count)?,
        parse_count(row, cols.lose_count)?,
    ))
}

pub fn player_from_row(row: &RawRow, cols: &PlayerColumns) -> Result<Player, MappingError> {
    let birthday = match cols.birthday {
        Some(column) => require(row, column)?.trim().to_string(),
        None => String::new(),
    };

    Ok(Player::new(
        parse_player_id(row, cols.player_id)?,
        require(row, cols.gamer_tag)?.to_string(),
        require(row, cols.country_code)?.trim().to_lowercase(),
    )
    .with_birthday(birthday))
}

pub fn placement_from_row(
    row: &RawRow,
    cols: &PlacementColumns,
) -> Result<Placement, MappingError> {
    Ok(Placement::new(
        parse_player_id(row, cols.player_id)?,
        require(row, cols.event)?.to_string(),
        parse_count(row, cols.placement)?,
        parse_number(row, cols.cpt_point)?,
    ))
}

/// Map one matches row.
///
/// A match exported without a usable timestamp (`N/A`, `Invalid Timestamp`)
/// is kept undated; its rating change still counts.
pub fn match_from_row(row: &RawRow, cols: &MatchColumns) -> Result<Match, MappingError> {
    let raw_datetime = require(row, cols.datetime)?;
    let datetime = parse_timestamp(raw_datetime);
    let rate_diff =
        RatingDelta::new(parse_number(row, cols.rate_diff)?).ok_or_else(|| {
            MappingError::NegativeRatingDelta {
                line: row.line(),
                field: cols.rate_diff.to_string(),
                value: row.get(cols.rate_diff).unwrap_or_default().to_string(),
            }
        })?;

    let m = Match {
        datetime,
        event: require(row, cols.event)?.to_string(),
        bracket: require(row, cols.bracket)?.to_string(),
        round: require(row, cols.round)?.to_string(),
        player1: parse_player_id(row, cols.player1)?,
        player2: parse_player_id(row, cols.player2)?,
        player1_score: require(row, cols.player1_score)?.to_string(),
        player2_score: require(row, cols.player2_score)?.to_string(),
        player1_chars: require(row, cols.player1_chars)?.to_string(),
        player2_chars: require(row, cols.player2_chars)?.to_string(),
        rate_diff,
    };

    if m.datetime.is_none() {
        warn!(
            "Data quality: match at line {} has no usable timestamp {:?}, replaying it last",
            row.line(),
            raw_datetime
        );
    }
    Ok(m)
}

/// Map every row with `f`, logging and skipping rows that fail.
pub fn map_rows<T, F>(table: &str, rows: &[RawRow], mut f: F) -> Vec<T>
where
    F: FnMut(&RawRow) -> Result<T, MappingError>,
{
    let mut mapped = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for row in rows {
        match f(row) {
            Ok(value) => mapped.push(value),
            Err(e) => {
                skipped += 1;
                warn!("Data quality: skipping {} row: {}", table, e);
            }
        }
    }

    debug!(
        "Mapped {} {} rows ({} skipped)",
        mapped.len(),
        table,
        skipped
    );
    mapped
}

/// Map the ratings table. Ranks follow row order among the rows that map,
/// so the table must already be sorted by descending rating.
pub fn map_ratings(rows: &[RawRow], cols: &RatingColumns) -> Vec<Rating> {
    let mut ratings = map_rows("ratings", rows, |row| rating_from_row(row, cols, 0));
    for (i, rating) in ratings.iter_mut().enumerate() {
        rating.rank = i as u32 + 1;
    }
    ratings
}

pub fn map_players(rows: &[RawRow], cols: &PlayerColumns) -> Vec<Player> {
    map_rows("players", rows, |row| player_from_row(row, cols))
}

pub fn map_placements(rows: &[RawRow], cols: &PlacementColumns) -> Vec<Placement> {
    map_rows("placements", rows, |row| placement_from_row(row, cols))
}

pub fn map_matches(rows: &[RawRow], cols: &MatchColumns) -> Vec<Match> {
    map_rows("matches", rows, |row| match_from_row(row, cols))
}

/// Map only the matches `player` took part in. The matches table is global,
/// so rows are filtered on the player columns before they are validated.
pub fn map_matches_for(rows: &[RawRow], cols: &MatchColumns, player: &PlayerId) -> Vec<Match> {
    let involved: Vec<RawRow> = rows
        .iter()
        .filter(|row| {
            let id = player.as_str();
            row.get(cols.player1).map(str::trim) == Some(id)
                || row.get(cols.player2).map(str::trim) == Some(id)
        })
        .cloned()
        .collect();

    map_rows("matches", &involved, |row| match_from_row(row, cols))
}

/// Index ratings by player. A repeated id keeps its last row.
pub fn index_ratings(ratings: Vec<Rating>) -> HashMap<PlayerId, Rating> {
    ratings
        .into_iter()
        .map(|r| (r.player_id.clone(), r))
        .collect()
}

/// Index the roster by player. A repeated id keeps its last row.
pub fn index_players(players: Vec<Player>) -> HashMap<PlayerId, Player> {
    players
        .into_iter()
        .map(|p| (p.player_id.clone(), p))
        .collect()
}
