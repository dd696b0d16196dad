//! Statistics aggregation.
//!
//! Joins ratings, roster, placements and matches by player id to compute:
//! - Win rates and the ranking table
//! - Tournament wins and accumulated CPT points
//! - Character usage and placement history with prize money
//! - Rating trajectories and battle records

pub mod battle;
pub mod characters;
pub mod prize;
pub mod trajectory;

pub use battle::battle_records;
pub use characters::{clean_chars, extract_characters};
pub use prize::PrizeTable;
pub use trajectory::{chronological, RatingTrajectory, TrajectoryIter, BASELINE_RATING};

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::models::{
    Match, Placement, PlacementResult, Player, PlayerId, PlayerRatingElement, PlayerSummary,
    Rating, WinLossRecord,
};

/// Calculate win rate as a rounded percentage. Zero games yields 0.
pub fn calculate_win_rate(wins: u32, losses: u32) -> u32 {
    WinLossRecord::new(wins, losses).win_rate_percent()
}

/// Per-player totals over the placements table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementTally {
    pub tournament_wins: u32,
    pub cpt_points: f64,
}

/// Single pass over all placements: count first places and sum CPT points.
pub fn tally_placements(placements: &[Placement]) -> HashMap<PlayerId, PlacementTally> {
    let mut tallies: HashMap<PlayerId, PlacementTally> = HashMap::new();

    for placement in placements {
        let tally = tallies.entry(placement.player_id.clone()).or_default();
        if placement.is_winner() {
            tally.tournament_wins += 1;
        }
        tally.cpt_points += placement.cpt_point;
    }

    tallies
}

/// Distinct event names in first-seen order.
pub fn event_list(placements: &[Placement]) -> Vec<String> {
    let mut seen = HashSet::new();
    placements
        .iter()
        .filter(|p| seen.insert(p.event.clone()))
        .map(|p| p.event.clone())
        .collect()
}

/// A player's placements in table order, each priced against `prizes`.
pub fn placement_history(
    player: &PlayerId,
    placements: &[Placement],
    prizes: &PrizeTable,
) -> Vec<PlacementResult> {
    placements
        .iter()
        .filter(|p| &p.player_id == player)
        .map(|p| PlacementResult {
            event: p.event.clone(),
            placement: p.placement,
            cpt_point: p.cpt_point,
            prize: prizes.prize_for(&p.event, p.placement),
        })
        .collect()
}

/// Ratings whose player is in the roster, in rank order with ranks
/// renumbered 1..N. Ratings without a roster entry are logged and left out.
pub fn rostered_ratings(ratings: &[Rating], players: &HashMap<PlayerId, Player>) -> Vec<Rating> {
    let mut kept: Vec<Rating> = ratings
        .iter()
        .filter(|rating| {
            let known = players.contains_key(&rating.player_id);
            if !known {
                warn!(
                    "Missing entity: rated player {} is not in the roster",
                    rating.player_id
                );
            }
            known
        })
        .cloned()
        .collect();

    kept.sort_by_key(|r| r.rank);
    for (i, rating) in kept.iter_mut().enumerate() {
        rating.rank = i as u32 + 1;
    }
    kept
}

/// Build the full ranking table, ordered by rank.
///
/// Ranks come from [`rostered_ratings`], so they stay contiguous when a
/// rated player is missing from the roster.
pub fn build_ranking(
    ratings: &[Rating],
    players: &HashMap<PlayerId, Player>,
    placements: &[Placement],
) -> Vec<PlayerRatingElement> {
    let tallies = tally_placements(placements);

    rostered_ratings(ratings, players)
        .into_iter()
        .filter_map(|rating| {
            let player = players.get(&rating.player_id)?;
            let tally = tallies.get(&rating.player_id).cloned().unwrap_or_default();

            Some(PlayerRatingElement {
                player_id: rating.player_id.clone(),
                rank: rating.rank,
                name: player.gamer_tag.clone(),
                country_code: player.country_code.clone(),
                rating: rating.rating,
                win_rate: rating.record.win_rate_percent(),
                game_count: rating.record.total_games(),
                win_count: rating.win_count(),
                cpt_point: tally.cpt_points,
                tournament_win_count: tally.tournament_wins,
            })
        })
        .collect()
}

/// Everything a player page joins over.
#[derive(Debug, Clone, Copy)]
pub struct PlayerTables<'a> {
    /// Indexed [`rostered_ratings`], so ranks match the ranking table
    pub ratings: &'a HashMap<PlayerId, Rating>,
    pub players: &'a HashMap<PlayerId, Player>,
    pub placements: &'a [Placement],
    /// Matches involving the player
    pub matches: &'a [Match],
    pub prizes: &'a PrizeTable,
}

/// Build the summary card of one player; `None` when the player has no
/// rating or roster entry.
pub fn player_summary(
    player_id: &PlayerId,
    tables: &PlayerTables<'_>,
    baseline: f64,
) -> Option<PlayerSummary> {
    let rating = tables.ratings.get(player_id)?;
    let player = tables.players.get(player_id)?;

    let trajectory = RatingTrajectory::new(player_id, tables.matches, baseline);
    let results = placement_history(player_id, tables.placements, tables.prizes);
    let total_prize = results.iter().map(|r| r.prize).sum();

    Some(PlayerSummary {
        player_id: player_id.clone(),
        gamer_tag: player.gamer_tag.clone(),
        country_code: player.country_code.clone(),
        birthday: player.birthday.clone(),
        characters: extract_characters(player_id, tables.matches).join(", "),
        rank: rating.rank,
        latest_rating: rating.rating,
        best_rating: trajectory.best(),
        worst_rating: trajectory.worst(),
        win_rate: rating.record.win_rate_percent(),
        win_count: rating.win_count(),
        lose_count: rating.lose_count(),
        results,
        total_prize,
    })
}
