//! Per-player battle records.

use std::collections::HashMap;

use tracing::warn;

use super::characters::clean_chars;
use super::trajectory::chronological;
use crate::models::{BattleRecord, Match, Player, PlayerId, SetScore};

/// Build the battle records of `player_id`, most recent first.
///
/// Matches are replayed in chronological order so each record carries the
/// rating after that match. A match whose opponent is missing from the
/// roster still moves the running rating but produces no record.
pub fn battle_records(
    player_id: &PlayerId,
    matches: &[Match],
    players: &HashMap<PlayerId, Player>,
    baseline: f64,
) -> Vec<BattleRecord> {
    let mut running = baseline;
    let mut records = Vec::new();

    for m in chronological(matches) {
        let Some(side) = m.side_of(player_id) else {
            continue;
        };

        let signed_delta = m.rate_diff.for_side(side);
        running += signed_delta;

        let opponent_side = side.opponent();
        let opponent_id = m.player(opponent_side);
        let Some(opponent) = players.get(opponent_id) else {
            warn!(
                "Missing entity: opponent {} of {} at {} is not in the roster",
                opponent_id, player_id, m.event
            );
            continue;
        };

        let is_win = side.is_winner();
        records.push(BattleRecord {
            date: m.datetime,
            event: m.event.clone(),
            bracket: m.bracket.clone(),
            round: m.round.clone(),
            is_win,
            win_set_count: SetScore::resolve(m.score(side), is_win),
            lose_set_count: SetScore::resolve(m.score(opponent_side), !is_win),
            opponent_tag: opponent.gamer_tag.clone(),
            opponent_id: opponent_id.clone(),
            opponent_chars: clean_chars(m.chars(opponent_side)).join(", "),
            running_rating: running,
            rating_delta: m.rate_diff.magnitude(),
            signed_delta,
        });
    }

    records.reverse();
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::match_at;
    use pretty_assertions::assert_eq;

    fn roster(ids: &[&str]) -> HashMap<PlayerId, Player> {
        ids.iter()
            .map(|id| {
                (
                    PlayerId::from(*id),
                    Player::new(PlayerId::from(*id), format!("Tag-{}", id), "jp".to_string()),
                )
            })
            .collect()
    }

    #[test]
    fn test_records_are_most_recent_first() {
        let matches = vec![match_at(0, "p", "x", 10.0), match_at(5, "y", "p", 5.0)];
        let records = battle_records(&PlayerId::from("p"), &matches, &roster(&["p", "x", "y"]), 1500.0);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].opponent_tag, "Tag-y");
        assert!(!records[0].is_win);
        assert_eq!(records[0].running_rating, 1505.0);
        assert_eq!(records[0].rating_delta, 5.0);
        assert_eq!(records[0].signed_delta, -5.0);

        assert_eq!(records[1].opponent_id, PlayerId::from("x"));
        assert!(records[1].is_win);
        assert_eq!(records[1].running_rating, 1510.0);
    }

    #[test]
    fn test_set_counts_from_player_perspective() {
        let mut m = match_at(0, "x", "p", 9.0);
        m.player1_score = "3".to_string();
        m.player2_score = "1".to_string();
        let records = battle_records(&PlayerId::from("p"), &[m], &roster(&["p", "x"]), 1500.0);

        assert_eq!(records[0].win_set_count.as_str(), "1");
        assert_eq!(records[0].lose_set_count.as_str(), "3");
    }

    #[test]
    fn test_walkover_scores_become_markers() {
        let mut m = match_at(0, "p", "x", 4.0);
        m.player1_score = "W".to_string();
        m.player2_score = "L (DQ/FF)".to_string();
        let players = roster(&["p", "x"]);

        let won = battle_records(&PlayerId::from("p"), std::slice::from_ref(&m), &players, 1500.0);
        assert_eq!(won[0].win_set_count.as_str(), "W");
        assert_eq!(won[0].lose_set_count.as_str(), "L");

        let lost = battle_records(&PlayerId::from("x"), std::slice::from_ref(&m), &players, 1500.0);
        assert_eq!(lost[0].win_set_count.as_str(), "L");
        assert_eq!(lost[0].lose_set_count.as_str(), "W");
    }

    #[test]
    fn test_missing_opponent_skips_record_but_keeps_rating() {
        let matches = vec![match_at(0, "p", "ghost", 10.0), match_at(1, "p", "x", 2.0)];
        let records = battle_records(&PlayerId::from("p"), &matches, &roster(&["p", "x"]), 1500.0);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].running_rating, 1512.0);
    }

    #[test]
    fn test_opponent_chars_cleaned() {
        let mut m = match_at(0, "p", "x", 1.0);
        m.player2_chars = "Ken,  Ken, Luke ".to_string();
        let records = battle_records(&PlayerId::from("p"), &[m], &roster(&["p", "x"]), 1500.0);
        assert_eq!(records[0].opponent_chars, "Ken, Luke");
    }

    #[test]
    fn test_rederiving_is_stable() {
        let matches = vec![
            match_at(3, "p", "x", 10.0),
            match_at(1, "x", "p", 7.0),
            match_at(2, "p", "y", 3.0),
        ];
        let players = roster(&["p", "x", "y"]);
        let first = battle_records(&PlayerId::from("p"), &matches, &players, 1500.0);
        let second = battle_records(&PlayerId::from("p"), &matches, &players, 1500.0);
        assert_eq!(first, second);
    }
}
