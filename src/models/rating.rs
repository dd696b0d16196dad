//! Pre-computed player rating rows.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Win/loss record as exported alongside a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WinLossRecord {
    pub wins: u32,
    pub losses: u32,
}

impl WinLossRecord {
    /// Create a new record.
    pub fn new(wins: u32, losses: u32) -> Self {
        Self { wins, losses }
    }

    /// Total games played.
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses
    }

    /// Win rate as a rounded percentage (0 to 100).
    ///
    /// A player with no recorded games reports 0.
    pub fn win_rate_percent(&self) -> u32 {
        let total = self.total_games();
        if total == 0 {
            0
        } else {
            (self.wins as f64 / total as f64 * 100.0).round() as u32
        }
    }
}

/// One row of the ratings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub player_id: PlayerId,

    /// 1-based position in the ratings table (the table is sorted upstream)
    pub rank: u32,

    pub rating: f64,

    pub record: WinLossRecord,
}

impl Rating {
    pub fn new(player_id: PlayerId, rank: u32, rating: f64, wins: u32, losses: u32) -> Self {
        Self {
            player_id,
            rank,
            rating,
            record: WinLossRecord::new(wins, losses),
        }
    }

    pub fn win_count(&self) -> u32 {
        self.record.wins
    }

    pub fn lose_count(&self) -> u32 {
        self.record.losses
    }
}
