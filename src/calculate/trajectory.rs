//! Rating trajectory replay.
//!
//! Ratings are computed upstream; each match only records the magnitude of
//! the change. A player's history is rebuilt by replaying those deltas in
//! chronological order from a fixed baseline.

use crate::models::{Match, PlayerId};

/// Starting rating of every player.
pub const BASELINE_RATING: f64 = 1500.0;

/// Matches sorted ascending by time, undated matches last. The sort is
/// stable, so matches sharing a timestamp (or lacking one) keep their table
/// order.
pub fn chronological(matches: &[Match]) -> Vec<&Match> {
    let mut sorted: Vec<&Match> = matches.iter().collect();
    sorted.sort_by_key(|m| (m.datetime.is_none(), m.datetime));
    sorted
}

/// A player's replayed rating history.
#[derive(Debug, Clone)]
pub struct RatingTrajectory<'a> {
    player_id: &'a PlayerId,
    matches: Vec<&'a Match>,
    baseline: f64,
}

impl<'a> RatingTrajectory<'a> {
    pub fn new(player_id: &'a PlayerId, matches: &'a [Match], baseline: f64) -> Self {
        Self {
            player_id,
            matches: chronological(matches),
            baseline,
        }
    }

    /// Iterate the rating points: the baseline, then one point per match.
    pub fn iter(&self) -> TrajectoryIter<'_> {
        TrajectoryIter {
            player_id: self.player_id,
            matches: self.matches.iter(),
            current: self.baseline,
            started: false,
        }
    }

    /// Matches in replay order.
    pub fn matches(&self) -> &[&'a Match] {
        &self.matches
    }

    pub fn points(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Number of points (match count + 1).
    pub fn point_count(&self) -> usize {
        self.matches.len() + 1
    }

    pub fn latest(&self) -> f64 {
        self.iter().last().unwrap_or(self.baseline)
    }

    pub fn best(&self) -> f64 {
        self.iter().fold(f64::MIN, f64::max)
    }

    pub fn worst(&self) -> f64 {
        self.iter().fold(f64::MAX, f64::min)
    }
}

impl<'t, 'a> IntoIterator for &'t RatingTrajectory<'a> {
    type Item = f64;
    type IntoIter = TrajectoryIter<'t>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over a trajectory. Cloning it restarts from the same point.
#[derive(Debug, Clone)]
pub struct TrajectoryIter<'t> {
    player_id: &'t PlayerId,
    matches: std::slice::Iter<'t, &'t Match>,
    current: f64,
    started: bool,
}

impl Iterator for TrajectoryIter<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if !self.started {
            self.started = true;
            return Some(self.current);
        }
        let m = self.matches.next()?;
        // A match the player is not part of leaves the rating unchanged
        self.current += m.delta_for(self.player_id);
        Some(self.current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.matches.len() + usize::from(!self.started);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TrajectoryIter<'_> {}
