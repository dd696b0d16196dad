//! Prize money lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Event name → placement → prize amount.
///
/// Loaded from JSON where placements are object keys, e.g.
/// `{"EVO 2025": {"1": 50000, "2": 20000}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrizeTable(HashMap<String, HashMap<String, f64>>);

impl PrizeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builder method to add one prize entry.
    pub fn with_prize(mut self, event: &str, placement: u32, amount: f64) -> Self {
        self.0
            .entry(event.to_string())
            .or_default()
            .insert(placement.to_string(), amount);
        self
    }

    /// Prize for `placement` at `event`; zero when either key is absent.
    pub fn prize_for(&self, event: &str, placement: u32) -> f64 {
        self.0
            .get(event)
            .and_then(|by_place| by_place.get(&placement.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
