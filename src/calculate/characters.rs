//! Character usage extraction.

use std::collections::HashSet;

use crate::models::{Match, PlayerId};

/// Placeholder written by the exporter when no character was recorded.
const NOT_AVAILABLE: &str = "N/A";

/// Split a comma-separated character field into trimmed, distinct names.
pub fn clean_chars(field: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    field
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != NOT_AVAILABLE)
        .filter(|c| seen.insert(c.to_string()))
        .map(str::to_string)
        .collect()
}

/// Characters `player` used across `matches`, distinct, in first-seen order.
pub fn extract_characters(player: &PlayerId, matches: &[Match]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut chars = Vec::new();

    for m in matches {
        let Some(side) = m.side_of(player) else {
            continue;
        };
        for c in clean_chars(m.chars(side)) {
            if seen.insert(c.clone()) {
                chars.push(c);
            }
        }
    }

    chars
}
