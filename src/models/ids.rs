//! Player identifiers as they appear in the exported tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A player identifier, shared by every table as the join key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a new PlayerId from the raw table value.
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for PlayerId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_display() {
        let id = PlayerId::new("1234567".to_string());
        assert_eq!(format!("{}", id), "1234567");
    }

    #[test]
    fn test_player_id_debug() {
        let id = PlayerId::from("42");
        assert_eq!(format!("{:?}", id), "PlayerId(42)");
    }

    #[test]
    fn test_player_id_serializes_as_plain_string() {
        let id = PlayerId::from("98765");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"98765\"");

        let parsed: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_player_id_str_equality() {
        let id = PlayerId::from("abc");
        assert!(id == *"abc");
        assert!(id != *"abd");
    }
}
