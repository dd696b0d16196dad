//! Tournament placement model.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A player's final standing at one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub player_id: PlayerId,

    /// Event name
    pub event: String,

    /// Final placement (1 = winner)
    pub placement: u32,

    /// CPT points awarded for this placement
    pub cpt_point: f64,
}

impl Placement {
    pub fn new(player_id: PlayerId, event: String, placement: u32, cpt_point: f64) -> Self {
        Self {
            player_id,
            event,
            placement,
            cpt_point,
        }
    }

    /// Check if this is a tournament win (1st place).
    pub fn is_winner(&self) -> bool {
        self.placement == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_winner() {
        let placement = Placement::new(PlayerId::from("p1"), "EVO".to_string(), 1, 800.0);
        assert!(placement.is_winner());
    }

    #[test]
    fn test_placement_not_winner() {
        let placement = Placement::new(PlayerId::from("p1"), "EVO".to_string(), 2, 500.0);
        assert!(!placement.is_winner());
    }

    #[test]
    fn test_placement_serialization() {
        let placement = Placement::new(PlayerId::from("p1"), "EVO".to_string(), 5, 120.0);
        let json = serde_json::to_string(&placement).unwrap();
        let deserialized: Placement = serde_json::from_str(&json).unwrap();
        assert_eq!(placement, deserialized);
    }
}
