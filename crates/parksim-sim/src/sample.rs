//! ---
//! park_section: "11-simulation-test-harness"
//! park_subsection: "module"
//! park_type: "source"
//! park_scope: "code"
//! park_description: "Sample synthesis module exports and shared types."
//! park_version: "v0.1.0"
//! park_owner: "tbd"
//! ---
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One synthesized occupancy reading, consumed by a single update request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotSample {
    pub slot_id: u32,
    pub occupied: bool,
    pub last_updated: DateTime<Utc>,
}

impl SlotSample {
    pub fn new(slot_id: u32, occupied: bool) -> Self {
        Self {
            slot_id,
            occupied,
            last_updated: Utc::now(),
        }
    }

    /// Human-readable occupancy word used in per-tick log lines.
    pub fn state_word(&self) -> &'static str {
        if self.occupied {
            "occupied"
        } else {
            "free"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_word_matches_occupancy() {
        assert_eq!(SlotSample::new(1, true).state_word(), "occupied");
        assert_eq!(SlotSample::new(1, false).state_word(), "free");
    }

    #[test]
    fn sample_serialises_rfc3339_timestamp() {
        let sample = SlotSample::new(3, true);
        let value = serde_json::to_value(&sample).unwrap();
        assert_eq!(value["slot_id"], 3);
        assert_eq!(value["occupied"], true);
        let timestamp = value["last_updated"].as_str().unwrap();
        assert!(timestamp.contains('T'));
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
    }
}
