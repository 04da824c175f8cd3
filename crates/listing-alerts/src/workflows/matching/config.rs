use serde::{Deserialize, Serialize};

pub const DEFAULT_MATCH_THRESHOLD: u8 = 80;

/// Scoring weights and the notification threshold applied by the match engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub threshold: u8,
    pub base_score: i32,
    pub room_shortfall_penalty: i32,
    pub area_shortfall_penalty: i32,
    pub energy_label_penalty: i32,
    pub outdoor_space_bonus: i32,
}

impl MatchConfig {
    pub fn with_threshold(threshold: u8) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
            base_score: 100,
            room_shortfall_penalty: 20,
            area_shortfall_penalty: 20,
            energy_label_penalty: 10,
            outdoor_space_bonus: 5,
        }
    }
}
