use serde::{Deserialize, Serialize};

/// Tunables shared by the grading engine and the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Season label used in "no stats found" notes.
    pub season: i32,
    /// Number of starters returned by lineup recommendations.
    pub lineup_size: usize,
    /// Grade-point band inside which a trade is called even.
    pub even_tolerance: f64,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            season: 2025,
            lineup_size: 5,
            even_tolerance: 0.5,
        }
    }
}
