use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{round2, StatKind, TeamId};
use super::super::engine::Grade;
use super::super::profiles::ProfileKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupEntry {
    pub rank: usize,
    pub name: String,
    pub position: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupRecommendation {
    pub lineup: Vec<LineupEntry>,
    pub explanation: String,
}

/// One side of a trade. The total is computed once from `players` at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSide {
    players: Vec<Grade>,
    total_grade: f64,
}

impl TeamSide {
    pub fn new(players: Vec<Grade>) -> Self {
        let total_grade = mean_grade(&players);
        Self {
            players,
            total_grade,
        }
    }

    pub fn players(&self) -> &[Grade] {
        &self.players
    }

    /// Arithmetic mean of the players' scores; an empty side totals 0.
    pub fn total_grade(&self) -> f64 {
        self.total_grade
    }
}

pub(crate) fn mean_grade(players: &[Grade]) -> f64 {
    if players.is_empty() {
        return 0.0;
    }
    round2(players.iter().map(|grade| grade.score).sum::<f64>() / players.len() as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeWinner {
    SideA,
    SideB,
    Even,
}

impl TradeWinner {
    pub const fn label(self) -> &'static str {
        match self {
            TradeWinner::SideA => "Side A",
            TradeWinner::SideB => "Side B",
            TradeWinner::Even => "Even",
        }
    }

    pub const fn swapped(self) -> Self {
        match self {
            TradeWinner::SideA => TradeWinner::SideB,
            TradeWinner::SideB => TradeWinner::SideA,
            TradeWinner::Even => TradeWinner::Even,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeResult {
    #[serde(rename = "sideA")]
    pub side_a: TeamSide,
    #[serde(rename = "sideB")]
    pub side_b: TeamSide,
    pub diff: f64,
    pub winner: TradeWinner,
    pub fairness_pct: f64,
    pub suggestion: String,
    pub profile: ProfileKey,
    pub profile_explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentPitcher {
    pub player_name: String,
    pub position: String,
    pub grade: f64,
    pub weaknesses: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpponentWeaknessReport {
    pub opponent_team_id: TeamId,
    pub average_grade: f64,
    pub pitchers: Vec<OpponentPitcher>,
    /// Mean normalized score per stat dimension across the opponent's stat lines.
    #[serde(skip)]
    pub dimension_scores: BTreeMap<StatKind, f64>,
}

/// Staff-level summary carried on counter-lineup responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentSummary {
    pub summary: String,
    pub avg_k: f64,
    pub avg_era: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterLineup {
    pub lineup: Vec<LineupEntry>,
    pub explanation: String,
    pub strategy: ProfileKey,
    pub opponent_weaknesses: OpponentSummary,
}
