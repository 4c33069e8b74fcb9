//! Pitcher grading, trade evaluation, and lineup recommendation.
//!
//! Profiles and the grading engine are pure and synchronous. The service layer
//! resolves rosters and season stat lines through the [`StatSource`] and
//! [`RosterRepository`] collaborators before handing them to the evaluator.

pub mod domain;
pub mod engine;
pub mod evaluation;
pub mod profiles;
pub mod repository;
pub mod router;
pub mod service;
pub mod stats_table;

#[cfg(test)]
mod tests;

pub use domain::{
    PitcherRole, PlayerStatRecord, RosterEntry, RosterSlot, StatKind, StatLookup, TeamId,
};
pub use engine::{Grade, GradingConfig, GradingEngine, GradingError, StatComponent, Tier};
pub use evaluation::{
    compare_sides, derive_profile_from_weaknesses, fairness_pct, CounterLineup, Evaluator,
    LineupEntry, LineupRecommendation, OpponentPitcher, OpponentSummary, OpponentWeaknessReport,
    TeamSide, TradeResult, TradeWinner,
};
pub use profiles::{
    Direction, NormalizationRule, ProfileError, ProfileKey, ProfileRegistry, ProfileSummary,
    ScoringProfile, NEUTRAL_SCORE,
};
pub use repository::{LookupError, RosterError, RosterRepository, StatSource};
pub use router::{grading_router, TradeRequest};
pub use service::{EvaluationError, GradingService, PitcherSearchHit};
pub use stats_table::{SeasonStatsTable, StatsTableError};
