mod lineup;
mod opponent;
mod trade;
pub mod views;

pub use opponent::{derive_profile_from_weaknesses, COUNTER_BOOST, WEAK_STAT_THRESHOLD};
pub use trade::{compare_sides, fairness_pct, MAX_POSSIBLE_DIFF, TARGET_FAIRNESS_PCT};
pub use views::{
    CounterLineup, LineupEntry, LineupRecommendation, OpponentPitcher, OpponentSummary,
    OpponentWeaknessReport, TeamSide, TradeResult, TradeWinner,
};

use std::sync::Arc;

use super::domain::{RosterSlot, TeamId};
use super::engine::{Grade, GradingConfig, GradingEngine};
use super::profiles::{ProfileKey, ProfileRegistry, ScoringProfile};

/// Pure orchestration over already-resolved roster slots. Every entry point
/// is a function of its inputs; no state survives between calls.
#[derive(Debug, Clone)]
pub struct Evaluator {
    engine: GradingEngine,
    registry: Arc<ProfileRegistry>,
}

impl Evaluator {
    pub fn new(config: GradingConfig, registry: Arc<ProfileRegistry>) -> Self {
        Self {
            engine: GradingEngine::new(config),
            registry,
        }
    }

    pub fn engine(&self) -> &GradingEngine {
        &self.engine
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    /// Grades each slot in roster order.
    pub fn grade_roster(&self, roster: &[RosterSlot], profile_key: Option<&str>) -> Vec<Grade> {
        let profile = self.registry.resolve_or_standard(profile_key);
        roster
            .iter()
            .map(|slot| self.engine.grade_slot(slot, profile))
            .collect()
    }

    pub fn recommend_lineup(
        &self,
        roster: &[RosterSlot],
        profile_key: Option<&str>,
    ) -> LineupRecommendation {
        let profile = self.registry.resolve_or_standard(profile_key);
        lineup::build_lineup(&self.engine, roster, profile)
    }

    pub fn evaluate_trade(
        &self,
        side_a: &[RosterSlot],
        side_b: &[RosterSlot],
        profile_key: Option<&str>,
    ) -> TradeResult {
        let profile = self.registry.resolve_or_standard(profile_key);
        trade::evaluate_trade(&self.engine, side_a, side_b, profile)
    }

    /// Weakness analysis always grades under the standard profile.
    pub fn analyze_opponent(
        &self,
        opponent_team_id: TeamId,
        roster: &[RosterSlot],
    ) -> OpponentWeaknessReport {
        opponent::analyze_opponent(
            &self.engine,
            self.registry.standard_profile(),
            opponent_team_id,
            roster,
        )
    }

    /// Ranks `roster` to exploit the opponent. Without an explicit profile, or
    /// with the `counter` key, the ranking uses a profile derived from the
    /// opponent's weakness vector.
    pub fn counter_lineup(
        &self,
        opponent_team_id: TeamId,
        opponent_roster: &[RosterSlot],
        roster: &[RosterSlot],
        profile_key: Option<&str>,
    ) -> CounterLineup {
        let report = self.analyze_opponent(opponent_team_id, opponent_roster);
        let staff = opponent::summarize_staff(opponent_roster);

        let derived: ScoringProfile;
        let explicit = profile_key.map(str::trim).filter(|key| {
            !key.is_empty() && !key.eq_ignore_ascii_case(ProfileKey::Counter.as_str())
        });
        let profile = match explicit {
            Some(key) => self.registry.resolve_or_standard(Some(key)),
            None => {
                derived =
                    derive_profile_from_weaknesses(&report, self.registry.standard_profile());
                &derived
            }
        };

        let recommendation = lineup::build_lineup(&self.engine, roster, profile);
        let explanation = format!(
            "Counter-strategy analysis:\n\nOpponent weaknesses identified:\n{}\n\n\
             Recommended strategy: {}\n\n{}\n\n\
             This lineup is built to exploit the opponent's vulnerabilities.",
            staff.summary,
            profile.key.as_str().to_uppercase(),
            recommendation.explanation
        );

        CounterLineup {
            lineup: recommendation.lineup,
            explanation,
            strategy: profile.key,
            opponent_weaknesses: staff,
        }
    }
}
