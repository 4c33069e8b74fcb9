use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{RosterEntry, RosterSlot, StatLookup, TeamId};
use super::engine::{Grade, GradingConfig};
use super::evaluation::{
    CounterLineup, Evaluator, LineupRecommendation, OpponentWeaknessReport, TradeResult,
};
use super::profiles::{ProfileRegistry, ProfileSummary};
use super::repository::{LookupError, RosterError, RosterRepository, StatSource};

/// Service resolving rosters and stat lines before handing them to the evaluator.
pub struct GradingService<S, R> {
    stats: Arc<S>,
    rosters: Arc<R>,
    evaluator: Arc<Evaluator>,
}

/// Row returned by the pitcher search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitcherSearchHit {
    pub player_name: String,
    pub external_id: Option<String>,
    pub role: String,
}

impl<S, R> GradingService<S, R>
where
    S: StatSource + 'static,
    R: RosterRepository + 'static,
{
    pub fn new(stats: Arc<S>, rosters: Arc<R>, config: GradingConfig) -> Self {
        Self::with_registry(stats, rosters, config, Arc::new(ProfileRegistry::standard()))
    }

    pub fn with_registry(
        stats: Arc<S>,
        rosters: Arc<R>,
        config: GradingConfig,
        registry: Arc<ProfileRegistry>,
    ) -> Self {
        Self {
            stats,
            rosters,
            evaluator: Arc::new(Evaluator::new(config, registry)),
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn profiles(&self) -> Vec<ProfileSummary> {
        self.evaluator.registry().list_profiles()
    }

    /// Rank a stored team's pitchers under the requested profile.
    pub fn recommend_lineup(
        &self,
        team_id: TeamId,
        profile: Option<&str>,
    ) -> Result<LineupRecommendation, EvaluationError> {
        let entries = self.rosters.roster(team_id)?;
        let mut resolver = SlotResolver::new(self.stats.as_ref());
        let slots = resolver.resolve(&entries);
        resolver.ensure_reachable(self.profile_key(profile))?;

        info!(team = %team_id, profile = self.profile_key(profile), roster_size = slots.len(), "recommending lineup");
        Ok(self.evaluator.recommend_lineup(&slots, profile))
    }

    /// Grade a stored team's pitchers in roster order.
    pub fn team_grades(
        &self,
        team_id: TeamId,
        profile: Option<&str>,
    ) -> Result<Vec<Grade>, EvaluationError> {
        let entries = self.rosters.roster(team_id)?;
        let mut resolver = SlotResolver::new(self.stats.as_ref());
        let slots = resolver.resolve(&entries);
        resolver.ensure_reachable(self.profile_key(profile))?;

        info!(team = %team_id, profile = self.profile_key(profile), roster_size = slots.len(), "grading roster");
        Ok(self.evaluator.grade_roster(&slots, profile))
    }

    /// Grade ad-hoc player names in the order given.
    pub fn grade_players(
        &self,
        names: &[String],
        profile: Option<&str>,
    ) -> Result<Vec<Grade>, EvaluationError> {
        let mut resolver = SlotResolver::new(self.stats.as_ref());
        let slots = resolver.resolve(&entries_from_names(names));
        resolver.ensure_reachable(self.profile_key(profile))?;

        info!(profile = self.profile_key(profile), players = slots.len(), "grading players");
        Ok(self.evaluator.grade_roster(&slots, profile))
    }

    /// Compare two ad-hoc lists of player names. Each distinct name is looked
    /// up once even when it appears on both sides.
    pub fn evaluate_trade(
        &self,
        side_a: &[String],
        side_b: &[String],
        profile: Option<&str>,
    ) -> Result<TradeResult, EvaluationError> {
        let mut resolver = SlotResolver::new(self.stats.as_ref());
        let slots_a = resolver.resolve(&entries_from_names(side_a));
        let slots_b = resolver.resolve(&entries_from_names(side_b));
        resolver.ensure_reachable(self.profile_key(profile))?;

        info!(
            profile = self.profile_key(profile),
            side_a = slots_a.len(),
            side_b = slots_b.len(),
            "evaluating trade"
        );
        Ok(self.evaluator.evaluate_trade(&slots_a, &slots_b, profile))
    }

    pub fn analyze_opponent(
        &self,
        opponent_team_id: TeamId,
    ) -> Result<OpponentWeaknessReport, EvaluationError> {
        let entries = self.rosters.roster(opponent_team_id)?;
        let mut resolver = SlotResolver::new(self.stats.as_ref());
        let slots = resolver.resolve(&entries);
        resolver.ensure_reachable(self.profile_key(None))?;

        info!(opponent = %opponent_team_id, roster_size = slots.len(), "analyzing opponent");
        Ok(self.evaluator.analyze_opponent(opponent_team_id, &slots))
    }

    pub fn counter_lineup(
        &self,
        opponent_team_id: TeamId,
        team_id: TeamId,
        profile: Option<&str>,
    ) -> Result<CounterLineup, EvaluationError> {
        let opponent_entries = self.rosters.roster(opponent_team_id)?;
        let entries = self.rosters.roster(team_id)?;

        let mut resolver = SlotResolver::new(self.stats.as_ref());
        let opponent_slots = resolver.resolve(&opponent_entries);
        let slots = resolver.resolve(&entries);
        let attempted = profile.unwrap_or("counter");
        resolver.ensure_reachable(attempted)?;

        info!(
            opponent = %opponent_team_id,
            team = %team_id,
            profile = attempted,
            roster_size = slots.len(),
            "building counter lineup"
        );
        Ok(self
            .evaluator
            .counter_lineup(opponent_team_id, &opponent_slots, &slots, profile))
    }

    pub fn search(&self, query: &str) -> Result<Vec<PitcherSearchHit>, EvaluationError> {
        let records = self.stats.search(query)?;
        Ok(records
            .into_iter()
            .map(|record| PitcherSearchHit {
                player_name: record.name,
                external_id: record.external_id,
                role: record.role.position().to_string(),
            })
            .collect())
    }

    fn profile_key(&self, profile: Option<&str>) -> &'static str {
        self.evaluator.registry().resolve_or_standard(profile).key.as_str()
    }
}

fn entries_from_names(names: &[String]) -> Vec<RosterEntry> {
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(|name| RosterEntry::new(name, None))
        .collect()
}

/// Per-request lookup cache. Tracks how many distinct lookups failed so the
/// caller can tell a partial outage from a total one.
struct SlotResolver<'a, S: ?Sized> {
    stats: &'a S,
    cache: HashMap<String, StatLookup>,
    players: usize,
    failures: usize,
    last_failure: Option<LookupError>,
}

impl<'a, S> SlotResolver<'a, S>
where
    S: StatSource + ?Sized,
{
    fn new(stats: &'a S) -> Self {
        Self {
            stats,
            cache: HashMap::new(),
            players: 0,
            failures: 0,
            last_failure: None,
        }
    }

    fn resolve(&mut self, entries: &[RosterEntry]) -> Vec<RosterSlot> {
        entries
            .iter()
            .map(|entry| {
                self.players += 1;
                let stats = self.lookup(&entry.player_name);
                if matches!(stats, StatLookup::Failed(_)) {
                    self.failures += 1;
                }
                RosterSlot {
                    player_name: entry.player_name.clone(),
                    position: entry.position.clone(),
                    stats,
                }
            })
            .collect()
    }

    fn lookup(&mut self, player_name: &str) -> StatLookup {
        let key = player_name.trim().to_lowercase();
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let outcome = match self.stats.lookup(player_name) {
            Ok(Some(record)) => StatLookup::Found(record),
            Ok(None) => StatLookup::Missing,
            Err(err) => {
                warn!(player = player_name, %err, "stat lookup failed");
                let reason = err.to_string();
                self.last_failure = Some(err);
                StatLookup::Failed(reason)
            }
        };
        self.cache.insert(key, outcome.clone());
        outcome
    }

    /// Errors only when every player in the request failed lookup.
    fn ensure_reachable(&self, profile: &str) -> Result<(), EvaluationError> {
        if self.players == 0 || self.failures < self.players {
            return Ok(());
        }
        let reason = self
            .last_failure
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "stats source unavailable".to_string());
        Err(EvaluationError::Upstream {
            profile: profile.to_string(),
            roster_size: self.players,
            reason,
        })
    }
}

/// Error raised by the grading service.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("stats lookup failed for all {roster_size} players (profile {profile}): {reason}")]
    Upstream {
        profile: String,
        roster_size: usize,
        reason: String,
    },
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl EvaluationError {
    /// Whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EvaluationError::Upstream { .. } | EvaluationError::Lookup(_)
        )
    }
}
