use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::grading::domain::{
    PitcherRole, PlayerStatRecord, RosterEntry, RosterSlot, StatKind, TeamId,
};
use crate::grading::engine::{Grade, GradingConfig};
use crate::grading::evaluation::Evaluator;
use crate::grading::profiles::ProfileRegistry;
use crate::grading::repository::{LookupError, RosterError, RosterRepository, StatSource};
use crate::grading::service::GradingService;
use crate::grading::stats_table::SeasonStatsTable;
use crate::grading::grading_router;

pub(super) const MY_TEAM: TeamId = TeamId(1);
pub(super) const OPPONENT: TeamId = TeamId(2);
pub(super) const EMPTY_TEAM: TeamId = TeamId(3);

pub(super) fn starter(
    name: &str,
    era: f64,
    whip: f64,
    k_pct: f64,
    bb_pct: f64,
    innings: f64,
    k_per_9: f64,
) -> PlayerStatRecord {
    PlayerStatRecord::new(name, PitcherRole::Starter)
        .with(StatKind::Era, era)
        .with(StatKind::Whip, whip)
        .with(StatKind::StrikeoutRate, k_pct)
        .with(StatKind::WalkRate, bb_pct)
        .with(StatKind::InningsPitched, innings)
        .with(StatKind::StrikeoutsPerNine, k_per_9)
}

/// Five clearly separated stat lines. Standard order: Ace, Stone, Whiff, Mays, Reyes.
pub(super) fn staff() -> Vec<PlayerStatRecord> {
    vec![
        starter("Whiff Walker", 4.30, 1.34, 0.34, 0.095, 150.0, 13.0),
        starter("Middling Mays", 4.20, 1.30, 0.21, 0.085, 120.0, 7.8),
        starter("Ace Alvarez", 2.50, 0.98, 0.24, 0.055, 190.0, 8.9),
        starter("Rough Reyes", 5.60, 1.55, 0.17, 0.110, 60.0, 6.0),
        starter("Steady Stone", 3.40, 1.15, 0.23, 0.070, 170.0, 8.4),
    ]
}

/// Opponent staff: one pitcher with a very high walk rate, one unremarkable arm.
pub(super) fn opponent_staff() -> Vec<PlayerStatRecord> {
    vec![
        starter("Wild Wally", 3.90, 1.35, 0.20, 0.150, 120.0, 7.9),
        starter("Contact Carl", 3.40, 1.20, 0.20, 0.060, 150.0, 7.5),
    ]
}

pub(super) fn slots(records: Vec<PlayerStatRecord>) -> Vec<RosterSlot> {
    records.into_iter().map(RosterSlot::from).collect()
}

pub(super) fn evaluator() -> Evaluator {
    evaluator_with(GradingConfig::default())
}

pub(super) fn evaluator_with(config: GradingConfig) -> Evaluator {
    Evaluator::new(config, Arc::new(ProfileRegistry::standard()))
}

pub(super) fn graded(name: &str, score: f64) -> Grade {
    let mut grade = Grade::neutral(name, "SP", "synthetic".to_string());
    grade.score = score;
    grade
}

pub(super) fn stats_table() -> SeasonStatsTable {
    let mut records = staff();
    records.extend(opponent_staff());
    SeasonStatsTable::from_records(records)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRosters {
    pub(super) teams: Arc<Mutex<HashMap<TeamId, Vec<RosterEntry>>>>,
}

impl MemoryRosters {
    pub(super) fn seeded() -> Self {
        let rosters = Self::default();
        {
            let mut guard = rosters.teams.lock().expect("roster mutex poisoned");
            guard.insert(
                MY_TEAM,
                staff()
                    .iter()
                    .map(|record| RosterEntry::new(record.name.clone(), Some("SP")))
                    .collect(),
            );
            guard.insert(
                OPPONENT,
                opponent_staff()
                    .iter()
                    .map(|record| RosterEntry::new(record.name.clone(), None))
                    .collect(),
            );
            guard.insert(EMPTY_TEAM, Vec::new());
        }
        rosters
    }
}

impl RosterRepository for MemoryRosters {
    fn roster(&self, team_id: TeamId) -> Result<Vec<RosterEntry>, RosterError> {
        let guard = self.teams.lock().expect("roster mutex poisoned");
        guard
            .get(&team_id)
            .cloned()
            .ok_or(RosterError::NotFound(team_id))
    }
}

/// Stat source wrapper counting lookups to verify per-request batching.
pub(super) struct CountingStats {
    inner: SeasonStatsTable,
    pub(super) lookups: AtomicUsize,
}

impl CountingStats {
    pub(super) fn new(inner: SeasonStatsTable) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    pub(super) fn count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl StatSource for CountingStats {
    fn lookup(&self, player_name: &str) -> Result<Option<PlayerStatRecord>, LookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(player_name)
    }

    fn search(&self, query: &str) -> Result<Vec<PlayerStatRecord>, LookupError> {
        self.inner.search(query)
    }
}

pub(super) struct OfflineStats;

impl StatSource for OfflineStats {
    fn lookup(&self, _player_name: &str) -> Result<Option<PlayerStatRecord>, LookupError> {
        Err(LookupError::Unavailable("leaderboard offline".to_string()))
    }

    fn search(&self, _query: &str) -> Result<Vec<PlayerStatRecord>, LookupError> {
        Err(LookupError::Unavailable("leaderboard offline".to_string()))
    }
}

/// Fails lookups for the listed names only.
pub(super) struct FlakyStats {
    inner: SeasonStatsTable,
    failing: Vec<String>,
}

impl FlakyStats {
    pub(super) fn new(inner: SeasonStatsTable, failing: &[&str]) -> Self {
        Self {
            inner,
            failing: failing.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl StatSource for FlakyStats {
    fn lookup(&self, player_name: &str) -> Result<Option<PlayerStatRecord>, LookupError> {
        if self.failing.iter().any(|name| name == player_name) {
            return Err(LookupError::Unavailable("timeout".to_string()));
        }
        self.inner.lookup(player_name)
    }

    fn search(&self, query: &str) -> Result<Vec<PlayerStatRecord>, LookupError> {
        self.inner.search(query)
    }
}

pub(super) fn build_service() -> GradingService<SeasonStatsTable, MemoryRosters> {
    GradingService::new(
        Arc::new(stats_table()),
        Arc::new(MemoryRosters::seeded()),
        GradingConfig::default(),
    )
}

pub(super) fn router_with_service<S, R>(service: GradingService<S, R>) -> axum::Router
where
    S: StatSource + 'static,
    R: RosterRepository + 'static,
{
    grading_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn names(lineup: &[crate::grading::evaluation::LineupEntry]) -> Vec<&str> {
    lineup.iter().map(|entry| entry.name.as_str()).collect()
}
