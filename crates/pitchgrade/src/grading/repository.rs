use super::domain::{PlayerStatRecord, RosterEntry, TeamId};

/// Read-only access to current-season pitching lines, keyed by player name.
pub trait StatSource: Send + Sync {
    fn lookup(&self, player_name: &str) -> Result<Option<PlayerStatRecord>, LookupError>;
    fn search(&self, query: &str) -> Result<Vec<PlayerStatRecord>, LookupError>;
}

/// Stat source failure for a single request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("stats source unavailable: {0}")]
    Unavailable(String),
}

/// Roster membership owned by the persistence collaborator.
pub trait RosterRepository: Send + Sync {
    fn roster(&self, team_id: TeamId) -> Result<Vec<RosterEntry>, RosterError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("team {0} not found")]
    NotFound(TeamId),
    #[error("roster store unavailable: {0}")]
    Unavailable(String),
}
