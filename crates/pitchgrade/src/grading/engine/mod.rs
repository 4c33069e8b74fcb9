mod analysis;
mod config;
mod rules;

pub use analysis::Tier;
pub use config::GradingConfig;

pub(crate) use analysis::standout;

use super::domain::{round2, PlayerStatRecord, RosterSlot, StatKind, StatLookup};
use super::profiles::{ScoringProfile, NEUTRAL_SCORE};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One weighted dimension of a grade, kept for audits and explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatComponent {
    pub kind: StatKind,
    pub raw: Option<f64>,
    pub normalized: f64,
    pub weight: f64,
}

/// Per-player grade under one profile. Serialized as the roster-grade row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub player_name: String,
    pub position: String,
    #[serde(rename = "grade")]
    pub score: f64,
    pub analysis: String,
    #[serde(skip)]
    pub components: Vec<StatComponent>,
}

impl Grade {
    pub fn neutral(
        player_name: impl Into<String>,
        position: impl Into<String>,
        note: String,
    ) -> Self {
        Self {
            player_name: player_name.into(),
            position: position.into(),
            score: NEUTRAL_SCORE,
            analysis: note,
            components: Vec::new(),
        }
    }

    pub fn tier(&self) -> Tier {
        Tier::for_score(self.score)
    }

    pub fn component(&self, kind: StatKind) -> Option<&StatComponent> {
        self.components.iter().find(|component| component.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GradingError {
    #[error("no weighted stats available for {player} under the {profile} profile")]
    InsufficientData { player: String, profile: String },
}

/// Stateless grader turning one stat line and one profile into a `Grade`.
#[derive(Debug, Clone)]
pub struct GradingEngine {
    config: GradingConfig,
}

impl GradingEngine {
    pub fn new(config: GradingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    pub fn try_grade(
        &self,
        record: &PlayerStatRecord,
        profile: &ScoringProfile,
    ) -> Result<Grade, GradingError> {
        let breakdown = rules::score_record(record, profile)?;
        let score = round2(breakdown.score);
        let analysis = analysis::compose_analysis(record, profile, &breakdown, score);

        debug!(player = %record.name, profile = %profile.key, score, "graded player");

        Ok(Grade {
            player_name: record.name.clone(),
            position: record.role.position().to_string(),
            score,
            analysis,
            components: breakdown.components,
        })
    }

    /// Never fails: a line without any weighted stat degrades to the neutral grade.
    pub fn grade(&self, record: &PlayerStatRecord, profile: &ScoringProfile) -> Grade {
        match self.try_grade(record, profile) {
            Ok(grade) => grade,
            Err(err) => {
                warn!(%err, "grading degraded to neutral");
                Grade::neutral(
                    record.name.clone(),
                    record.role.position(),
                    format!(
                        "Data unavailable: {err}; graded as league average ({NEUTRAL_SCORE:.1})."
                    ),
                )
            }
        }
    }

    pub fn grade_slot(&self, slot: &RosterSlot, profile: &ScoringProfile) -> Grade {
        let mut grade = match &slot.stats {
            StatLookup::Found(record) => self.grade(record, profile),
            StatLookup::Missing => Grade::neutral(
                slot.player_name.clone(),
                slot.position(),
                format!(
                    "No {} stats found for {}; graded as league average ({NEUTRAL_SCORE:.1}).",
                    self.config.season, slot.player_name
                ),
            ),
            StatLookup::Failed(reason) => Grade::neutral(
                slot.player_name.clone(),
                slot.position(),
                format!(
                    "Stats lookup failed for {} ({reason}); graded as league average ({NEUTRAL_SCORE:.1}).",
                    slot.player_name
                ),
            ),
        };
        grade.player_name = slot.player_name.clone();
        grade.position = slot.position();
        grade
    }
}
