use super::super::domain::PlayerStatRecord;
use super::super::profiles::{ScoringProfile, NEUTRAL_SCORE};
use super::{GradingError, StatComponent};

pub(crate) struct ScoreBreakdown {
    pub components: Vec<StatComponent>,
    pub score: f64,
}

impl ScoreBreakdown {
    pub fn missing(&self) -> impl Iterator<Item = &StatComponent> {
        self.components
            .iter()
            .filter(|component| component.raw.is_none())
    }
}

/// Weighted average of normalized stats. Missing stats sit at league average
/// so incomplete lines are not punished; a line with no weighted stat at all
/// is rejected.
pub(crate) fn score_record(
    record: &PlayerStatRecord,
    profile: &ScoringProfile,
) -> Result<ScoreBreakdown, GradingError> {
    let mut components = Vec::with_capacity(profile.weights.len());
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut present = 0usize;

    for (kind, weight) in &profile.weights {
        let raw = record.value(*kind);
        let normalized = match raw {
            Some(value) => {
                present += 1;
                profile.rule(*kind).normalize(value)
            }
            None => NEUTRAL_SCORE,
        };

        weighted_sum += weight * normalized;
        weight_total += weight;
        components.push(StatComponent {
            kind: *kind,
            raw,
            normalized,
            weight: *weight,
        });
    }

    if present == 0 || weight_total <= 0.0 {
        return Err(GradingError::InsufficientData {
            player: record.name.clone(),
            profile: profile.key.as_str().to_string(),
        });
    }

    let score = (weighted_sum / weight_total).clamp(0.0, 100.0);

    Ok(ScoreBreakdown { components, score })
}
