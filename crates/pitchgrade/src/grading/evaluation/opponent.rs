use std::collections::BTreeMap;

use super::super::domain::{round2, PlayerStatRecord, RosterSlot, StatKind, TeamId};
use super::super::engine::GradingEngine;
use super::super::profiles::{
    Direction, NormalizationRule, ProfileKey, ScoringProfile, NEUTRAL_SCORE,
};
use super::views::{mean_grade, OpponentPitcher, OpponentSummary, OpponentWeaknessReport};

/// Normalized score below which a single stat is reported as a weakness.
pub const WEAK_STAT_THRESHOLD: f64 = 30.0;
/// Extra weight granted to a dimension where the opponent sits at zero.
pub const COUNTER_BOOST: f64 = 3.0;
const LOW_STRIKEOUT_PCT: f64 = 22.0;
const HIGH_ERA: f64 = 3.75;

pub(crate) fn analyze_opponent(
    engine: &GradingEngine,
    standard: &ScoringProfile,
    opponent_team_id: TeamId,
    roster: &[RosterSlot],
) -> OpponentWeaknessReport {
    let grades: Vec<_> = roster
        .iter()
        .map(|slot| engine.grade_slot(slot, standard))
        .collect();

    let pitchers = roster
        .iter()
        .zip(&grades)
        .map(|(slot, grade)| OpponentPitcher {
            player_name: grade.player_name.clone(),
            position: grade.position.clone(),
            grade: grade.score,
            weaknesses: slot
                .record()
                .and_then(|record| describe_weaknesses(record, standard)),
        })
        .collect();

    OpponentWeaknessReport {
        opponent_team_id,
        average_grade: mean_grade(&grades),
        pitchers,
        dimension_scores: dimension_scores(roster),
    }
}

fn describe_weaknesses(record: &PlayerStatRecord, profile: &ScoringProfile) -> Option<String> {
    let lines: Vec<String> = profile
        .weights
        .keys()
        .filter_map(|kind| {
            let value = record.value(*kind)?;
            let rule = profile.rule(*kind);
            (rule.normalize(value) < WEAK_STAT_THRESHOLD).then(|| weakness_line(*kind, rule, value))
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn weakness_line(kind: StatKind, rule: NormalizationRule, value: f64) -> String {
    let adjective = match rule.direction {
        Direction::LowerIsBetter => "High",
        Direction::HigherIsBetter => "Low",
    };
    let exploit = match kind {
        StatKind::Era => "vulnerable to runs, so an aggressive approach pays off",
        StatKind::Whip => "allows heavy traffic on the bases",
        StatKind::StrikeoutRate => "contact-oriented hitters can keep the ball in play",
        StatKind::WalkRate => "patient hitters can exploit shaky command",
        StatKind::InningsPitched => "a light workload caps weekly impact",
        StatKind::HomeRunRate => "prone to the long ball",
        _ => "trails league average",
    };
    format!(
        "• {adjective} {} ({}): {exploit}.",
        kind.weakness_label(),
        kind.format_value(value)
    )
}

/// Mean normalized score per dimension, using league-average defaults.
fn dimension_scores(roster: &[RosterSlot]) -> BTreeMap<StatKind, f64> {
    StatKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let rule = NormalizationRule::default_for(kind);
            let scores: Vec<f64> = roster
                .iter()
                .filter_map(RosterSlot::record)
                .filter_map(|record| record.value(kind))
                .map(|value| rule.normalize(value))
                .collect();
            if scores.is_empty() {
                None
            } else {
                Some((kind, scores.iter().sum::<f64>() / scores.len() as f64))
            }
        })
        .collect()
}

/// Builds a transient profile that upweights dimensions where the opponent
/// trails league average, on top of the base profile's weights.
pub fn derive_profile_from_weaknesses(
    report: &OpponentWeaknessReport,
    base: &ScoringProfile,
) -> ScoringProfile {
    let mut weights: BTreeMap<StatKind, f64> = base.weights.clone();
    let mut boosted = Vec::new();

    for (kind, score) in &report.dimension_scores {
        let deficit = ((NEUTRAL_SCORE - score) / NEUTRAL_SCORE).clamp(0.0, 1.0);
        if deficit > 0.0 {
            *weights.entry(*kind).or_insert(0.0) += COUNTER_BOOST * deficit;
            boosted.push(kind.label());
        }
    }

    let explanation = if boosted.is_empty() {
        "The opponent's staff shows no below-average dimension, so the counter strategy keeps \
         balanced standard weights."
            .to_string()
    } else {
        format!(
            "The counter strategy starts from balanced weights and boosts {} where the \
             opponent's staff trails league average.",
            boosted.join(", ")
        )
    };

    let pairs: Vec<(StatKind, f64)> = weights.into_iter().collect();
    ScoringProfile::new(ProfileKey::Counter, "Counter", &pairs, explanation)
}

/// Staff-wide strikeout and ERA averages with a short weakness summary.
pub(crate) fn summarize_staff(roster: &[RosterSlot]) -> OpponentSummary {
    let records: Vec<&PlayerStatRecord> = roster.iter().filter_map(RosterSlot::record).collect();
    let average = |kind: StatKind| {
        let values: Vec<f64> = records.iter().filter_map(|r| r.value(kind)).collect();
        (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
    };

    let avg_k = average(StatKind::StrikeoutRate).map(|k| k * 100.0);
    let avg_era = average(StatKind::Era);
    if avg_k.is_none() && avg_era.is_none() {
        return OpponentSummary {
            summary: "Unable to analyze opponent".to_string(),
            avg_k: 0.0,
            avg_era: 0.0,
        };
    }

    let mut weaknesses = Vec::new();
    if let Some(k) = avg_k.filter(|k| *k < LOW_STRIKEOUT_PCT) {
        weaknesses.push(format!("Low strikeout rate (avg {k:.1}% K)"));
    }
    if let Some(era) = avg_era.filter(|era| *era > HIGH_ERA) {
        weaknesses.push(format!("High ERA (avg {era:.2})"));
    }
    if weaknesses.is_empty() {
        weaknesses.push("Well-rounded staff with no major weaknesses".to_string());
    }

    OpponentSummary {
        summary: weaknesses.join(" | "),
        avg_k: avg_k.map(|k| (k * 10.0).round() / 10.0).unwrap_or(0.0),
        avg_era: avg_era.map(round2).unwrap_or(0.0),
    }
}
