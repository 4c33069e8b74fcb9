use std::cmp::Ordering;

use super::super::domain::RosterSlot;
use super::super::engine::{standout, Grade, GradingEngine};
use super::super::profiles::ScoringProfile;
use super::views::{LineupEntry, LineupRecommendation};

const HIGHLIGHTED_STARTERS: usize = 3;

/// Grades every slot and returns them best-first. Ties fall back to name and
/// then roster order so repeated calls rank identically.
pub(crate) fn ranked_grades(
    engine: &GradingEngine,
    roster: &[RosterSlot],
    profile: &ScoringProfile,
) -> Vec<Grade> {
    let mut graded: Vec<(usize, Grade)> = roster
        .iter()
        .enumerate()
        .map(|(index, slot)| (index, engine.grade_slot(slot, profile)))
        .collect();

    graded.sort_by(|(index_a, a), (index_b, b)| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| compare_names(&a.player_name, &b.player_name))
            .then(index_a.cmp(index_b))
    });

    graded.into_iter().map(|(_, grade)| grade).collect()
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub(crate) fn build_lineup(
    engine: &GradingEngine,
    roster: &[RosterSlot],
    profile: &ScoringProfile,
) -> LineupRecommendation {
    let starters: Vec<Grade> = ranked_grades(engine, roster, profile)
        .into_iter()
        .take(engine.config().lineup_size)
        .collect();

    let lineup = starters
        .iter()
        .enumerate()
        .map(|(index, grade)| LineupEntry {
            rank: index + 1,
            name: grade.player_name.clone(),
            position: grade.position.clone(),
            score: grade.score,
        })
        .collect();

    LineupRecommendation {
        lineup,
        explanation: explain_lineup(&starters, profile),
    }
}

fn explain_lineup(starters: &[Grade], profile: &ScoringProfile) -> String {
    if starters.is_empty() {
        return format!(
            "No players were available to build a lineup under the {} profile.",
            profile.label
        );
    }

    let highlights: Vec<String> = starters
        .iter()
        .take(HIGHLIGHTED_STARTERS)
        .map(|grade| {
            let reason = standout(&grade.components)
                .unwrap_or_else(|| "balanced contributions".to_string());
            format!("{} ({}, {:.1})", grade.player_name, reason, grade.score)
        })
        .collect();

    format!(
        "{} Leading the staff: {}.",
        profile.explanation,
        highlights.join("; ")
    )
}
