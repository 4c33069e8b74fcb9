use super::super::domain::{round2, RosterSlot, StatKind};
use super::super::engine::{Grade, GradingEngine};
use super::super::profiles::ScoringProfile;
use super::views::{TeamSide, TradeResult, TradeWinner};

/// Full grade range; a diff of this size is maximally lopsided.
pub const MAX_POSSIBLE_DIFF: f64 = 100.0;
/// Fairness level the suggestion text steers toward.
pub const TARGET_FAIRNESS_PCT: f64 = 95.0;
const KEY_STAT_COUNT: usize = 2;

pub(crate) fn evaluate_trade(
    engine: &GradingEngine,
    side_a: &[RosterSlot],
    side_b: &[RosterSlot],
    profile: &ScoringProfile,
) -> TradeResult {
    let grade_side = |slots: &[RosterSlot]| {
        TeamSide::new(
            slots
                .iter()
                .map(|slot| engine.grade_slot(slot, profile))
                .collect(),
        )
    };

    compare_sides(
        grade_side(side_a),
        grade_side(side_b),
        profile,
        engine.config().even_tolerance,
    )
}

/// Compares two graded sides. `diff` is always `total_a - total_b`.
pub fn compare_sides(
    side_a: TeamSide,
    side_b: TeamSide,
    profile: &ScoringProfile,
    even_tolerance: f64,
) -> TradeResult {
    let diff = round2(side_a.total_grade() - side_b.total_grade());

    let winner = if diff > even_tolerance {
        TradeWinner::SideA
    } else if diff < -even_tolerance {
        TradeWinner::SideB
    } else {
        TradeWinner::Even
    };

    let fairness_pct = fairness_pct(diff);
    let suggestion = suggest(winner, diff, fairness_pct, profile, even_tolerance);
    let profile_explanation = explain_profile(&side_a, &side_b, profile);

    TradeResult {
        side_a,
        side_b,
        diff,
        winner,
        fairness_pct,
        suggestion,
        profile: profile.key,
        profile_explanation,
    }
}

/// `100 * (1 - |diff| / 100)` clamped to [0, 100]; exactly 100 only when diff is 0.
pub fn fairness_pct(diff: f64) -> f64 {
    let raw = 100.0 * (1.0 - diff.abs() / MAX_POSSIBLE_DIFF);
    round2(raw.clamp(0.0, 100.0))
}

fn suggest(
    winner: TradeWinner,
    diff: f64,
    fairness_pct: f64,
    profile: &ScoringProfile,
    even_tolerance: f64,
) -> String {
    if winner == TradeWinner::Even {
        return format!(
            "This trade is balanced within {even_tolerance:.1} grade points under the {} profile.",
            profile.label
        );
    }

    let trailing = winner.swapped();
    if fairness_pct >= TARGET_FAIRNESS_PCT {
        return format!(
            "{} holds slightly more value, but the trade is already ~{:.0}% fair.",
            winner.label(),
            TARGET_FAIRNESS_PCT
        );
    }

    let allowed_gap = MAX_POSSIBLE_DIFF * (1.0 - TARGET_FAIRNESS_PCT / 100.0);
    let needed = (diff.abs() - allowed_gap).max(0.0);
    format!(
        "{} holds more value; {} needs ~{:.2} more grade points to make this ~{:.0}% fair.",
        winner.label(),
        trailing.label(),
        needed,
        TARGET_FAIRNESS_PCT
    )
}

fn explain_profile(side_a: &TeamSide, side_b: &TeamSide, profile: &ScoringProfile) -> String {
    let comparisons: Vec<String> = profile
        .key_stats(KEY_STAT_COUNT)
        .into_iter()
        .filter_map(|kind| {
            let a = side_average(side_a.players(), kind);
            let b = side_average(side_b.players(), kind);
            if a.is_none() && b.is_none() {
                return None;
            }
            let render = |value: Option<f64>| {
                value
                    .map(|v| kind.format_number(v))
                    .unwrap_or_else(|| "n/a".to_string())
            };
            Some(format!(
                "{} {} (Side A) vs {} (Side B)",
                kind.abbreviation(),
                render(a),
                render(b)
            ))
        })
        .collect();

    if comparisons.is_empty() {
        profile.explanation.clone()
    } else {
        format!(
            "{} Key stat comparison: {}.",
            profile.explanation,
            comparisons.join("; ")
        )
    }
}

fn side_average(players: &[Grade], kind: StatKind) -> Option<f64> {
    let values: Vec<f64> = players
        .iter()
        .filter_map(|grade| grade.component(kind).and_then(|c| c.raw))
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
