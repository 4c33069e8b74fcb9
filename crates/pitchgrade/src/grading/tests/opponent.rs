use super::common::*;
use crate::grading::domain::{RosterSlot, StatKind};
use crate::grading::evaluation::derive_profile_from_weaknesses;
use crate::grading::profiles::{ProfileKey, ProfileRegistry};

#[test]
fn high_walk_rate_is_called_out_by_name() {
    let report = evaluator().analyze_opponent(OPPONENT, &slots(opponent_staff()));

    assert_eq!(report.opponent_team_id, OPPONENT);
    assert_eq!(report.pitchers.len(), 2);

    let wally = &report.pitchers[0];
    assert_eq!(wally.player_name, "Wild Wally");
    let weaknesses = wally.weaknesses.as_deref().expect("walk rate flagged");
    assert!(weaknesses.contains("walk rate"));
    assert_eq!(
        weaknesses,
        "• High walk rate (BB% 15.0%): patient hitters can exploit shaky command."
    );

    let carl = &report.pitchers[1];
    assert_eq!(carl.player_name, "Contact Carl");
    assert!(carl.weaknesses.is_none());
}

#[test]
fn average_grade_is_mean_of_pitcher_grades() {
    let report = evaluator().analyze_opponent(OPPONENT, &slots(staff()));
    let mean = report.pitchers.iter().map(|p| p.grade).sum::<f64>() / report.pitchers.len() as f64;
    assert!((report.average_grade - mean).abs() < 0.01);

    let empty = evaluator().analyze_opponent(OPPONENT, &[]);
    assert_eq!(empty.average_grade, 0.0);
    assert!(empty.pitchers.is_empty());
}

#[test]
fn unknown_pitcher_reports_neutral_without_weaknesses() {
    let report = evaluator().analyze_opponent(OPPONENT, &[RosterSlot::missing("Mystery Man")]);
    assert_eq!(report.pitchers[0].grade, 50.0);
    assert!(report.pitchers[0].weaknesses.is_none());
}

#[test]
fn derived_profile_boosts_opponent_deficits() {
    let registry = ProfileRegistry::standard();
    let report = evaluator().analyze_opponent(OPPONENT, &slots(opponent_staff()));
    let derived = derive_profile_from_weaknesses(&report, registry.standard_profile());

    assert_eq!(derived.key, ProfileKey::Counter);
    let weight = |kind| derived.weights.get(&kind).copied().unwrap_or(0.0);
    assert!(weight(StatKind::WalkRate) > 1.0);
    assert!(weight(StatKind::StrikeoutRate) > 1.0);
    assert_eq!(weight(StatKind::Era), 1.0);
    assert_eq!(weight(StatKind::InningsPitched), 1.0);
    assert!(derived.explanation.contains("control"));
    assert!(registry.resolve("counter").is_err());
}

#[test]
fn counter_lineup_reports_strategy_and_staff_summary() {
    let counter = evaluator().counter_lineup(
        OPPONENT,
        &slots(opponent_staff()),
        &slots(staff()),
        None,
    );

    assert_eq!(counter.strategy, ProfileKey::Counter);
    assert_eq!(counter.lineup.len(), 5);
    assert_eq!(counter.lineup[0].rank, 1);
    assert_eq!(counter.opponent_weaknesses.avg_k, 20.0);
    assert_eq!(counter.opponent_weaknesses.avg_era, 3.65);
    assert_eq!(
        counter.opponent_weaknesses.summary,
        "Low strikeout rate (avg 20.0% K)"
    );
    assert!(counter.explanation.starts_with("Counter-strategy analysis:"));
    assert!(counter.explanation.contains("Recommended strategy: COUNTER"));

    let json = serde_json::to_value(&counter).expect("serializes");
    assert_eq!(json["strategy"], "counter");
}

#[test]
fn counter_key_selects_the_derived_profile() {
    let evaluator = evaluator();
    let derived = evaluator.counter_lineup(
        OPPONENT,
        &slots(opponent_staff()),
        &slots(staff()),
        None,
    );
    for key in ["counter", " Counter ", ""] {
        let counter = evaluator.counter_lineup(
            OPPONENT,
            &slots(opponent_staff()),
            &slots(staff()),
            Some(key),
        );
        assert_eq!(counter.strategy, ProfileKey::Counter, "{key:?}");
        assert_eq!(counter.lineup, derived.lineup, "{key:?}");
    }
}

#[test]
fn counter_lineup_lifts_strikeout_arms_against_low_k_staff() {
    let evaluator = evaluator();
    let position = |lineup: &[crate::grading::evaluation::LineupEntry], name: &str| {
        lineup
            .iter()
            .position(|entry| entry.name == name)
            .expect("pitcher ranked")
    };

    let standard = evaluator.recommend_lineup(&slots(staff()), Some("standard"));
    assert!(
        position(&standard.lineup, "Steady Stone") < position(&standard.lineup, "Whiff Walker")
    );

    let counter = evaluator.counter_lineup(
        OPPONENT,
        &slots(opponent_staff()),
        &slots(staff()),
        None,
    );
    assert_eq!(counter.opponent_weaknesses.avg_k, 20.0);
    assert!(position(&counter.lineup, "Whiff Walker") < position(&counter.lineup, "Steady Stone"));

    let score = |lineup: &[crate::grading::evaluation::LineupEntry]| {
        lineup[position(lineup, "Whiff Walker")].score
    };
    assert!(score(&counter.lineup) > score(&standard.lineup));
}

#[test]
fn counter_lineup_honours_explicit_profile() {
    let evaluator = evaluator();
    let counter = evaluator.counter_lineup(
        OPPONENT,
        &slots(opponent_staff()),
        &slots(staff()),
        Some("strikeout"),
    );
    assert_eq!(counter.strategy, ProfileKey::Strikeout);
    assert_eq!(counter.lineup[0].name, "Whiff Walker");

    let fallback = evaluator.counter_lineup(OPPONENT, &[], &slots(staff()), Some("zzz"));
    assert_eq!(fallback.strategy, ProfileKey::Standard);
    assert_eq!(
        fallback.opponent_weaknesses.summary,
        "Unable to analyze opponent"
    );
}

#[test]
fn balanced_opponent_has_no_major_weakness() {
    let records = staff();
    let counter = evaluator().counter_lineup(
        OPPONENT,
        &slots(vec![records[2].clone(), records[0].clone()]),
        &slots(records.clone()),
        None,
    );
    // K% 29.0 and ERA 3.40 on average.
    assert_eq!(
        counter.opponent_weaknesses.summary,
        "Well-rounded staff with no major weaknesses"
    );
}
