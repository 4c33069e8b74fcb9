use super::common::*;
use crate::grading::domain::RosterSlot;
use crate::grading::engine::GradingConfig;

#[test]
fn standard_profile_ranks_hand_computed_order() {
    let recommendation = evaluator().recommend_lineup(&slots(staff()), Some("standard"));

    assert_eq!(
        names(&recommendation.lineup),
        vec![
            "Ace Alvarez",
            "Steady Stone",
            "Whiff Walker",
            "Middling Mays",
            "Rough Reyes"
        ]
    );
    let scores: Vec<f64> = recommendation.lineup.iter().map(|e| e.score).collect();
    assert_eq!(scores, vec![83.88, 67.44, 58.48, 47.62, 16.12]);
    assert!(recommendation
        .explanation
        .starts_with("The standard strategy weighs run prevention"));
    assert!(recommendation
        .explanation
        .contains("Leading the staff: Ace Alvarez (elite workload (190.0 IP), 83.9)"));
}

#[test]
fn strikeout_profile_promotes_the_high_k_arm() {
    let evaluator = evaluator();
    let standard = evaluator.recommend_lineup(&slots(staff()), None);
    let strikeout = evaluator.recommend_lineup(&slots(staff()), Some("strikeout"));

    assert_eq!(strikeout.lineup[0].name, "Whiff Walker");
    assert_eq!(strikeout.lineup[0].score, 85.17);
    assert_ne!(strikeout.lineup[0].name, standard.lineup[0].name);
    assert!(strikeout.explanation.contains("K% 34.0%"));
}

#[test]
fn unknown_profile_matches_standard() {
    let evaluator = evaluator();
    assert_eq!(
        evaluator.recommend_lineup(&slots(staff()), Some("bullpen-chaos")),
        evaluator.recommend_lineup(&slots(staff()), Some("standard"))
    );
}

#[test]
fn ranks_are_dense_and_descending() {
    let evaluator = evaluator();
    for profile in ["standard", "strikeout", "control", "groundball", "clutch", "sabermetrics"] {
        let recommendation = evaluator.recommend_lineup(&slots(staff()), Some(profile));
        for (index, entry) in recommendation.lineup.iter().enumerate() {
            assert_eq!(entry.rank, index + 1);
        }
        for pair in recommendation.lineup.windows(2) {
            assert!(pair[0].score >= pair[1].score, "{profile}: {pair:?}");
        }
    }
}

#[test]
fn ties_break_alphabetically_and_repeat_identically() {
    let twin = |name: &str| starter(name, 3.40, 1.15, 0.23, 0.070, 170.0, 8.4);
    let roster = slots(vec![twin("Zane Twin"), twin("adam Twin"), twin("Mike Twin")]);
    let evaluator = evaluator();

    let first = evaluator.recommend_lineup(&roster, None);
    assert_eq!(names(&first.lineup), vec!["adam Twin", "Mike Twin", "Zane Twin"]);
    assert_eq!(first, evaluator.recommend_lineup(&roster, None));
}

#[test]
fn missing_players_rank_at_neutral() {
    let mut roster = slots(staff());
    roster.push(RosterSlot::missing("Prospect Pete"));
    let recommendation = evaluator_with(GradingConfig {
        lineup_size: 10,
        ..GradingConfig::default()
    })
    .recommend_lineup(&roster, None);

    assert_eq!(recommendation.lineup.len(), 6);
    assert_eq!(recommendation.lineup[3].name, "Prospect Pete");
    assert_eq!(recommendation.lineup[3].score, 50.0);
}

#[test]
fn lineup_size_truncates_after_ranking() {
    let recommendation = evaluator_with(GradingConfig {
        lineup_size: 2,
        ..GradingConfig::default()
    })
    .recommend_lineup(&slots(staff()), None);

    assert_eq!(names(&recommendation.lineup), vec!["Ace Alvarez", "Steady Stone"]);
    assert_eq!(recommendation.lineup[1].rank, 2);
}

#[test]
fn empty_roster_yields_empty_lineup() {
    let recommendation = evaluator().recommend_lineup(&[], Some("control"));
    assert!(recommendation.lineup.is_empty());
    assert_eq!(
        recommendation.explanation,
        "No players were available to build a lineup under the Control profile."
    );
}

#[test]
fn roster_grades_keep_roster_order() {
    let grades = evaluator().grade_roster(&slots(staff()), Some("control"));
    let order: Vec<&str> = grades.iter().map(|g| g.player_name.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "Whiff Walker",
            "Middling Mays",
            "Ace Alvarez",
            "Rough Reyes",
            "Steady Stone"
        ]
    );
    assert_eq!(grades[2].score, 86.64);
}
