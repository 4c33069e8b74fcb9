use serde::Serialize;

use super::super::domain::{PlayerStatRecord, StatKind};
use super::super::profiles::{ScoringProfile, NEUTRAL_SCORE};
use super::rules::ScoreBreakdown;
use super::StatComponent;

const STRENGTH_FLOOR: f64 = 60.0;
const WEAKNESS_CEILING: f64 = 40.0;
const ELITE_FLOOR: f64 = 80.0;
const POOR_CEILING: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Elite,
    Top,
    Solid,
    Replacement,
    Poor,
}

impl Tier {
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            Tier::Elite
        } else if score >= 70.0 {
            Tier::Top
        } else if score >= 60.0 {
            Tier::Solid
        } else if score >= 45.0 {
            Tier::Replacement
        } else {
            Tier::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Tier::Elite => "Elite",
            Tier::Top => "Top",
            Tier::Solid => "Solid",
            Tier::Replacement => "Replacement",
            Tier::Poor => "Poor",
        }
    }
}

pub(crate) fn compose_analysis(
    record: &PlayerStatRecord,
    profile: &ScoringProfile,
    breakdown: &ScoreBreakdown,
    score: f64,
) -> String {
    let mut lines = vec![format!(
        "{} tier under the {} profile: {}.",
        Tier::for_score(score).label(),
        profile.label,
        capitalize(&verdict(&breakdown.components, score))
    )];

    let missing: Vec<&str> = breakdown
        .missing()
        .map(|component| component.kind.abbreviation())
        .collect();
    if !missing.is_empty() {
        lines.push(format!(
            "Missing stats treated as league average: {}.",
            missing.join(", ")
        ));
    }

    if let Some((archetype, advice)) = archetype(record) {
        lines.push(format!("{archetype}: {advice}"));
    }

    lines.join("\n")
}

/// Strongest positive contributor, phrased for lineup explanations.
pub(crate) fn standout(components: &[StatComponent]) -> Option<String> {
    strongest(components).map(|component| {
        let mut phrase = strength_phrase(component);
        if let Some(raw) = component.raw {
            phrase.push_str(&format!(" ({})", component.kind.format_value(raw)));
        }
        phrase
    })
}

fn verdict(components: &[StatComponent], score: f64) -> String {
    match (strongest(components), weakest(components)) {
        (Some(up), Some(down)) if score >= NEUTRAL_SCORE => format!(
            "{} offsets {}",
            strength_phrase(up),
            weakness_phrase(down)
        ),
        (Some(up), Some(down)) => format!(
            "{} outweighs {}",
            weakness_phrase(down),
            strength_phrase(up)
        ),
        (Some(up), None) => format!("{} drives the grade", strength_phrase(up)),
        (None, Some(down)) => format!("{} drags the grade down", weakness_phrase(down)),
        (None, None) => "no stat stands out from league average".to_string(),
    }
}

fn contribution(component: &StatComponent) -> f64 {
    component.weight * (component.normalized - NEUTRAL_SCORE)
}

fn strongest(components: &[StatComponent]) -> Option<&StatComponent> {
    components
        .iter()
        .filter(|c| c.raw.is_some() && c.normalized >= STRENGTH_FLOOR)
        .max_by(|a, b| {
            contribution(a)
                .total_cmp(&contribution(b))
                .then(b.kind.cmp(&a.kind))
        })
}

fn weakest(components: &[StatComponent]) -> Option<&StatComponent> {
    components
        .iter()
        .filter(|c| c.raw.is_some() && c.normalized <= WEAKNESS_CEILING)
        .min_by(|a, b| {
            contribution(a)
                .total_cmp(&contribution(b))
                .then(a.kind.cmp(&b.kind))
        })
}

fn strength_phrase(component: &StatComponent) -> String {
    if component.normalized >= ELITE_FLOOR {
        format!("elite {}", component.kind.label())
    } else {
        format!("above-average {}", component.kind.label())
    }
}

fn weakness_phrase(component: &StatComponent) -> String {
    if component.normalized <= POOR_CEILING {
        format!("poor {}", component.kind.label())
    } else {
        format!("below-average {}", component.kind.label())
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fantasy archetype from the classic K% / IP / ERA triple.
fn archetype(record: &PlayerStatRecord) -> Option<(&'static str, &'static str)> {
    let k = record.value(StatKind::StrikeoutRate)? * 100.0;
    let ip = record.value(StatKind::InningsPitched)?;
    let era = record.value(StatKind::Era)?;

    let pair = if k >= 28.0 && ip >= 170.0 && era <= 3.00 {
        ("Ace Workhorse", "Start every week without hesitation.")
    } else if k >= 30.0 && ip < 130.0 {
        (
            "Strikeout Specialist",
            "Boosts strikeout totals but may need innings support.",
        )
    } else if k < 22.0 && era < 3.25 {
        (
            "Ratio Protector",
            "Steadies ERA and WHIP with limited strikeout upside.",
        )
    } else if k >= 28.0 && era >= 4.00 {
        (
            "Volatile Strikeout Arm",
            "Useful for strikeouts but risky for ratios; stream by matchup.",
        )
    } else if k < 20.0 && era < 3.50 {
        (
            "Contact Manager",
            "Few strikeouts, but dependable ratio stability.",
        )
    } else if ip >= 160.0 && era >= 4.30 {
        (
            "High-Volume Ratio Risk",
            "Supplies innings while likely hurting ERA and WHIP.",
        )
    } else {
        (
            "Balanced Profile",
            "Contributes steadily without major strengths or weaknesses.",
        )
    };

    Some(pair)
}
