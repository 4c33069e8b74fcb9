use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for fantasy teams owned by the persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub u64);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pitching role reported by the season stats source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitcherRole {
    Starter,
    Reliever,
}

impl PitcherRole {
    pub const fn position(self) -> &'static str {
        match self {
            PitcherRole::Starter => "SP",
            PitcherRole::Reliever => "RP",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sp" | "starter" | "s" => Some(Self::Starter),
            "rp" | "reliever" | "r" | "cl" | "closer" => Some(Self::Reliever),
            _ => None,
        }
    }
}

/// Stat dimensions that scoring profiles can weigh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Era,
    Whip,
    StrikeoutRate,
    WalkRate,
    InningsPitched,
    Fip,
    Xfip,
    StrikeoutsPerNine,
    GroundBallRate,
    HomeRunRate,
    WpaLi,
    SavesHolds,
}

impl StatKind {
    pub const ALL: [StatKind; 12] = [
        StatKind::Era,
        StatKind::Whip,
        StatKind::StrikeoutRate,
        StatKind::WalkRate,
        StatKind::InningsPitched,
        StatKind::Fip,
        StatKind::Xfip,
        StatKind::StrikeoutsPerNine,
        StatKind::GroundBallRate,
        StatKind::HomeRunRate,
        StatKind::WpaLi,
        StatKind::SavesHolds,
    ];

    /// Short leaderboard label, e.g. `BB%`.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            StatKind::Era => "ERA",
            StatKind::Whip => "WHIP",
            StatKind::StrikeoutRate => "K%",
            StatKind::WalkRate => "BB%",
            StatKind::InningsPitched => "IP",
            StatKind::Fip => "FIP",
            StatKind::Xfip => "xFIP",
            StatKind::StrikeoutsPerNine => "K/9",
            StatKind::GroundBallRate => "GB%",
            StatKind::HomeRunRate => "HR%",
            StatKind::WpaLi => "WPA/LI",
            StatKind::SavesHolds => "SV+HLD",
        }
    }

    /// Plain-language name used in analysis text.
    pub const fn label(self) -> &'static str {
        match self {
            StatKind::Era => "run prevention",
            StatKind::Whip => "baserunner suppression",
            StatKind::StrikeoutRate => "strikeout rate",
            StatKind::WalkRate => "control",
            StatKind::InningsPitched => "workload",
            StatKind::Fip => "fielding-independent pitching",
            StatKind::Xfip => "expected FIP",
            StatKind::StrikeoutsPerNine => "strikeout volume",
            StatKind::GroundBallRate => "groundball rate",
            StatKind::HomeRunRate => "home-run suppression",
            StatKind::WpaLi => "high-leverage performance",
            StatKind::SavesHolds => "late-inning usage",
        }
    }

    /// Name used when a stat is called out as a weakness, e.g. "walk rate".
    pub const fn weakness_label(self) -> &'static str {
        match self {
            StatKind::Era => "ERA",
            StatKind::Whip => "WHIP",
            StatKind::StrikeoutRate => "strikeout rate",
            StatKind::WalkRate => "walk rate",
            StatKind::InningsPitched => "innings volume",
            StatKind::Fip => "FIP",
            StatKind::Xfip => "xFIP",
            StatKind::StrikeoutsPerNine => "strikeouts per nine",
            StatKind::GroundBallRate => "groundball rate",
            StatKind::HomeRunRate => "home-run rate",
            StatKind::WpaLi => "clutch performance",
            StatKind::SavesHolds => "late-inning usage",
        }
    }

    /// Whether raw values are stored as fractions and displayed as percentages.
    pub const fn is_percentage(self) -> bool {
        matches!(
            self,
            StatKind::StrikeoutRate
                | StatKind::WalkRate
                | StatKind::GroundBallRate
                | StatKind::HomeRunRate
        )
    }

    pub fn format_number(self, value: f64) -> String {
        match self {
            kind if kind.is_percentage() => format!("{:.1}%", value * 100.0),
            StatKind::SavesHolds => format!("{:.0}", value),
            StatKind::InningsPitched | StatKind::StrikeoutsPerNine | StatKind::WpaLi => {
                format!("{:.1}", value)
            }
            _ => format!("{:.2}", value),
        }
    }

    /// Display form used in analysis text, e.g. `BB% 14.0%` or `182.0 IP`.
    pub fn format_value(self, value: f64) -> String {
        match self {
            StatKind::InningsPitched => format!("{} IP", self.format_number(value)),
            kind => format!("{} {}", kind.abbreviation(), kind.format_number(value)),
        }
    }
}

/// A named player's season pitching line as supplied by the stats source.
///
/// Rates are fractions (`0.27` for a 27% strikeout rate). Any stat may be
/// absent; non-finite values are treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub role: PitcherRole,
    #[serde(default)]
    pub era: Option<f64>,
    #[serde(default)]
    pub whip: Option<f64>,
    #[serde(default)]
    pub k_pct: Option<f64>,
    #[serde(default)]
    pub bb_pct: Option<f64>,
    #[serde(default)]
    pub innings_pitched: Option<f64>,
    #[serde(default)]
    pub fip: Option<f64>,
    #[serde(default)]
    pub xfip: Option<f64>,
    #[serde(default)]
    pub k_per_9: Option<f64>,
    #[serde(default)]
    pub gb_pct: Option<f64>,
    #[serde(default)]
    pub hr_pct: Option<f64>,
    #[serde(default)]
    pub wpa_li: Option<f64>,
    #[serde(default)]
    pub saves: Option<u32>,
    #[serde(default)]
    pub holds: Option<u32>,
}

impl PlayerStatRecord {
    pub fn new(name: impl Into<String>, role: PitcherRole) -> Self {
        Self {
            name: name.into(),
            external_id: None,
            role,
            era: None,
            whip: None,
            k_pct: None,
            bb_pct: None,
            innings_pitched: None,
            fip: None,
            xfip: None,
            k_per_9: None,
            gb_pct: None,
            hr_pct: None,
            wpa_li: None,
            saves: None,
            holds: None,
        }
    }

    /// Builder-style setter keyed by stat dimension.
    pub fn with(mut self, kind: StatKind, value: f64) -> Self {
        self.set(kind, Some(value));
        self
    }

    pub fn set(&mut self, kind: StatKind, value: Option<f64>) {
        match kind {
            StatKind::Era => self.era = value,
            StatKind::Whip => self.whip = value,
            StatKind::StrikeoutRate => self.k_pct = value,
            StatKind::WalkRate => self.bb_pct = value,
            StatKind::InningsPitched => self.innings_pitched = value,
            StatKind::Fip => self.fip = value,
            StatKind::Xfip => self.xfip = value,
            StatKind::StrikeoutsPerNine => self.k_per_9 = value,
            StatKind::GroundBallRate => self.gb_pct = value,
            StatKind::HomeRunRate => self.hr_pct = value,
            StatKind::WpaLi => self.wpa_li = value,
            StatKind::SavesHolds => {
                self.saves = value.map(|total| total.max(0.0).round() as u32);
                self.holds = value.map(|_| 0);
            }
        }
    }

    pub fn value(&self, kind: StatKind) -> Option<f64> {
        let raw = match kind {
            StatKind::Era => self.era,
            StatKind::Whip => self.whip,
            StatKind::StrikeoutRate => self.k_pct,
            StatKind::WalkRate => self.bb_pct,
            StatKind::InningsPitched => self.innings_pitched,
            StatKind::Fip => self.fip,
            StatKind::Xfip => self.xfip,
            StatKind::StrikeoutsPerNine => self.k_per_9,
            StatKind::GroundBallRate => self.gb_pct,
            StatKind::HomeRunRate => self.hr_pct,
            StatKind::WpaLi => self.wpa_li,
            StatKind::SavesHolds => match (self.saves, self.holds) {
                (None, None) => None,
                (saves, holds) => {
                    Some(f64::from(saves.unwrap_or(0)) + f64::from(holds.unwrap_or(0)))
                }
            },
        };
        raw.filter(|value| value.is_finite())
    }
}

/// Roster membership entry owned by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl RosterEntry {
    pub fn new(player_name: impl Into<String>, position: Option<&str>) -> Self {
        Self {
            player_name: player_name.into(),
            position: position.map(str::to_string),
        }
    }
}

/// Outcome of resolving one roster entry against the stats source.
#[derive(Debug, Clone, PartialEq)]
pub enum StatLookup {
    Found(PlayerStatRecord),
    Missing,
    Failed(String),
}

/// A roster entry paired with its (possibly unavailable) season stats.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterSlot {
    pub player_name: String,
    pub position: Option<String>,
    pub stats: StatLookup,
}

impl RosterSlot {
    pub fn found(record: PlayerStatRecord) -> Self {
        Self {
            player_name: record.name.clone(),
            position: None,
            stats: StatLookup::Found(record),
        }
    }

    pub fn missing(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            position: None,
            stats: StatLookup::Missing,
        }
    }

    pub fn record(&self) -> Option<&PlayerStatRecord> {
        match &self.stats {
            StatLookup::Found(record) => Some(record),
            _ => None,
        }
    }

    /// Roster position when the persistence layer knows it, else the stats role.
    pub fn position(&self) -> String {
        if let Some(position) = self.position.as_deref().filter(|p| !p.trim().is_empty()) {
            return position.trim().to_string();
        }
        self.record()
            .map(|record| record.role.position())
            .unwrap_or(PitcherRole::Starter.position())
            .to_string()
    }
}

impl From<PlayerStatRecord> for RosterSlot {
    fn from(record: PlayerStatRecord) -> Self {
        Self::found(record)
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
