use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::StatKind;

/// Closed set of scoring strategies. `Counter` is never part of the catalog;
/// it tags profiles derived at request time from an opponent report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKey {
    Standard,
    Strikeout,
    Control,
    Groundball,
    Clutch,
    Sabermetrics,
    Counter,
}

impl ProfileKey {
    pub const CATALOG: [ProfileKey; 6] = [
        ProfileKey::Standard,
        ProfileKey::Strikeout,
        ProfileKey::Control,
        ProfileKey::Groundball,
        ProfileKey::Clutch,
        ProfileKey::Sabermetrics,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ProfileKey::Standard => "standard",
            ProfileKey::Strikeout => "strikeout",
            ProfileKey::Control => "control",
            ProfileKey::Groundball => "groundball",
            ProfileKey::Clutch => "clutch",
            ProfileKey::Sabermetrics => "sabermetrics",
            ProfileKey::Counter => "counter",
        }
    }

    /// Parses a catalog key, ignoring case and surrounding whitespace. Only
    /// the six registry keys are accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::CATALOG
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Maps a raw stat onto the shared 0-100 scale. League average lands on 50 and
/// a value `spread` away from it in the favourable direction lands on 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationRule {
    pub direction: Direction,
    pub league_average: f64,
    pub spread: f64,
}

pub const NEUTRAL_SCORE: f64 = 50.0;

impl NormalizationRule {
    pub const fn higher(league_average: f64, spread: f64) -> Self {
        Self {
            direction: Direction::HigherIsBetter,
            league_average,
            spread,
        }
    }

    pub const fn lower(league_average: f64, spread: f64) -> Self {
        Self {
            direction: Direction::LowerIsBetter,
            league_average,
            spread,
        }
    }

    /// League-average-anchored defaults for each stat dimension.
    pub const fn default_for(kind: StatKind) -> Self {
        match kind {
            StatKind::Era => Self::lower(4.10, 2.0),
            StatKind::Whip => Self::lower(1.28, 0.35),
            StatKind::StrikeoutRate => Self::higher(0.225, 0.09),
            StatKind::WalkRate => Self::lower(0.082, 0.04),
            StatKind::InningsPitched => Self::higher(110.0, 90.0),
            StatKind::Fip => Self::lower(4.10, 1.5),
            StatKind::Xfip => Self::lower(4.10, 1.3),
            StatKind::StrikeoutsPerNine => Self::higher(8.6, 3.2),
            StatKind::GroundBallRate => Self::higher(0.43, 0.12),
            StatKind::HomeRunRate => Self::lower(0.030, 0.015),
            StatKind::WpaLi => Self::higher(0.0, 2.0),
            StatKind::SavesHolds => Self::higher(5.0, 20.0),
        }
    }

    pub fn normalize(&self, value: f64) -> f64 {
        if !value.is_finite() || self.spread <= 0.0 {
            return NEUTRAL_SCORE;
        }
        let delta = match self.direction {
            Direction::HigherIsBetter => value - self.league_average,
            Direction::LowerIsBetter => self.league_average - value,
        };
        (NEUTRAL_SCORE + NEUTRAL_SCORE * delta / self.spread).clamp(0.0, 100.0)
    }
}

/// Immutable weighting configuration used by the grading engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringProfile {
    pub key: ProfileKey,
    pub label: String,
    /// Non-negative weight magnitudes; direction lives in `normalization`.
    pub weights: BTreeMap<StatKind, f64>,
    pub normalization: BTreeMap<StatKind, NormalizationRule>,
    pub explanation: String,
}

impl ScoringProfile {
    pub fn new(
        key: ProfileKey,
        label: impl Into<String>,
        weights: &[(StatKind, f64)],
        explanation: impl Into<String>,
    ) -> Self {
        let weights: BTreeMap<StatKind, f64> = weights
            .iter()
            .filter(|(_, weight)| weight.is_finite() && *weight > 0.0)
            .map(|(kind, weight)| (*kind, *weight))
            .collect();
        let normalization = weights
            .keys()
            .map(|kind| (*kind, NormalizationRule::default_for(*kind)))
            .collect();

        Self {
            key,
            label: label.into(),
            weights,
            normalization,
            explanation: explanation.into(),
        }
    }

    pub fn rule(&self, kind: StatKind) -> NormalizationRule {
        self.normalization
            .get(&kind)
            .copied()
            .unwrap_or_else(|| NormalizationRule::default_for(kind))
    }

    /// Weighted dimensions ordered by weight, heaviest first (ties by stat order).
    pub fn key_stats(&self, limit: usize) -> Vec<StatKind> {
        let mut ordered: Vec<(StatKind, f64)> =
            self.weights.iter().map(|(kind, w)| (*kind, *w)).collect();
        ordered.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ordered.into_iter().take(limit).map(|(kind, _)| kind).collect()
    }
}

/// Catalog entry surfaced to selection UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    pub key: &'static str,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("unknown scoring profile '{0}'")]
    Unknown(String),
}

/// Fixed catalog of the six scoring profiles, built once at startup.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<ScoringProfile>,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl ProfileRegistry {
    pub fn standard() -> Self {
        use StatKind::*;

        let profiles = vec![
            ScoringProfile::new(
                ProfileKey::Standard,
                "Standard",
                &[
                    (Era, 1.0),
                    (Whip, 1.0),
                    (StrikeoutRate, 1.0),
                    (WalkRate, 1.0),
                    (InningsPitched, 1.0),
                ],
                "The standard strategy weighs run prevention, baserunner suppression, strikeout \
                 rate, control, and workload evenly, surfacing the best all-around arms.",
            ),
            ScoringProfile::new(
                ProfileKey::Strikeout,
                "Strikeout",
                &[
                    (StrikeoutRate, 3.0),
                    (StrikeoutsPerNine, 2.0),
                    (Era, 0.5),
                    (Whip, 0.5),
                    (WalkRate, 0.5),
                    (InningsPitched, 0.5),
                ],
                "The strikeout strategy leans on K% and K/9, favouring pitchers who miss bats \
                 and pile up strikeout totals even when their ratios are ordinary.",
            ),
            ScoringProfile::new(
                ProfileKey::Control,
                "Control",
                &[
                    (WalkRate, 3.0),
                    (Whip, 2.5),
                    (Era, 1.0),
                    (StrikeoutRate, 0.5),
                    (InningsPitched, 0.5),
                ],
                "The control strategy rewards pitchers who limit walks and keep WHIP low, \
                 trading strikeout upside for stable, efficient innings.",
            ),
            ScoringProfile::new(
                ProfileKey::Groundball,
                "Groundball",
                &[
                    (GroundBallRate, 3.0),
                    (HomeRunRate, 2.0),
                    (Era, 1.0),
                    (Whip, 1.0),
                    (StrikeoutRate, 0.5),
                ],
                "The groundball strategy targets high groundball rates and home-run \
                 suppression, preferring arms that keep the ball in the park.",
            ),
            ScoringProfile::new(
                ProfileKey::Clutch,
                "Clutch",
                &[
                    (WpaLi, 3.0),
                    (SavesHolds, 1.0),
                    (Era, 1.0),
                    (Whip, 1.0),
                    (StrikeoutRate, 1.0),
                ],
                "The clutch strategy highlights high-leverage performance measured by WPA/LI, \
                 backed by late-inning usage and reliable ratios.",
            ),
            ScoringProfile::new(
                ProfileKey::Sabermetrics,
                "Sabermetrics",
                &[
                    (Fip, 3.0),
                    (Xfip, 3.0),
                    (StrikeoutRate, 1.0),
                    (WalkRate, 1.0),
                    (Era, 0.5),
                ],
                "The sabermetrics strategy trusts FIP and xFIP over ERA, valuing the strikeout \
                 and walk skills that make run prevention sustainable.",
            ),
        ];

        Self { profiles }
    }

    /// Stable catalog order for selection UIs.
    pub fn list_profiles(&self) -> Vec<ProfileSummary> {
        self.profiles
            .iter()
            .map(|profile| ProfileSummary {
                key: profile.key.as_str(),
                label: profile.label.clone(),
            })
            .collect()
    }

    pub fn get(&self, key: ProfileKey) -> Option<&ScoringProfile> {
        self.profiles.iter().find(|profile| profile.key == key)
    }

    pub fn resolve(&self, raw: &str) -> Result<&ScoringProfile, ProfileError> {
        ProfileKey::parse(raw)
            .and_then(|key| self.get(key))
            .ok_or_else(|| ProfileError::Unknown(raw.to_string()))
    }

    /// Total resolution: unknown or absent keys fall back to `standard`.
    pub fn resolve_or_standard(&self, raw: Option<&str>) -> &ScoringProfile {
        let requested = raw.unwrap_or(ProfileKey::Standard.as_str());
        match self.resolve(requested) {
            Ok(profile) => profile,
            Err(err) => {
                tracing::debug!(%err, "falling back to standard profile");
                self.standard_profile()
            }
        }
    }

    pub fn standard_profile(&self) -> &ScoringProfile {
        &self.profiles[0]
    }
}
