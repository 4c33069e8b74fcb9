use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{PitcherRole, PlayerStatRecord};
use super::repository::{LookupError, StatSource};

#[derive(Debug, thiserror::Error)]
pub enum StatsTableError {
    #[error("failed to read season stats: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid season stats CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// In-memory season pitching leaderboard loaded from a CSV export.
#[derive(Debug, Clone, Default)]
pub struct SeasonStatsTable {
    records: Vec<PlayerStatRecord>,
    by_name: HashMap<String, usize>,
}

impl SeasonStatsTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, StatsTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StatsTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<StatsRow>() {
            records.push(row?.into_record());
        }

        Ok(Self::from_records(records))
    }

    /// Later duplicates of a name are kept for search but never shadow the first.
    pub fn from_records(records: Vec<PlayerStatRecord>) -> Self {
        let mut by_name = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            by_name.entry(normalize_name(&record.name)).or_insert(index);
        }
        Self { records, by_name }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, player_name: &str) -> Option<&PlayerStatRecord> {
        self.by_name
            .get(&normalize_name(player_name))
            .and_then(|index| self.records.get(*index))
    }
}

impl StatSource for SeasonStatsTable {
    fn lookup(&self, player_name: &str) -> Result<Option<PlayerStatRecord>, LookupError> {
        Ok(self.get(player_name).cloned())
    }

    fn search(&self, query: &str) -> Result<Vec<PlayerStatRecord>, LookupError> {
        let needle = normalize_name(query);
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .records
            .iter()
            .filter(|record| normalize_name(&record.name).contains(&needle))
            .cloned()
            .collect())
    }
}

fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Deserialize)]
struct StatsRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "IDfg", default, deserialize_with = "blank_as_none")]
    external_id: Option<String>,
    #[serde(rename = "Role", default, deserialize_with = "blank_as_none")]
    role: Option<String>,
    #[serde(rename = "ERA", default, deserialize_with = "number")]
    era: Option<f64>,
    #[serde(rename = "WHIP", default, deserialize_with = "number")]
    whip: Option<f64>,
    #[serde(rename = "K%", default, deserialize_with = "rate")]
    k_pct: Option<f64>,
    #[serde(rename = "BB%", default, deserialize_with = "rate")]
    bb_pct: Option<f64>,
    #[serde(rename = "IP", default, deserialize_with = "number")]
    innings_pitched: Option<f64>,
    #[serde(rename = "FIP", default, deserialize_with = "number")]
    fip: Option<f64>,
    #[serde(rename = "xFIP", default, deserialize_with = "number")]
    xfip: Option<f64>,
    #[serde(rename = "K/9", default, deserialize_with = "number")]
    k_per_9: Option<f64>,
    #[serde(rename = "GB%", default, deserialize_with = "rate")]
    gb_pct: Option<f64>,
    #[serde(rename = "HR%", default, deserialize_with = "rate")]
    hr_pct: Option<f64>,
    #[serde(rename = "WPA/LI", default, deserialize_with = "number")]
    wpa_li: Option<f64>,
    #[serde(rename = "SV", default, deserialize_with = "number")]
    saves: Option<f64>,
    #[serde(rename = "HLD", default, deserialize_with = "number")]
    holds: Option<f64>,
}

impl StatsRow {
    fn into_record(self) -> PlayerStatRecord {
        let role = self
            .role
            .as_deref()
            .and_then(PitcherRole::parse)
            .unwrap_or(PitcherRole::Starter);

        PlayerStatRecord {
            name: self.name.trim().to_string(),
            external_id: self.external_id,
            role,
            era: self.era,
            whip: self.whip,
            k_pct: self.k_pct,
            bb_pct: self.bb_pct,
            innings_pitched: self.innings_pitched,
            fip: self.fip,
            xfip: self.xfip,
            k_per_9: self.k_per_9,
            gb_pct: self.gb_pct,
            hr_pct: self.hr_pct,
            wpa_li: self.wpa_li,
            saves: self.saves.map(|value| value.max(0.0).round() as u32),
            holds: self.holds.map(|value| value.max(0.0).round() as u32),
        }
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    blank_as_none(deserializer)?
        .map(|raw| parse_number(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

/// Rates are stored as fractions; `27.5%` and `0.275` both read as 0.275.
fn rate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    blank_as_none(deserializer)?
        .map(|raw| match raw.strip_suffix('%') {
            Some(percent) => parse_number(percent).map(|value| value / 100.0),
            None => parse_number(&raw),
        })
        .transpose()
        .map_err(serde::de::Error::custom)
}

fn parse_number(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| format!("'{raw}' is not a number ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
Name,IDfg,Role,ERA,WHIP,K%,BB%,IP,FIP,xFIP,K/9,GB%,HR%,WPA/LI,SV,HLD
Tarik Skubal,22267,SP,2.21,0.89,0.32,0.045,195.1,2.45,2.80,10.8,0.42,0.021,3.9,,
Emmanuel Clase,16137,RP,3.10,1.10,27.5%,6.0%,70.0,2.90,3.05,9.1,55%,1.8%,1.2,38,2
Blank Line Guy,,,,,,,,,,,,,,,
";

    #[test]
    fn parses_rates_blanks_and_roles() {
        let table = SeasonStatsTable::from_reader(Cursor::new(SAMPLE)).expect("parses");
        assert_eq!(table.len(), 3);

        let skubal = table.get("tarik skubal").expect("case-insensitive lookup");
        assert_eq!(skubal.role, PitcherRole::Starter);
        assert_eq!(skubal.k_pct, Some(0.32));
        assert_eq!(skubal.saves, None);

        let clase = table.get("  Emmanuel   Clase ").expect("whitespace-tolerant lookup");
        assert_eq!(clase.role, PitcherRole::Reliever);
        assert!((clase.k_pct.expect("k%") - 0.275).abs() < 1e-9);
        assert!((clase.gb_pct.expect("gb%") - 0.55).abs() < 1e-9);
        assert_eq!(clase.saves, Some(38));
        assert_eq!(clase.holds, Some(2));

        let blank = table.get("Blank Line Guy").expect("row kept");
        assert_eq!(blank.era, None);
        assert_eq!(blank.external_id, None);
    }

    #[test]
    fn huge_save_and_hold_counts_grade_without_overflow() {
        use crate::grading::domain::StatKind;
        use crate::grading::engine::{GradingConfig, GradingEngine};
        use crate::grading::profiles::{ProfileKey, ProfileRegistry};

        let csv = "Name,Role,ERA,SV,HLD\nBig Closer,RP,2.0,4294967295,1\n";
        let table = SeasonStatsTable::from_reader(Cursor::new(csv)).expect("parses");
        let record = table.lookup("Big Closer").expect("lookup").expect("row present");
        assert_eq!(record.saves, Some(u32::MAX));
        assert_eq!(
            record.value(StatKind::SavesHolds),
            Some(f64::from(u32::MAX) + 1.0)
        );

        let registry = ProfileRegistry::standard();
        let clutch = registry.get(ProfileKey::Clutch).expect("clutch profile");
        let grade = GradingEngine::new(GradingConfig::default()).grade(&record, clutch);
        assert!((0.0..=100.0).contains(&grade.score));
    }

    #[test]
    fn rejects_non_numeric_cells() {
        let csv = "Name,ERA\nBroken,abc\n";
        let err = SeasonStatsTable::from_reader(Cursor::new(csv)).expect_err("bad number");
        assert!(matches!(err, StatsTableError::Csv(_)));
    }

    #[test]
    fn search_matches_substrings_in_table_order() {
        let table = SeasonStatsTable::from_reader(Cursor::new(SAMPLE)).expect("parses");
        let hits = table.search("cla").expect("search works");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Emmanuel Clase");
        assert!(table.search("   ").expect("blank search").is_empty());
        assert!(table.lookup("Nobody").expect("lookup works").is_none());
    }
}
