use metrics_exporter_prometheus::PrometheusHandle;
use pitchgrade::config::AppConfig;
use pitchgrade::error::AppError;
use pitchgrade::grading::{
    GradingService, RosterEntry, RosterError, RosterRepository, SeasonStatsTable, TeamId,
};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

pub(crate) type ApiGradingService = GradingService<SeasonStatsTable, InMemoryRosterRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Season table bundled for local runs and demos. Rates are fractions.
pub(crate) const SEED_STATS_CSV: &str = "\
Name,IDfg,Role,ERA,WHIP,K%,BB%,IP,FIP,xFIP,K/9,GB%,HR%,WPA/LI,SV,HLD
Tarik Skubal,22267,SP,2.39,0.92,0.306,0.046,192.0,2.49,2.82,10.7,0.43,0.021,3.6,,
Chris Sale,10603,SP,2.38,1.01,0.321,0.056,177.2,2.09,2.70,11.4,0.42,0.016,3.1,,
Zack Wheeler,10310,SP,2.57,0.96,0.282,0.068,200.0,3.13,3.28,9.9,0.41,0.026,2.9,,
Paul Skenes,33677,SP,1.96,0.95,0.330,0.058,133.0,2.44,2.78,11.5,0.48,0.018,2.7,,
Logan Webb,17995,SP,3.47,1.25,0.202,0.054,204.2,3.10,3.01,7.6,0.57,0.021,1.4,,
Corbin Burnes,19361,SP,2.92,1.10,0.220,0.067,194.1,3.55,3.59,8.4,0.49,0.027,2.3,,
Framber Valdez,17295,SP,2.91,1.12,0.235,0.077,176.2,3.24,3.08,8.8,0.59,0.024,2.0,,
Cole Ragans,22251,SP,3.14,1.14,0.291,0.089,186.1,2.99,3.40,10.8,0.42,0.022,2.2,,
Dylan Cease,18525,SP,3.47,1.07,0.294,0.090,189.1,3.10,3.41,10.8,0.39,0.024,1.6,,
Seth Lugo,13053,SP,3.00,1.09,0.200,0.055,206.2,3.25,3.82,7.5,0.45,0.020,2.4,,
Hunter Greene,24326,SP,2.75,1.02,0.278,0.087,150.1,3.83,3.90,10.3,0.37,0.031,2.0,,
Jordan Hicks,13523,SP,4.10,1.38,0.196,0.097,109.2,4.12,4.05,7.4,0.52,0.024,-0.3,,
Kyle Gibson,11784,SP,4.24,1.37,0.202,0.094,169.2,4.36,4.30,8.0,0.46,0.033,-0.1,,
Patrick Corbin,9323,SP,5.62,1.48,0.176,0.082,174.2,5.13,4.80,6.7,0.42,0.040,-2.0,,
Emmanuel Clase,16137,RP,0.61,0.66,0.264,0.037,74.1,1.79,2.90,8.1,0.59,0.012,5.4,47,0
Ryan Helsley,18138,RP,2.04,1.10,0.277,0.099,66.1,2.86,3.38,10.7,0.40,0.016,3.1,49,0
Josh Hader,13495,RP,3.80,1.12,0.342,0.097,66.1,3.56,3.00,13.4,0.31,0.034,0.7,34,0
Jhoan Duran,20005,RP,3.64,1.08,0.284,0.066,64.1,2.84,2.94,10.2,0.54,0.017,0.4,23,8
Tanner Scott,16149,RP,1.75,1.09,0.271,0.121,72.0,3.02,3.66,10.1,0.57,0.010,2.6,22,9
";

/// Seed memberships as `(team id, player name, roster position)`.
const SEED_ROSTERS: &[(u64, &str, &str)] = &[
    (1, "Tarik Skubal", "SP"),
    (1, "Logan Webb", "SP"),
    (1, "Cole Ragans", "SP"),
    (1, "Jordan Hicks", "SP"),
    (1, "Kyle Gibson", "SP"),
    (1, "Emmanuel Clase", "RP"),
    (1, "Josh Hader", "RP"),
    (2, "Zack Wheeler", "SP"),
    (2, "Framber Valdez", "SP"),
    (2, "Seth Lugo", "SP"),
    (2, "Patrick Corbin", "SP"),
    (2, "Ryan Helsley", "RP"),
    (2, "Tanner Scott", "RP"),
    (3, "Chris Sale", "SP"),
    (3, "Paul Skenes", "SP"),
    (3, "Corbin Burnes", "SP"),
    (3, "Dylan Cease", "SP"),
    (3, "Hunter Greene", "SP"),
    (3, "Jhoan Duran", "RP"),
];

#[derive(Default, Clone)]
pub(crate) struct InMemoryRosterRepository {
    teams: Arc<Mutex<HashMap<TeamId, Vec<RosterEntry>>>>,
}

impl InMemoryRosterRepository {
    pub(crate) fn seeded() -> Self {
        let repository = Self::default();
        for (team_id, player_name, position) in SEED_ROSTERS {
            repository.add(
                TeamId(*team_id),
                RosterEntry::new(*player_name, Some(*position)),
            );
        }
        repository
    }

    /// Reads `team_id,player_name,position` rows; position may be blank.
    pub(crate) fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let repository = Self::default();
        for row in csv_reader.deserialize::<RosterRow>() {
            let row = row?;
            repository.add(
                TeamId(row.team_id),
                RosterEntry::new(row.player_name, row.position.as_deref()),
            );
        }
        Ok(repository)
    }

    pub(crate) fn from_path(path: &Path) -> Result<Self, AppError> {
        let file = std::fs::File::open(path)?;
        Ok(Self::from_reader(file)?)
    }

    pub(crate) fn add(&self, team_id: TeamId, entry: RosterEntry) {
        let mut guard = match self.teams.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.entry(team_id).or_default().push(entry);
    }

    pub(crate) fn team_count(&self) -> usize {
        self.teams.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl RosterRepository for InMemoryRosterRepository {
    fn roster(&self, team_id: TeamId) -> Result<Vec<RosterEntry>, RosterError> {
        let guard = self
            .teams
            .lock()
            .map_err(|_| RosterError::Unavailable("roster store lock poisoned".to_string()))?;
        guard
            .get(&team_id)
            .cloned()
            .ok_or(RosterError::NotFound(team_id))
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    team_id: u64,
    player_name: String,
    #[serde(default, deserialize_with = "deserialize_blank_as_none")]
    position: Option<String>,
}

fn deserialize_blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

pub(crate) fn load_stats(config: &AppConfig) -> Result<SeasonStatsTable, AppError> {
    let table = match &config.data.stats_csv {
        Some(path) => SeasonStatsTable::from_path(path)?,
        None => SeasonStatsTable::from_reader(Cursor::new(SEED_STATS_CSV))?,
    };
    let source = config
        .data
        .stats_csv
        .as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "seed".to_string());
    info!(pitchers = table.len(), %source, "season stats loaded");
    Ok(table)
}

pub(crate) fn load_rosters(config: &AppConfig) -> Result<InMemoryRosterRepository, AppError> {
    let rosters = match &config.data.rosters_csv {
        Some(path) => InMemoryRosterRepository::from_path(path)?,
        None => InMemoryRosterRepository::seeded(),
    };
    info!(teams = rosters.team_count(), "rosters loaded");
    Ok(rosters)
}

pub(crate) fn build_grading_service(config: &AppConfig) -> Result<ApiGradingService, AppError> {
    let stats = load_stats(config)?;
    let rosters = load_rosters(config)?;
    Ok(GradingService::new(
        Arc::new(stats),
        Arc::new(rosters),
        config.grading.clone(),
    ))
}
