use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::rank::ScoutRanking;

pub type PlayerId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBio {
    #[serde(default)]
    pub name: Option<String>,
    pub player_id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    /// Inches.
    #[serde(default, deserialize_with = "de_loose_number")]
    pub height: Option<f64>,
    /// Pounds.
    #[serde(default, deserialize_with = "de_loose_number")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub high_school: Option<String>,
    #[serde(default)]
    pub high_school_state: Option<String>,
    #[serde(default)]
    pub home_town: Option<String>,
    #[serde(default)]
    pub home_state: Option<String>,
    #[serde(default)]
    pub home_country: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub current_team: Option<String>,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub league_type: Option<String>,
}

impl PlayerBio {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A season row value as rendered by the full-stats panel.
#[derive(Debug, Clone, PartialEq)]
pub enum StatCell {
    Number(f64),
    Text(String),
    Missing,
}

impl StatCell {
    fn number(value: Option<f64>) -> StatCell {
        value.map(StatCell::Number).unwrap_or(StatCell::Missing)
    }

    fn text(value: &Option<String>) -> StatCell {
        value.clone().map(StatCell::Text).unwrap_or(StatCell::Missing)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SeasonLog {
    #[serde(rename = "playerId")]
    pub player_id: PlayerId,
    #[serde(default, deserialize_with = "de_loose_text")]
    pub age: Option<String>,
    #[serde(rename = "Season", default, deserialize_with = "de_loose_season")]
    pub season: Option<i32>,
    #[serde(rename = "League", default)]
    pub league: Option<String>,
    #[serde(rename = "Team", default)]
    pub team: Option<String>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub w: Option<f64>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub l: Option<f64>,
    #[serde(rename = "GP", default, deserialize_with = "de_loose_number")]
    pub gp: Option<f64>,
    #[serde(rename = "GS", default, deserialize_with = "de_loose_number")]
    pub gs: Option<f64>,
    #[serde(rename = "MP", default, deserialize_with = "de_loose_number")]
    pub mp: Option<f64>,
    #[serde(rename = "FGM", default, deserialize_with = "de_loose_number")]
    pub fgm: Option<f64>,
    #[serde(rename = "FGA", default, deserialize_with = "de_loose_number")]
    pub fga: Option<f64>,
    #[serde(rename = "FG%", default, deserialize_with = "de_loose_number")]
    pub fg_pct: Option<f64>,
    #[serde(rename = "FG2M", default, deserialize_with = "de_loose_number")]
    pub fg2m: Option<f64>,
    #[serde(rename = "FG2A", default, deserialize_with = "de_loose_number")]
    pub fg2a: Option<f64>,
    #[serde(rename = "FG2%", default, deserialize_with = "de_loose_number")]
    pub fg2_pct: Option<f64>,
    #[serde(rename = "eFG%", default, deserialize_with = "de_loose_number")]
    pub efg_pct: Option<f64>,
    #[serde(rename = "3PM", default, deserialize_with = "de_loose_number")]
    pub tpm: Option<f64>,
    #[serde(rename = "3PA", default, deserialize_with = "de_loose_number")]
    pub tpa: Option<f64>,
    #[serde(rename = "3P%", default, deserialize_with = "de_loose_number")]
    pub tp_pct: Option<f64>,
    #[serde(rename = "FT", default, deserialize_with = "de_loose_number")]
    pub ft: Option<f64>,
    #[serde(rename = "FTA", default, deserialize_with = "de_loose_number")]
    pub fta: Option<f64>,
    #[serde(rename = "FTP", default, deserialize_with = "de_loose_number")]
    pub ft_pct: Option<f64>,
    #[serde(rename = "ORB", default, deserialize_with = "de_loose_number")]
    pub orb: Option<f64>,
    #[serde(rename = "DRB", default, deserialize_with = "de_loose_number")]
    pub drb: Option<f64>,
    #[serde(rename = "TRB", default, deserialize_with = "de_loose_number")]
    pub trb: Option<f64>,
    #[serde(rename = "AST", default, deserialize_with = "de_loose_number")]
    pub ast: Option<f64>,
    #[serde(rename = "STL", default, deserialize_with = "de_loose_number")]
    pub stl: Option<f64>,
    #[serde(rename = "BLK", default, deserialize_with = "de_loose_number")]
    pub blk: Option<f64>,
    #[serde(rename = "TOV", default, deserialize_with = "de_loose_number")]
    pub tov: Option<f64>,
    #[serde(rename = "PF", default, deserialize_with = "de_loose_number")]
    pub pf: Option<f64>,
    #[serde(rename = "PTS", default, deserialize_with = "de_loose_number")]
    pub pts: Option<f64>,
}

impl SeasonLog {
    /// Every column except `playerId`, keyed by its dataset name, in source order.
    pub fn fields(&self) -> Vec<(&'static str, StatCell)> {
        vec![
            ("age", StatCell::text(&self.age)),
            ("Season", StatCell::number(self.season.map(f64::from))),
            ("League", StatCell::text(&self.league)),
            ("Team", StatCell::text(&self.team)),
            ("w", StatCell::number(self.w)),
            ("l", StatCell::number(self.l)),
            ("GP", StatCell::number(self.gp)),
            ("GS", StatCell::number(self.gs)),
            ("MP", StatCell::number(self.mp)),
            ("FGM", StatCell::number(self.fgm)),
            ("FGA", StatCell::number(self.fga)),
            ("FG%", StatCell::number(self.fg_pct)),
            ("FG2M", StatCell::number(self.fg2m)),
            ("FG2A", StatCell::number(self.fg2a)),
            ("FG2%", StatCell::number(self.fg2_pct)),
            ("eFG%", StatCell::number(self.efg_pct)),
            ("3PM", StatCell::number(self.tpm)),
            ("3PA", StatCell::number(self.tpa)),
            ("3P%", StatCell::number(self.tp_pct)),
            ("FT", StatCell::number(self.ft)),
            ("FTA", StatCell::number(self.fta)),
            ("FTP", StatCell::number(self.ft_pct)),
            ("ORB", StatCell::number(self.orb)),
            ("DRB", StatCell::number(self.drb)),
            ("TRB", StatCell::number(self.trb)),
            ("AST", StatCell::number(self.ast)),
            ("STL", StatCell::number(self.stl)),
            ("BLK", StatCell::number(self.blk)),
            ("TOV", StatCell::number(self.tov)),
            ("PF", StatCell::number(self.pf)),
            ("PTS", StatCell::number(self.pts)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    pub player_id: PlayerId,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub height_no_shoes: Option<f64>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub height_shoes: Option<f64>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub wingspan: Option<f64>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub reach: Option<f64>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub max_vertical: Option<f64>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub no_step_vertical: Option<f64>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub body_fat: Option<f64>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub hand_length: Option<f64>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub hand_width: Option<f64>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub agility: Option<f64>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub sprint: Option<f64>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub shuttle_left: Option<f64>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub shuttle_right: Option<f64>,
    #[serde(default, deserialize_with = "de_loose_number")]
    pub shuttle_best: Option<f64>,
}

impl Measurements {
    pub fn fields(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("heightNoShoes", self.height_no_shoes),
            ("heightShoes", self.height_shoes),
            ("wingspan", self.wingspan),
            ("reach", self.reach),
            ("maxVertical", self.max_vertical),
            ("noStepVertical", self.no_step_vertical),
            ("weight", self.weight),
            ("bodyFat", self.body_fat),
            ("handLength", self.hand_length),
            ("handWidth", self.hand_width),
            ("agility", self.agility),
            ("sprint", self.sprint),
            ("shuttleLeft", self.shuttle_left),
            ("shuttleRight", self.shuttle_right),
            ("shuttleBest", self.shuttle_best),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoutingReport {
    pub scout: String,
    pub report_id: String,
    pub player_id: PlayerId,
    pub report: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct DatasetFile {
    #[serde(default)]
    bio: Vec<PlayerBio>,
    #[serde(default)]
    scout_rankings: Vec<ScoutRanking>,
    #[serde(default)]
    measurements: Vec<Measurements>,
    #[serde(default)]
    season_logs: Vec<SeasonLog>,
    #[serde(default)]
    scouting_reports: Vec<ScoutingReport>,
}

/// Read-only draft dataset, loaded once at startup.
///
/// Collections keep their source order; lookups by player resolve to the
/// first matching record.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    bios: Vec<PlayerBio>,
    rankings: Vec<ScoutRanking>,
    measurements: Vec<Measurements>,
    season_logs: Vec<SeasonLog>,
    reports: Vec<ScoutingReport>,
    bio_index: HashMap<PlayerId, usize>,
    ranking_index: HashMap<PlayerId, usize>,
    measurement_index: HashMap<PlayerId, usize>,
}

impl Dataset {
    pub fn new(
        bios: Vec<PlayerBio>,
        rankings: Vec<ScoutRanking>,
        measurements: Vec<Measurements>,
        season_logs: Vec<SeasonLog>,
        reports: Vec<ScoutingReport>,
    ) -> Self {
        let bio_index = first_index(bios.iter().map(|b| b.player_id));
        let ranking_index = first_index(rankings.iter().map(|r| r.player_id));
        let measurement_index = first_index(measurements.iter().map(|m| m.player_id));
        Self {
            bios,
            rankings,
            measurements,
            season_logs,
            reports,
            bio_index,
            ranking_index,
            measurement_index,
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let file: DatasetFile = serde_json::from_str(raw).context("invalid dataset json")?;
        Ok(Self::new(
            file.bio,
            file.scout_rankings,
            file.measurements,
            file.season_logs,
            file.scouting_reports,
        ))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read dataset {}", path.display()))?;
        let dataset = Self::from_json_str(&raw)
            .with_context(|| format!("parse dataset {}", path.display()))?;
        info!(
            path = %path.display(),
            players = dataset.bios.len(),
            rankings = dataset.rankings.len(),
            season_logs = dataset.season_logs.len(),
            reports = dataset.reports.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn bios(&self) -> &[PlayerBio] {
        &self.bios
    }

    pub fn rankings(&self) -> &[ScoutRanking] {
        &self.rankings
    }

    pub fn all_measurements(&self) -> &[Measurements] {
        &self.measurements
    }

    pub fn all_season_logs(&self) -> &[SeasonLog] {
        &self.season_logs
    }

    pub fn all_reports(&self) -> &[ScoutingReport] {
        &self.reports
    }

    pub fn bio(&self, id: PlayerId) -> Option<&PlayerBio> {
        self.bio_index.get(&id).and_then(|idx| self.bios.get(*idx))
    }

    pub fn ranking(&self, id: PlayerId) -> Option<&ScoutRanking> {
        self.ranking_index.get(&id).and_then(|idx| self.rankings.get(*idx))
    }

    pub fn measurements(&self, id: PlayerId) -> Option<&Measurements> {
        self.measurement_index
            .get(&id)
            .and_then(|idx| self.measurements.get(*idx))
    }

    pub fn season_logs(&self, id: PlayerId) -> impl Iterator<Item = &SeasonLog> + '_ {
        self.season_logs.iter().filter(move |s| s.player_id == id)
    }

    pub fn first_season_log(&self, id: PlayerId) -> Option<&SeasonLog> {
        self.season_logs(id).next()
    }

    /// Row with the highest `Season`; the earliest such row on ties. Rows
    /// without a season only win when nothing is dated.
    pub fn latest_season_log(&self, id: PlayerId) -> Option<&SeasonLog> {
        let mut latest: Option<&SeasonLog> = None;
        for row in self.season_logs(id) {
            match latest {
                None => latest = Some(row),
                Some(best) if row.season > best.season => latest = Some(row),
                Some(_) => {}
            }
        }
        latest
    }

    pub fn reports_for(&self, id: PlayerId) -> Vec<ScoutingReport> {
        self.reports
            .iter()
            .filter(|r| r.player_id == id)
            .cloned()
            .collect()
    }
}

fn first_index(ids: impl Iterator<Item = PlayerId>) -> HashMap<PlayerId, usize> {
    let mut index = HashMap::new();
    for (pos, id) in ids.enumerate() {
        index.entry(id).or_insert(pos);
    }
    index
}

fn de_loose_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// JSON numbers pass through, numeric strings are coerced, anything else
/// reads as missing so one bad cell does not reject the record.
fn de_loose_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(loose_number))
}

/// Season years, accepting whole floats such as `2025.0`.
fn de_loose_season<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(loose_number)
        .filter(|n| n.fract() == 0.0 && *n >= f64::from(i32::MIN) && *n <= f64::from(i32::MAX))
        .map(|n| n as i32))
}

fn loose_number(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}
