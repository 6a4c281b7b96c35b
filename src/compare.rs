use crate::dataset::{Dataset, PlayerBio, PlayerId, SeasonLog};
use crate::format::{fixed_or_na, plain_or_na, text_or_na};

/// Rows of the side-by-side table, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKey {
    GamesPlayed,
    Minutes,
    Points,
    Assists,
    Rebounds,
    FieldGoalPct,
    ThreePointPct,
    FreeThrowPct,
}

impl StatKey {
    pub const ALL: [StatKey; 8] = [
        StatKey::GamesPlayed,
        StatKey::Minutes,
        StatKey::Points,
        StatKey::Assists,
        StatKey::Rebounds,
        StatKey::FieldGoalPct,
        StatKey::ThreePointPct,
        StatKey::FreeThrowPct,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatKey::GamesPlayed => "Games Played",
            StatKey::Minutes => "Minutes/Game",
            StatKey::Points => "Points/Game",
            StatKey::Assists => "Assists/Game",
            StatKey::Rebounds => "Rebounds/Game",
            StatKey::FieldGoalPct => "FG%",
            StatKey::ThreePointPct => "3P%",
            StatKey::FreeThrowPct => "FT%",
        }
    }

    /// Column name in the season logs.
    pub fn column(self) -> &'static str {
        match self {
            StatKey::GamesPlayed => "GP",
            StatKey::Minutes => "MP",
            StatKey::Points => "PTS",
            StatKey::Assists => "AST",
            StatKey::Rebounds => "TRB",
            StatKey::FieldGoalPct => "FG%",
            StatKey::ThreePointPct => "3P%",
            StatKey::FreeThrowPct => "FTP",
        }
    }

    pub fn value(self, log: &SeasonLog) -> Option<f64> {
        match self {
            StatKey::GamesPlayed => log.gp,
            StatKey::Minutes => log.mp,
            StatKey::Points => log.pts,
            StatKey::Assists => log.ast,
            StatKey::Rebounds => log.trb,
            StatKey::FieldGoalPct => log.fg_pct,
            StatKey::ThreePointPct => log.tp_pct,
            StatKey::FreeThrowPct => log.ft_pct,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompareCard {
    pub player_id: PlayerId,
    pub name: String,
    pub team: String,
    pub height: String,
    pub weight: String,
    pub birth_date: String,
    pub hometown: String,
    pub high_school: String,
    pub photo_url: Option<String>,
}

impl CompareCard {
    fn from_bio(bio: &PlayerBio) -> Self {
        Self {
            player_id: bio.player_id,
            name: bio.full_name(),
            team: text_or_na(bio.current_team.as_deref()),
            height: format!("{} in", plain_or_na(bio.height)),
            weight: format!("{} lbs", plain_or_na(bio.weight)),
            birth_date: text_or_na(bio.birth_date.as_deref()),
            hometown: format!(
                "{}, {}",
                text_or_na(bio.home_town.as_deref()),
                text_or_na(bio.home_state.as_deref())
            ),
            high_school: text_or_na(bio.high_school.as_deref()),
            photo_url: bio.photo_url.clone(),
        }
    }

    /// Labelled lines in the order the card shows them.
    pub fn lines(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Height", self.height.as_str()),
            ("Weight", self.weight.as_str()),
            ("Birthdate", self.birth_date.as_str()),
            ("Hometown", self.hometown.as_str()),
            ("High School", self.high_school.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompareRow {
    pub key: StatKey,
    pub label: &'static str,
    /// One cell per player, same order as [`ComparisonView::players`].
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonView {
    pub players: Vec<CompareCard>,
    pub rows: Vec<CompareRow>,
}

impl ComparisonView {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Cards and latest-season table for the requested players.
///
/// Columns follow `ids` order; unknown ids are skipped and repeats collapse
/// onto their first occurrence.
pub fn build_comparison(dataset: &Dataset, ids: &[PlayerId]) -> ComparisonView {
    let mut seen: Vec<PlayerId> = Vec::new();
    let mut players: Vec<(&PlayerBio, Option<&SeasonLog>)> = Vec::new();
    for id in ids {
        if seen.contains(id) {
            continue;
        }
        seen.push(*id);
        if let Some(bio) = dataset.bio(*id) {
            players.push((bio, dataset.latest_season_log(*id)));
        }
    }

    let rows = StatKey::ALL
        .into_iter()
        .map(|key| CompareRow {
            key,
            label: key.label(),
            cells: players
                .iter()
                .map(|(_, latest)| stat_cell(*latest, key))
                .collect(),
        })
        .collect();

    ComparisonView {
        players: players.iter().map(|(bio, _)| CompareCard::from_bio(bio)).collect(),
        rows,
    }
}

fn stat_cell(latest: Option<&SeasonLog>, key: StatKey) -> String {
    fixed_or_na(latest.and_then(|log| key.value(log)), 1)
}
