use crate::dataset::{Dataset, Measurements, PlayerBio, PlayerId, SeasonLog, StatCell};
use crate::format::{fixed_or_na, plain_or_na, text_or_na, to_fixed, NOT_AVAILABLE};

pub const PLAYER_NOT_FOUND: &str = "Player not found";
pub const NO_STATS: &str = "No stats available.";
pub const NO_FULL_STATS: &str = "No full stats available.";
pub const NO_MEASUREMENTS: &str = "No measurement data available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatMode {
    #[default]
    PerGame,
    Totals,
}

impl StatMode {
    pub fn toggle(self) -> StatMode {
        match self {
            StatMode::PerGame => StatMode::Totals,
            StatMode::Totals => StatMode::PerGame,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatMode::PerGame => "Per Game",
            StatMode::Totals => "Season Totals",
        }
    }
}

/// Either the rows of a disclosure panel or the message shown instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Rows(Vec<(String, String)>),
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView<'a> {
    pub bio: &'a PlayerBio,
    /// First season row for the player in dataset order.
    pub season: Option<&'a SeasonLog>,
    pub measurements: Option<&'a Measurements>,
}

/// `None` renders the "player not found" page.
pub fn build_profile(dataset: &Dataset, id: Option<PlayerId>) -> Option<ProfileView<'_>> {
    let id = id?;
    let bio = dataset.bio(id)?;
    Some(ProfileView {
        bio,
        season: dataset.first_season_log(id),
        measurements: dataset.measurements(id),
    })
}

/// Season total from a per-game figure, to one decimal.
pub fn season_total(per_game: f64, games: f64) -> String {
    to_fixed(per_game * games, 1)
}

impl ProfileView<'_> {
    pub fn name(&self) -> String {
        self.bio.full_name()
    }

    pub fn headline(&self) -> String {
        format!(
            "{} | {}",
            text_or_na(self.bio.current_team.as_deref()),
            text_or_na(self.bio.league.as_deref())
        )
    }

    pub fn bio_lines(&self) -> Vec<(&'static str, String)> {
        let bio = self.bio;
        vec![
            ("Height", format!("{} in", plain_or_na(bio.height))),
            ("Weight", format!("{} lbs", plain_or_na(bio.weight))),
            ("Birthdate", text_or_na(bio.birth_date.as_deref())),
            (
                "Hometown",
                format!(
                    "{}, {}",
                    text_or_na(bio.home_town.as_deref()),
                    text_or_na(bio.home_state.as_deref())
                ),
            ),
            (
                "High School",
                format!(
                    "{}, {}",
                    text_or_na(bio.high_school.as_deref()),
                    text_or_na(bio.high_school_state.as_deref())
                ),
            ),
            ("Nationality", text_or_na(bio.nationality.as_deref())),
        ]
    }

    /// Games, points, rebounds and assists in the chosen mode.
    pub fn season_stats(&self, mode: StatMode) -> Panel {
        let Some(log) = self.season else {
            return Panel::Empty(NO_STATS);
        };
        let scaled = |per_game: Option<f64>| match mode {
            StatMode::PerGame => fixed_or_na(per_game, 1),
            StatMode::Totals => match (per_game, log.gp) {
                (Some(v), Some(gp)) => season_total(v, gp),
                _ => NOT_AVAILABLE.to_string(),
            },
        };
        Panel::Rows(vec![
            ("Games Played".to_string(), plain_or_na(log.gp)),
            ("Points".to_string(), scaled(log.pts)),
            ("Rebounds".to_string(), scaled(log.trb)),
            ("Assists".to_string(), scaled(log.ast)),
        ])
    }

    pub fn full_stats(&self) -> Panel {
        let Some(log) = self.season else {
            return Panel::Empty(NO_FULL_STATS);
        };
        Panel::Rows(
            log.fields()
                .into_iter()
                .map(|(key, cell)| {
                    let value = match cell {
                        StatCell::Number(v) => to_fixed(v, 1),
                        StatCell::Text(s) => s,
                        StatCell::Missing => NOT_AVAILABLE.to_string(),
                    };
                    (key.to_string(), value)
                })
                .collect(),
        )
    }

    pub fn measurement_rows(&self) -> Panel {
        let Some(m) = self.measurements else {
            return Panel::Empty(NO_MEASUREMENTS);
        };
        Panel::Rows(
            m.fields()
                .into_iter()
                .map(|(key, value)| (key.to_string(), plain_or_na(value)))
                .collect(),
        )
    }
}
