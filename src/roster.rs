use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::dataset::{Dataset, PlayerBio, PlayerId};
use crate::format::to_fixed;
use crate::rank::{average_rank, scout_marks, Scout, ScoutMark, ScoutRanking};
use crate::routes::Route;

/// Scout rank (inclusive) a player must reach to pass the top-10 filter.
pub const SCOUT_FILTER_CUTOFF: f64 = 10.0;

/// Players that can be lined up on the comparison page at once.
pub const COMPARE_LIMIT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    AverageRank,
    HeightAsc,
    HeightDesc,
    AgeYoungestFirst,
    AgeOldestFirst,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::AverageRank,
        SortMode::HeightAsc,
        SortMode::HeightDesc,
        SortMode::AgeYoungestFirst,
        SortMode::AgeOldestFirst,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortMode::AverageRank => "Average Rank",
            SortMode::HeightAsc => "Height: Shortest to Tallest",
            SortMode::HeightDesc => "Height: Tallest to Shortest",
            SortMode::AgeYoungestFirst => "Age: Youngest to Oldest",
            SortMode::AgeOldestFirst => "Age: Oldest to Youngest",
        }
    }

    /// Short key accepted on the command line.
    pub fn key(self) -> &'static str {
        match self {
            SortMode::AverageRank => "avgRank",
            SortMode::HeightAsc => "heightAsc",
            SortMode::HeightDesc => "heightDesc",
            SortMode::AgeYoungestFirst => "ageAsc",
            SortMode::AgeOldestFirst => "ageDesc",
        }
    }

    pub fn from_key(raw: &str) -> Option<SortMode> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.key().eq_ignore_ascii_case(raw.trim()))
    }

    pub fn cycle(self) -> SortMode {
        match self {
            SortMode::AverageRank => SortMode::HeightAsc,
            SortMode::HeightAsc => SortMode::HeightDesc,
            SortMode::HeightDesc => SortMode::AgeYoungestFirst,
            SortMode::AgeYoungestFirst => SortMode::AgeOldestFirst,
            SortMode::AgeOldestFirst => SortMode::AverageRank,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RosterQuery {
    pub search: String,
    pub scout_filter: Option<Scout>,
    pub sort: SortMode,
}

/// One card on the big board.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry<'a> {
    pub bio: &'a PlayerBio,
    pub ranking: Option<&'a ScoutRanking>,
    pub avg_rank: f64,
}

impl RosterEntry<'_> {
    pub fn player_id(&self) -> PlayerId {
        self.bio.player_id
    }

    pub fn full_name(&self) -> String {
        self.bio.full_name()
    }

    pub fn is_ranked(&self) -> bool {
        self.avg_rank.is_finite()
    }

    /// Average rank to one decimal (`Infinity` when unranked).
    pub fn avg_rank_label(&self) -> String {
        to_fixed(self.avg_rank, 1)
    }

    pub fn scout_marks(&self) -> Vec<ScoutMark> {
        scout_marks(self.ranking, self.avg_rank)
    }
}

/// Join, filter, and sort the board for `query`. Fully recomputed per call.
pub fn build_roster<'a>(dataset: &'a Dataset, query: &RosterQuery) -> Vec<RosterEntry<'a>> {
    let entries = join_rankings(dataset);
    let mut entries = filter_entries(entries, query);
    sort_entries(&mut entries, query.sort);
    entries
}

pub fn join_rankings(dataset: &Dataset) -> Vec<RosterEntry<'_>> {
    dataset
        .bios()
        .iter()
        .map(|bio| {
            let ranking = dataset.ranking(bio.player_id);
            RosterEntry {
                bio,
                ranking,
                avg_rank: average_rank(ranking),
            }
        })
        .collect()
}

pub fn filter_entries<'a>(entries: Vec<RosterEntry<'a>>, query: &RosterQuery) -> Vec<RosterEntry<'a>> {
    let needle = query.search.to_lowercase();
    entries
        .into_iter()
        .filter(|entry| matches_search(entry.bio, &needle))
        .filter(|entry| match query.scout_filter {
            Some(scout) => passes_scout_cutoff(entry.ranking, scout),
            None => true,
        })
        .collect()
}

/// Stable sort; equal keys keep their board order.
pub fn sort_entries(entries: &mut [RosterEntry<'_>], mode: SortMode) {
    match mode {
        SortMode::AverageRank => entries.sort_by(|a, b| a.avg_rank.total_cmp(&b.avg_rank)),
        SortMode::HeightAsc => {
            entries.sort_by(|a, b| missing_last(a.bio.height, b.bio.height, cmp_f64))
        }
        SortMode::HeightDesc => {
            entries.sort_by(|a, b| missing_last(a.bio.height, b.bio.height, |x, y| cmp_f64(y, x)))
        }
        SortMode::AgeYoungestFirst => entries.sort_by(|a, b| {
            missing_last(birth_instant(a.bio), birth_instant(b.bio), |x, y| y.cmp(&x))
        }),
        SortMode::AgeOldestFirst => entries.sort_by(|a, b| {
            missing_last(birth_instant(a.bio), birth_instant(b.bio), |x, y| x.cmp(&y))
        }),
    }
}

fn matches_search(bio: &PlayerBio, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    bio.full_name().to_lowercase().contains(needle_lower)
}

fn passes_scout_cutoff(ranking: Option<&ScoutRanking>, scout: Scout) -> bool {
    ranking
        .and_then(|r| r.get(scout).strict())
        .is_some_and(|rank| rank <= SCOUT_FILTER_CUTOFF)
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn missing_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Birth date as a comparable instant; accepts a bare date, a naive
/// timestamp, or RFC 3339.
pub fn birth_instant(bio: &PlayerBio) -> Option<NaiveDateTime> {
    let raw = bio.birth_date.as_deref()?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    const FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Players ticked for comparison, in the order they were ticked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompareSelection {
    ids: Vec<PlayerId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    /// Selection was already full; nothing changed.
    Rejected,
}

impl CompareSelection {
    pub fn toggle(&mut self, id: PlayerId) -> SelectionChange {
        if let Some(pos) = self.ids.iter().position(|x| *x == id) {
            self.ids.remove(pos);
            return SelectionChange::Removed;
        }
        if self.ids.len() >= COMPARE_LIMIT {
            return SelectionChange::Rejected;
        }
        self.ids.push(id);
        SelectionChange::Added
    }

    pub fn is_selected(&self, id: PlayerId) -> bool {
        self.ids.contains(&id)
    }

    /// True when the player's checkbox should be disabled.
    pub fn is_locked(&self, id: PlayerId) -> bool {
        !self.is_selected(id) && self.ids.len() >= COMPARE_LIMIT
    }

    pub fn ids(&self) -> &[PlayerId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Navigation request for the comparison page, only once the selection is full.
    pub fn compare_request(&self) -> Option<Route> {
        (self.ids.len() == COMPARE_LIMIT).then(|| Route::Compare(self.ids.clone()))
    }
}
