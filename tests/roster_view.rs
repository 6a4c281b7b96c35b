use std::path::PathBuf;

use draft_board::dataset::Dataset;
use draft_board::rank::Scout;
use draft_board::roster::{
    build_roster, CompareSelection, RosterQuery, SelectionChange, SortMode,
};
use draft_board::routes::Route;

fn fixture() -> Dataset {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/draft_dataset.json");
    Dataset::load(&path).expect("fixture should load")
}

fn ids(data: &Dataset, query: &RosterQuery) -> Vec<u32> {
    build_roster(data, query).iter().map(|e| e.player_id()).collect()
}

fn sorted(mode: SortMode) -> RosterQuery {
    RosterQuery {
        sort: mode,
        ..RosterQuery::default()
    }
}

#[test]
fn default_sort_is_average_rank_with_unranked_last() {
    let data = fixture();
    assert_eq!(ids(&data, &RosterQuery::default()), vec![5, 1, 6, 2, 9, 3, 4]);

    let roster = build_roster(&data, &RosterQuery::default());
    assert_eq!(roster[1].avg_rank_label(), "4.0");
    assert!(!roster[6].is_ranked());
    assert_eq!(roster[6].avg_rank_label(), "Infinity");
}

#[test]
fn search_is_case_insensitive_substring_on_full_name() {
    let data = fixture();
    let query = RosterQuery {
        search: "jo".to_string(),
        ..RosterQuery::default()
    };
    let names = build_roster(&data, &query)
        .iter()
        .map(|e| e.full_name())
        .collect::<Vec<_>>();
    assert!(names.contains(&"John Smith".to_string()));
    assert!(names.contains(&"Joanna Lee".to_string()));
    assert!(!names.contains(&"Mark Evans".to_string()));

    let query = RosterQuery {
        search: "N SMI".to_string(),
        ..RosterQuery::default()
    };
    assert_eq!(ids(&data, &query), vec![1]);
}

#[test]
fn empty_search_keeps_everyone() {
    let data = fixture();
    assert_eq!(build_roster(&data, &RosterQuery::default()).len(), data.bios().len());
}

#[test]
fn scout_filter_keeps_numeric_top_ten_only() {
    let data = fixture();
    let query = RosterQuery {
        scout_filter: Some(Scout::Espn),
        ..RosterQuery::default()
    };
    // ESPN 12 is out, ESPN 10 is in.
    assert_eq!(ids(&data, &query), vec![5, 1, 6, 9]);

    // Kyle Boone's "8" is text, so only the numeric 2 qualifies.
    let query = RosterQuery {
        scout_filter: Some(Scout::KyleBoone),
        ..RosterQuery::default()
    };
    assert_eq!(ids(&data, &query), vec![5]);
}

#[test]
fn search_and_filter_combine() {
    let data = fixture();
    let query = RosterQuery {
        search: "jo".to_string(),
        scout_filter: Some(Scout::Espn),
        sort: SortMode::AverageRank,
    };
    assert_eq!(ids(&data, &query), vec![1, 9]);
}

#[test]
fn height_sorts_put_missing_last() {
    let data = fixture();
    assert_eq!(ids(&data, &sorted(SortMode::HeightAsc)), vec![2, 6, 5, 1, 9, 4, 3]);
    assert_eq!(ids(&data, &sorted(SortMode::HeightDesc)), vec![4, 1, 9, 5, 6, 2, 3]);
}

#[test]
fn age_sorts_put_missing_birth_dates_last() {
    let data = fixture();
    assert_eq!(
        ids(&data, &sorted(SortMode::AgeYoungestFirst)),
        vec![3, 4, 1, 5, 2, 9, 6]
    );
    assert_eq!(
        ids(&data, &sorted(SortMode::AgeOldestFirst)),
        vec![9, 2, 5, 1, 4, 3, 6]
    );
}

#[test]
fn sort_modes_cycle_through_all() {
    let mut mode = SortMode::default();
    let mut seen = vec![mode];
    for _ in 0..4 {
        mode = mode.cycle();
        seen.push(mode);
    }
    assert_eq!(seen, SortMode::ALL.to_vec());
    assert_eq!(mode.cycle(), SortMode::AverageRank);
    assert_eq!(SortMode::from_key("heightdesc"), Some(SortMode::HeightDesc));
    assert_eq!(SortMode::from_key("weight"), None);
}

#[test]
fn compare_selection_caps_at_two() {
    let mut selection = CompareSelection::default();
    assert_eq!(selection.toggle(5), SelectionChange::Added);
    assert!(selection.compare_request().is_none());
    assert_eq!(selection.toggle(9), SelectionChange::Added);
    assert!(selection.is_locked(1));
    assert!(!selection.is_locked(5));

    assert_eq!(selection.toggle(1), SelectionChange::Rejected);
    assert_eq!(selection.ids(), &[5, 9]);
    assert_eq!(selection.compare_request(), Some(Route::Compare(vec![5, 9])));

    assert_eq!(selection.toggle(5), SelectionChange::Removed);
    assert_eq!(selection.ids(), &[9]);
    assert!(!selection.is_locked(1));
    assert!(selection.compare_request().is_none());
}
