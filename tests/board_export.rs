use std::fs;
use std::path::PathBuf;

use draft_board::board_export::{board_rows, comparison_rows, export_board};
use draft_board::compare::build_comparison;
use draft_board::dataset::Dataset;
use draft_board::roster::{build_roster, RosterQuery};

fn fixture() -> Dataset {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/draft_dataset.json");
    Dataset::load(&path).expect("fixture should load")
}

#[test]
fn board_rows_follow_display_order() {
    let data = fixture();
    let entries = build_roster(&data, &RosterQuery::default());
    let rows = board_rows(&entries);
    assert_eq!(rows.len(), entries.len() + 1);
    assert_eq!(rows[0][0], "Board #");
    assert_eq!(rows[0][8], "ESPN Rank");
    assert_eq!(rows[1][2], "Alex Carter");
    assert_eq!(rows[1][7], "2.0");
    assert_eq!(rows[2][8], "#3");
    assert_eq!(rows[2][9], "#5");
    assert_eq!(rows[2][10], "");
    // Unranked players have no average.
    assert_eq!(rows[7][7], "N/A");
}

#[test]
fn comparison_rows_have_one_column_per_player() {
    let data = fixture();
    let view = build_comparison(&data, &[5, 9]);
    let rows = comparison_rows(&view);
    assert_eq!(rows[0], vec!["Stat", "Alex Carter", "Sam Jones"]);
    assert_eq!(rows.len(), 9);
    assert!(comparison_rows(&build_comparison(&data, &[])).is_empty());
}

#[test]
fn writes_a_workbook() {
    let data = fixture();
    let entries = build_roster(&data, &RosterQuery::default());
    let view = build_comparison(&data, &[1, 5]);
    let path = std::env::temp_dir().join(format!("draft_board_{}.xlsx", uuid::Uuid::new_v4()));

    let report = export_board(&path, &entries, Some(&view)).expect("export should succeed");
    assert_eq!(report.players, 7);
    assert_eq!(report.comparison_rows, 8);
    assert!(fs::metadata(&path).map(|m| m.len() > 0).unwrap_or(false));

    let _ = fs::remove_file(&path);
}
