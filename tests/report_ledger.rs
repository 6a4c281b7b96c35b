use std::path::PathBuf;

use draft_board::dataset::Dataset;
use draft_board::reports::{ReportIdSource, ReportLedger};

fn fixture() -> Dataset {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/draft_dataset.json");
    Dataset::load(&path).expect("fixture should load")
}

#[derive(Default)]
struct Counter(u32);

impl ReportIdSource for Counter {
    fn next_id(&mut self) -> String {
        self.0 += 1;
        format!("local-{}", self.0)
    }
}

#[test]
fn seeded_with_only_this_players_reports() {
    let data = fixture();
    let ledger = ReportLedger::seeded(data.all_reports(), 5);
    assert_eq!(ledger.player_id(), 5);
    let ids = ledger.reports().iter().map(|r| r.report_id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["rep-5-a", "rep-5-b"]);

    assert!(ReportLedger::seeded(data.all_reports(), 9).is_empty());
}

#[test]
fn valid_report_is_prepended() {
    let data = fixture();
    let mut ledger = ReportLedger::with_ids(data.all_reports(), 5, Counter::default());
    let added = ledger
        .submit("Pat Quinn", "  Sees the floor well.  ")
        .cloned()
        .expect("accepted");
    assert_eq!(added.report_id, "local-1");
    assert_eq!(added.player_id, 5);
    assert_eq!(added.report, "  Sees the floor well.  ");

    assert_eq!(ledger.len(), 3);
    assert_eq!(ledger.reports()[0], added);
    assert_eq!(ledger.reports()[1].report_id, "rep-5-a");
}

#[test]
fn blank_fields_are_ignored() {
    let data = fixture();
    let mut ledger = ReportLedger::with_ids(data.all_reports(), 1, Counter::default());
    assert!(ledger.submit("Pat Quinn", "   ").is_none());
    assert!(ledger.submit("", "Good motor.").is_none());
    assert!(ledger.submit(" \t", "\n").is_none());
    assert_eq!(ledger.len(), 1);
}

#[test]
fn fresh_ledger_forgets_session_reports() {
    let data = fixture();
    let mut ledger = ReportLedger::seeded(data.all_reports(), 1);
    ledger.submit("Pat Quinn", "Quick release.");
    assert_eq!(ledger.len(), 2);

    let again = ReportLedger::seeded(data.all_reports(), 1);
    assert_eq!(again.len(), 1);
    assert_eq!(data.reports_for(1).len(), 1);
}

#[test]
fn generated_ids_are_unique() {
    let mut ledger = ReportLedger::seeded(&[], 7);
    let first = ledger.submit("A", "one").map(|r| r.report_id.clone());
    let second = ledger.submit("B", "two").map(|r| r.report_id.clone());
    assert!(first.is_some());
    assert_ne!(first, second);
}
