use std::path::PathBuf;

use draft_board::dataset::Dataset;
use draft_board::profile::StatMode;
use draft_board::rank::Scout;
use draft_board::roster::SortMode;
use draft_board::routes::Route;
use draft_board::state::{apply_delta, scout_filter_label, AppState, Delta, DraftField, Screen};

fn fixture_state() -> AppState {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/draft_dataset.json");
    AppState::new(Dataset::load(&path).expect("fixture should load"))
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        apply_delta(state, Delta::DraftChar(c));
    }
}

#[test]
fn search_typing_filters_and_resets_cursor() {
    let mut state = fixture_state();
    apply_delta(&mut state, Delta::SelectNext);
    apply_delta(&mut state, Delta::SelectNext);
    assert_eq!(state.selected, 2);

    apply_delta(&mut state, Delta::StartSearch);
    for c in "jo".chars() {
        apply_delta(&mut state, Delta::SearchChar(c));
    }
    apply_delta(&mut state, Delta::EndSearch);
    assert!(!state.search_active);
    assert_eq!(state.selected, 0);
    assert_eq!(state.roster().len(), 3);

    apply_delta(&mut state, Delta::SearchBackspace);
    assert_eq!(state.query.search, "j");
}

#[test]
fn cursor_wraps_around_the_board() {
    let mut state = fixture_state();
    apply_delta(&mut state, Delta::SelectPrev);
    assert_eq!(state.selected, 6);
    assert_eq!(state.selected_player_id(), Some(4));
    apply_delta(&mut state, Delta::SelectNext);
    assert_eq!(state.selected, 0);
    assert_eq!(state.selected_player_id(), Some(5));
}

#[test]
fn scout_filter_cycles_back_to_all() {
    let mut state = fixture_state();
    apply_delta(&mut state, Delta::CycleScoutFilter);
    assert_eq!(state.query.scout_filter, Some(Scout::Espn));
    assert_eq!(scout_filter_label(state.query.scout_filter), "Top 10: ESPN Rank");
    for _ in 0..5 {
        apply_delta(&mut state, Delta::CycleScoutFilter);
    }
    assert_eq!(state.query.scout_filter, None);
    assert_eq!(scout_filter_label(None), "All Scouts");

    apply_delta(&mut state, Delta::CycleSort);
    assert_eq!(state.query.sort, SortMode::HeightAsc);
}

#[test]
fn third_compare_pick_is_rejected_with_a_log() {
    let mut state = fixture_state();
    apply_delta(&mut state, Delta::ToggleCompare(5));
    apply_delta(&mut state, Delta::ToggleCompare(9));
    apply_delta(&mut state, Delta::ToggleCompare(1));
    assert_eq!(state.compare.ids(), &[5, 9]);
    assert!(state.logs.back().is_some_and(|l| l.starts_with("[INFO]")));

    apply_delta(&mut state, Delta::OpenCompare);
    assert_eq!(state.screen, Screen::Compare);
    assert_eq!(state.current_route(), Route::Compare(vec![5, 9]));
    assert_eq!(state.comparison().players.len(), 2);
}

#[test]
fn compare_needs_two_players() {
    let mut state = fixture_state();
    apply_delta(&mut state, Delta::ToggleCompareSelected);
    apply_delta(&mut state, Delta::OpenCompare);
    assert_eq!(state.screen, Screen::BigBoard);
    assert_eq!(state.compare.ids(), &[5]);
}

#[test]
fn open_selected_shows_profile_and_back_returns() {
    let mut state = fixture_state();
    apply_delta(&mut state, Delta::OpenSelected);
    assert_eq!(state.screen, Screen::Profile);
    assert_eq!(state.current_route(), Route::Player(Some(5)));
    assert_eq!(state.profile.ledger.as_ref().map(|l| l.len()), Some(2));

    apply_delta(&mut state, Delta::ToggleStatMode);
    assert_eq!(state.profile.stat_mode, StatMode::Totals);

    apply_delta(&mut state, Delta::Back);
    assert_eq!(state.screen, Screen::BigBoard);
    assert_eq!(state.current_route(), Route::BigBoard);
}

#[test]
fn unknown_player_route_has_no_ledger() {
    let mut state = fixture_state();
    apply_delta(&mut state, Delta::Navigate(Route::Player(Some(42))));
    assert_eq!(state.screen, Screen::Profile);
    assert!(state.profile_view().is_none());
    assert!(state.profile.ledger.is_none());

    apply_delta(&mut state, Delta::StartDraft);
    assert!(!state.profile.draft.active);
}

#[test]
fn report_draft_submits_and_clears() {
    let mut state = fixture_state();
    apply_delta(&mut state, Delta::Navigate(Route::Player(Some(1))));
    apply_delta(&mut state, Delta::StartDraft);
    type_text(&mut state, "Pat");
    apply_delta(&mut state, Delta::DraftSwitchField);
    assert_eq!(state.profile.draft.field, DraftField::Report);
    type_text(&mut state, "Smooth");
    apply_delta(&mut state, Delta::DraftBackspace);
    assert_eq!(state.profile.draft.report, "Smoot");

    apply_delta(&mut state, Delta::SubmitReport);
    let ledger = state.profile.ledger.as_ref().expect("ledger");
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.reports()[0].scout, "Pat");
    assert_eq!(ledger.reports()[0].report, "Smoot");
    assert!(!state.profile.draft.active);
    assert!(state.profile.draft.scout.is_empty());
}

#[test]
fn blank_report_keeps_the_draft() {
    let mut state = fixture_state();
    apply_delta(&mut state, Delta::Navigate(Route::Player(Some(1))));
    apply_delta(&mut state, Delta::StartDraft);
    type_text(&mut state, "Pat");
    apply_delta(&mut state, Delta::SubmitReport);

    assert_eq!(state.profile.ledger.as_ref().map(|l| l.len()), Some(1));
    assert!(state.profile.draft.active);
    assert_eq!(state.profile.draft.scout, "Pat");
}

#[test]
fn leaving_a_profile_drops_session_reports() {
    let mut state = fixture_state();
    apply_delta(&mut state, Delta::Navigate(Route::Player(Some(1))));
    apply_delta(&mut state, Delta::StartDraft);
    type_text(&mut state, "Pat");
    apply_delta(&mut state, Delta::DraftSwitchField);
    type_text(&mut state, "Note");
    apply_delta(&mut state, Delta::SubmitReport);
    assert_eq!(state.profile.ledger.as_ref().map(|l| l.len()), Some(2));

    apply_delta(&mut state, Delta::Back);
    apply_delta(&mut state, Delta::Navigate(Route::Player(Some(1))));
    assert_eq!(state.profile.ledger.as_ref().map(|l| l.len()), Some(1));
    assert_eq!(state.profile.stat_mode, StatMode::PerGame);
}

#[test]
fn log_ring_buffer_is_bounded() {
    let mut state = fixture_state();
    for idx in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("[INFO] message {idx}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] message 50"));
}

#[test]
fn help_overlay_toggles() {
    let mut state = fixture_state();
    apply_delta(&mut state, Delta::ToggleHelp);
    assert!(state.help_overlay);
    apply_delta(&mut state, Delta::ToggleHelp);
    assert!(!state.help_overlay);
}
