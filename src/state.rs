use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::compare::{build_comparison, ComparisonView};
use crate::dataset::{Dataset, PlayerId};
use crate::profile::{build_profile, ProfileView, StatMode};
use crate::rank::Scout;
use crate::reports::ReportLedger;
use crate::roster::{build_roster, CompareSelection, RosterEntry, RosterQuery, SelectionChange};
use crate::routes::Route;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    BigBoard,
    Profile,
    Compare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftField {
    #[default]
    Scout,
    Report,
}

/// The "add a scouting report" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDraft {
    pub active: bool,
    pub field: DraftField,
    pub scout: String,
    pub report: String,
}

impl ReportDraft {
    fn focused_mut(&mut self) -> &mut String {
        match self.field {
            DraftField::Scout => &mut self.scout,
            DraftField::Report => &mut self.report,
        }
    }
}

/// State of one visit to a player page. Rebuilt on every navigation, which
/// is what drops reports written during a previous visit.
#[derive(Debug, Clone)]
pub struct ProfileSession {
    pub player_id: Option<PlayerId>,
    pub stat_mode: StatMode,
    pub show_measurements: bool,
    pub show_full_stats: bool,
    /// `None` when the player does not exist.
    pub ledger: Option<ReportLedger>,
    pub draft: ReportDraft,
    pub scroll: u16,
}

impl ProfileSession {
    fn closed() -> Self {
        Self {
            player_id: None,
            stat_mode: StatMode::PerGame,
            show_measurements: false,
            show_full_stats: false,
            ledger: None,
            draft: ReportDraft::default(),
            scroll: 0,
        }
    }

    fn open(dataset: &Dataset, player_id: Option<PlayerId>) -> Self {
        let ledger = player_id
            .filter(|id| dataset.bio(*id).is_some())
            .map(|id| ReportLedger::seeded(dataset.all_reports(), id));
        Self {
            player_id,
            ledger,
            ..Self::closed()
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Dataset,
    pub screen: Screen,
    pub query: RosterQuery,
    pub search_active: bool,
    /// Cursor into the filtered board.
    pub selected: usize,
    pub compare: CompareSelection,
    pub compare_ids: Vec<PlayerId>,
    pub profile: ProfileSession,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

/// Everything the dashboard can ask the state to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Delta {
    Navigate(Route),
    Back,
    StartSearch,
    EndSearch,
    SearchChar(char),
    SearchBackspace,
    SetSearch(String),
    CycleSort,
    CycleScoutFilter,
    SetScoutFilter(Option<Scout>),
    SelectNext,
    SelectPrev,
    ToggleCompare(PlayerId),
    ToggleCompareSelected,
    OpenSelected,
    OpenCompare,
    ToggleStatMode,
    ToggleMeasurements,
    ToggleFullStats,
    StartDraft,
    CancelDraft,
    DraftChar(char),
    DraftBackspace,
    DraftSwitchField,
    SubmitReport,
    ScrollDown,
    ScrollUp,
    ToggleHelp,
    Log(String),
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            screen: Screen::BigBoard,
            query: RosterQuery::default(),
            search_active: false,
            selected: 0,
            compare: CompareSelection::default(),
            compare_ids: Vec::new(),
            profile: ProfileSession::closed(),
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn roster(&self) -> Vec<RosterEntry<'_>> {
        build_roster(&self.dataset, &self.query)
    }

    pub fn selected_player_id(&self) -> Option<PlayerId> {
        self.roster().get(self.selected).map(|e| e.player_id())
    }

    pub fn profile_view(&self) -> Option<ProfileView<'_>> {
        build_profile(&self.dataset, self.profile.player_id)
    }

    pub fn comparison(&self) -> ComparisonView {
        build_comparison(&self.dataset, &self.compare_ids)
    }

    pub fn current_route(&self) -> Route {
        match self.screen {
            Screen::BigBoard => Route::BigBoard,
            Screen::Profile => Route::Player(self.profile.player_id),
            Screen::Compare => Route::Compare(self.compare_ids.clone()),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn navigate(&mut self, route: Route) {
        debug!(path = %route.to_path(), "navigate");
        match route {
            Route::BigBoard => {
                self.screen = Screen::BigBoard;
                self.clamp_selection();
            }
            Route::Player(id) => {
                self.profile = ProfileSession::open(&self.dataset, id);
                self.screen = Screen::Profile;
            }
            Route::Compare(ids) => {
                self.compare_ids = ids;
                self.screen = Screen::Compare;
            }
        }
    }

    pub fn select_next(&mut self) {
        let total = self.roster().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.roster().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.roster().len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    pub fn cycle_scout_filter(&mut self) {
        self.query.scout_filter = match self.query.scout_filter {
            None => Some(Scout::Espn),
            Some(Scout::Espn) => Some(Scout::SamVecenie),
            Some(Scout::SamVecenie) => Some(Scout::KevinOConnor),
            Some(Scout::KevinOConnor) => Some(Scout::KyleBoone),
            Some(Scout::KyleBoone) => Some(Scout::GaryParrish),
            Some(Scout::GaryParrish) => None,
        };
        self.selected = 0;
    }

    fn toggle_compare(&mut self, id: PlayerId) {
        match self.compare.toggle(id) {
            SelectionChange::Added | SelectionChange::Removed => {}
            SelectionChange::Rejected => {
                self.push_log("[INFO] Two players already selected for comparison");
            }
        }
    }

    fn submit_report(&mut self) {
        let draft = &mut self.profile.draft;
        let Some(ledger) = self.profile.ledger.as_mut() else {
            return;
        };
        if ledger.submit(&draft.scout, &draft.report).is_some() {
            *draft = ReportDraft::default();
            self.push_log("[INFO] Scouting report added");
        }
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::Navigate(route) => state.navigate(route),
        Delta::Back => {
            if state.screen != Screen::BigBoard {
                state.navigate(Route::BigBoard);
            }
        }
        Delta::StartSearch => state.search_active = true,
        Delta::EndSearch => state.search_active = false,
        Delta::SearchChar(c) => {
            state.query.search.push(c);
            state.selected = 0;
        }
        Delta::SearchBackspace => {
            state.query.search.pop();
            state.selected = 0;
        }
        Delta::SetSearch(text) => {
            state.query.search = text;
            state.selected = 0;
        }
        Delta::CycleSort => {
            state.query.sort = state.query.sort.cycle();
            state.selected = 0;
        }
        Delta::CycleScoutFilter => state.cycle_scout_filter(),
        Delta::SetScoutFilter(scout) => {
            state.query.scout_filter = scout;
            state.selected = 0;
        }
        Delta::SelectNext => state.select_next(),
        Delta::SelectPrev => state.select_prev(),
        Delta::ToggleCompare(id) => state.toggle_compare(id),
        Delta::ToggleCompareSelected => {
            if let Some(id) = state.selected_player_id() {
                state.toggle_compare(id);
            }
        }
        Delta::OpenSelected => {
            if let Some(id) = state.selected_player_id() {
                state.navigate(Route::Player(Some(id)));
            }
        }
        Delta::OpenCompare => match state.compare.compare_request() {
            Some(route) => state.navigate(route),
            None => state.push_log("[INFO] Select two players to compare"),
        },
        Delta::ToggleStatMode => state.profile.stat_mode = state.profile.stat_mode.toggle(),
        Delta::ToggleMeasurements => {
            state.profile.show_measurements = !state.profile.show_measurements
        }
        Delta::ToggleFullStats => state.profile.show_full_stats = !state.profile.show_full_stats,
        Delta::StartDraft => {
            if state.profile.ledger.is_some() {
                state.profile.draft.active = true;
            }
        }
        Delta::CancelDraft => state.profile.draft.active = false,
        Delta::DraftChar(c) => state.profile.draft.focused_mut().push(c),
        Delta::DraftBackspace => {
            state.profile.draft.focused_mut().pop();
        }
        Delta::DraftSwitchField => {
            let draft = &mut state.profile.draft;
            draft.field = match draft.field {
                DraftField::Scout => DraftField::Report,
                DraftField::Report => DraftField::Scout,
            };
        }
        Delta::SubmitReport => state.submit_report(),
        Delta::ScrollDown => state.profile.scroll = state.profile.scroll.saturating_add(1),
        Delta::ScrollUp => state.profile.scroll = state.profile.scroll.saturating_sub(1),
        Delta::ToggleHelp => state.help_overlay = !state.help_overlay,
        Delta::Log(msg) => {
            if msg.starts_with("[WARN]") {
                warn!("{msg}");
            }
            state.push_log(msg);
        }
    }
}

pub fn scout_filter_label(scout: Option<Scout>) -> String {
    match scout {
        Some(scout) => format!("Top 10: {}", scout.label()),
        None => "All Scouts".to_string(),
    }
}
