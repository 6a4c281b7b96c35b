use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use draft_board::board_export;
use draft_board::config::{rejected_route, AppConfig};
use draft_board::dataset::Dataset;
use draft_board::logging;
use draft_board::profile::{Panel, PLAYER_NOT_FOUND};
use draft_board::rank::{RankTrend, Scout};
use draft_board::reports::NO_REPORTS;
use draft_board::state::{apply_delta, scout_filter_label, AppState, Delta, DraftField, Screen};

struct App {
    state: AppState,
    config: AppConfig,
    should_quit: bool,
}

impl App {
    fn new(state: AppState, config: AppConfig) -> Self {
        Self {
            state,
            config,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.search_active {
            self.on_search_key(key);
            return;
        }
        if self.state.screen == Screen::Profile && self.state.profile.draft.active {
            self.on_draft_key(key);
            return;
        }

        let delta = match (self.state.screen, key.code) {
            (_, KeyCode::Char('q')) => {
                self.should_quit = true;
                return;
            }
            (_, KeyCode::Char('?')) => Delta::ToggleHelp,
            (_, KeyCode::Char('e')) => {
                self.export();
                return;
            }
            (Screen::BigBoard, KeyCode::Char('/')) => Delta::StartSearch,
            (Screen::BigBoard, KeyCode::Char('s')) => Delta::CycleSort,
            (Screen::BigBoard, KeyCode::Char('f')) => Delta::CycleScoutFilter,
            (Screen::BigBoard, KeyCode::Char('j') | KeyCode::Down) => Delta::SelectNext,
            (Screen::BigBoard, KeyCode::Char('k') | KeyCode::Up) => Delta::SelectPrev,
            (Screen::BigBoard, KeyCode::Char(' ')) => Delta::ToggleCompareSelected,
            (Screen::BigBoard, KeyCode::Char('c')) => Delta::OpenCompare,
            (Screen::BigBoard, KeyCode::Enter | KeyCode::Char('d')) => Delta::OpenSelected,
            (Screen::Profile, KeyCode::Char('t')) => Delta::ToggleStatMode,
            (Screen::Profile, KeyCode::Char('m')) => Delta::ToggleMeasurements,
            (Screen::Profile, KeyCode::Char('a')) => Delta::ToggleFullStats,
            (Screen::Profile, KeyCode::Char('r')) => Delta::StartDraft,
            (Screen::Profile, KeyCode::Char('j') | KeyCode::Down) => Delta::ScrollDown,
            (Screen::Profile, KeyCode::Char('k') | KeyCode::Up) => Delta::ScrollUp,
            (Screen::Profile | Screen::Compare, KeyCode::Char('b') | KeyCode::Esc) => Delta::Back,
            _ => return,
        };
        apply_delta(&mut self.state, delta);
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        let delta = match key.code {
            KeyCode::Enter | KeyCode::Esc => Delta::EndSearch,
            KeyCode::Backspace => Delta::SearchBackspace,
            KeyCode::Char(c) => Delta::SearchChar(c),
            _ => return,
        };
        apply_delta(&mut self.state, delta);
    }

    fn on_draft_key(&mut self, key: KeyEvent) {
        let delta = match key.code {
            KeyCode::Esc => Delta::CancelDraft,
            KeyCode::Tab => Delta::DraftSwitchField,
            KeyCode::Enter => Delta::SubmitReport,
            KeyCode::Backspace => Delta::DraftBackspace,
            KeyCode::Char(c) => Delta::DraftChar(c),
            _ => return,
        };
        apply_delta(&mut self.state, delta);
    }

    fn export(&mut self) {
        let path = self.config.export_path.clone();
        let comparison =
            (self.state.screen == Screen::Compare).then(|| self.state.comparison());
        let result = {
            let entries = self.state.roster();
            board_export::export_board(&path, &entries, comparison.as_ref())
        };
        let msg = match result {
            Ok(report) => format!(
                "[INFO] Exported {} players to {}",
                report.players,
                path.display()
            ),
            Err(err) => format!("[WARN] Export failed: {err:#}"),
        };
        apply_delta(&mut self.state, Delta::Log(msg));
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let env_config = AppConfig::from_env();
    logging::init_file_logging(env_config.log_file.as_deref())?;
    let config = env_config.with_args(&args);

    let dataset = Dataset::load(&config.data_path)
        .with_context(|| format!("unable to load {}", config.data_path.display()))?;
    let mut state = AppState::new(dataset);
    state.push_log(format!(
        "[INFO] Loaded {} players from {}",
        state.dataset.bios().len(),
        config.data_path.display()
    ));
    if let Some(route) = config.initial_route.clone() {
        state.navigate(route);
    }
    if let Some(raw) = rejected_route(&args) {
        apply_delta(
            &mut state,
            Delta::Log(format!("[WARN] Unknown route {raw}, showing the big board")),
        );
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(state, config);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::BigBoard => render_board(frame, chunks[1], &app.state),
        Screen::Profile => render_profile(frame, chunks[1], &app.state),
        Screen::Compare => render_compare(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let path = state.current_route().to_path();
    let line1 = match state.screen {
        Screen::BigBoard => format!("DRAFT BIG BOARD | {path} | Sort: {}", state.query.sort.label()),
        Screen::Profile => format!("PLAYER PROFILE | {path}"),
        Screen::Compare => format!("PLAYER COMPARISON | {path}"),
    };
    let cursor = if state.search_active { "_" } else { "" };
    let line2 = format!(
        "Search: {}{cursor} | {}",
        state.query.search,
        scout_filter_label(state.query.scout_filter)
    );
    let picked = state
        .compare
        .ids()
        .iter()
        .filter_map(|id| state.dataset.bio(*id))
        .map(|bio| bio.full_name())
        .collect::<Vec<_>>();
    let line3 = if picked.is_empty() {
        "Compare: none selected".to_string()
    } else {
        format!("Compare: {}", picked.join(" vs "))
    };
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    if state.search_active {
        return "Type to search | Backspace delete | Enter/Esc done".to_string();
    }
    match state.screen {
        Screen::BigBoard => {
            let compare = if state.compare.compare_request().is_some() {
                " | c Compare"
            } else {
                ""
            };
            format!(
                "/ Search | s Sort | f Scout | j/k Move | Space Pick | Enter Profile{compare} | e Export | ? Help | q Quit"
            )
        }
        Screen::Profile if state.profile.draft.active => {
            "Tab Switch field | Enter Submit | Esc Cancel".to_string()
        }
        Screen::Profile => {
            "t Per game/Totals | a Full stats | m Measurements | r Report | j/k Scroll | b Back | q Quit"
                .to_string()
        }
        Screen::Compare => "b/Esc Back | e Export | ? Help | q Quit".to_string(),
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn board_columns() -> [Constraint; 9] {
    [
        Constraint::Length(5),
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
    ]
}

fn render_board(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = board_columns();
    render_board_header(frame, sections[0], &widths);

    let list_area = sections[1];
    let entries = state.roster();
    if entries.is_empty() {
        let empty = Paragraph::new("No players match the current search and filter")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    const ROW_HEIGHT: u16 = 2;
    if list_area.height < ROW_HEIGHT {
        return;
    }
    let visible = (list_area.height / ROW_HEIGHT) as usize;
    let (start, end) = visible_range(state.selected, entries.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + (i as u16) * ROW_HEIGHT,
            width: list_area.width,
            height: ROW_HEIGHT,
        };
        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let entry = &entries[idx];
        let id = entry.player_id();
        let pick = if state.compare.is_selected(id) {
            "[x]"
        } else if state.compare.is_locked(id) {
            "[-]"
        } else {
            "[ ]"
        };
        let team = entry.bio.current_team.clone().unwrap_or_default();
        let name = format!("{}\n{team}", entry.full_name());
        let avg = if entry.is_ranked() {
            entry.avg_rank_label()
        } else {
            "Unranked".to_string()
        };

        render_cell_text(frame, cols[0], &format!("{:>3}", idx + 1), row_style);
        render_cell_text(frame, cols[1], pick, row_style);
        frame.render_widget(Paragraph::new(name).style(row_style), cols[2]);
        render_cell_text(frame, cols[3], &avg, row_style.add_modifier(Modifier::BOLD));

        for (mark, col) in entry.scout_marks().iter().zip(cols.iter().skip(4)) {
            let label = match mark.trend {
                RankTrend::Unranked => "-".to_string(),
                _ => mark.label.clone(),
            };
            render_cell_text(frame, *col, &label, row_style.patch(trend_style(mark.trend)));
        }
    }
}

fn render_board_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "  #", style);
    render_cell_text(frame, cols[1], "Cmp", style);
    render_cell_text(frame, cols[2], "Player", style);
    render_cell_text(frame, cols[3], "Avg Rank", style);
    for (scout, col) in Scout::ALL.iter().zip(cols.iter().skip(4)) {
        render_cell_text(frame, *col, scout_short(*scout), style);
    }
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 1.min(area.height),
    };
    let paragraph = Paragraph::new(text.to_string()).style(style);
    frame.render_widget(paragraph, text_area);
}

fn trend_style(trend: RankTrend) -> Style {
    match trend {
        RankTrend::Ahead => Style::default().fg(Color::Green),
        RankTrend::Behind => Style::default().fg(Color::Red),
        RankTrend::InLine => Style::default(),
        RankTrend::Unranked => Style::default().fg(Color::DarkGray),
    }
}

fn scout_short(scout: Scout) -> &'static str {
    match scout {
        Scout::Espn => "ESPN",
        Scout::SamVecenie => "Vecenie",
        Scout::KevinOConnor => "O'Connor",
        Scout::KyleBoone => "Boone",
        Scout::GaryParrish => "Parrish",
    }
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_profile(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(view) = state.profile_view() else {
        let missing = Paragraph::new(format!("{PLAYER_NOT_FOUND}\n\nb Back to Big Board"))
            .block(Block::default().title("Profile").borders(Borders::ALL));
        frame.render_widget(missing, area);
        return;
    };
    let session = &state.profile;

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(view.name(), bold)),
        Line::from(Span::styled(view.headline(), dim)),
        Line::from(""),
    ];
    for (label, value) in view.bio_lines() {
        lines.push(Line::from(vec![
            Span::styled(format!("{label}: "), bold),
            Span::raw(value),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Season Stats ({})", session.stat_mode.label()),
        bold,
    )));
    push_panel(&mut lines, view.season_stats(session.stat_mode));

    if session.show_full_stats {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Full Season Stats", bold)));
        push_panel(&mut lines, view.full_stats());
    }
    if session.show_measurements {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Measurements", bold)));
        push_panel(&mut lines, view.measurement_rows());
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Scouting Reports", bold)));
    match session.ledger.as_ref() {
        Some(ledger) if !ledger.is_empty() => {
            for report in ledger.reports() {
                lines.push(Line::from(Span::styled(report.scout.clone(), dim)));
                lines.push(Line::from(report.report.clone()));
                lines.push(Line::from(""));
            }
        }
        _ => lines.push(Line::from(Span::styled(NO_REPORTS, dim))),
    }

    let body = Paragraph::new(lines)
        .block(Block::default().title("Profile").borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((session.scroll, 0));

    if session.draft.active {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(6)])
            .split(area);
        frame.render_widget(body, split[0]);
        render_draft(frame, split[1], state);
    } else {
        frame.render_widget(body, area);
    }
}

fn push_panel(lines: &mut Vec<Line<'static>>, panel: Panel) {
    match panel {
        Panel::Rows(rows) => {
            for (label, value) in rows {
                lines.push(Line::from(format!("  {label:<16} {value}")));
            }
        }
        Panel::Empty(msg) => {
            lines.push(Line::from(Span::styled(msg, Style::default().fg(Color::DarkGray))))
        }
    }
}

fn render_draft(frame: &mut Frame, area: Rect, state: &AppState) {
    let draft = &state.profile.draft;
    let marker = |field: DraftField| if draft.field == field { ">" } else { " " };
    let text = format!(
        "{} Scout Name: {}\n{} Report: {}",
        marker(DraftField::Scout),
        draft.scout,
        marker(DraftField::Report),
        draft.report
    );
    let form = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Add a Scouting Report").borders(Borders::ALL));
    frame.render_widget(form, area);
}

fn render_compare(frame: &mut Frame, area: Rect, state: &AppState) {
    let view = state.comparison();
    if view.is_empty() {
        let empty = Paragraph::new("No players to compare")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Player Comparison").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let card_height = 8;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(card_height), Constraint::Min(1)])
        .split(area);

    let card_constraints = vec![Constraint::Ratio(1, view.players.len() as u32); view.players.len()];
    let card_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(card_constraints)
        .split(rows[0]);
    for (card, col) in view.players.iter().zip(card_cols.iter()) {
        let mut lines = vec![Line::from(Span::styled(
            card.team.clone(),
            Style::default().fg(Color::DarkGray),
        ))];
        for (label, value) in card.lines() {
            lines.push(Line::from(format!("{label}: {value}")));
        }
        let widget = Paragraph::new(lines)
            .block(Block::default().title(card.name.clone()).borders(Borders::ALL));
        frame.render_widget(widget, *col);
    }

    let mut table = vec![Line::from(Span::styled(
        std::iter::once(format!("{:<16}", "Stat"))
            .chain(view.players.iter().map(|p| format!("{:<22}", p.name)))
            .collect::<String>(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for row in &view.rows {
        let line = std::iter::once(format!("{:<16}", row.label))
            .chain(row.cells.iter().map(|c| format!("{c:<22}")))
            .collect::<String>();
        table.push(Line::from(line));
    }
    let stats = Paragraph::new(table).block(
        Block::default()
            .title("Season Stats Comparison (Most Recent)")
            .borders(Borders::ALL),
    );
    frame.render_widget(stats, rows[1]);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Draft Big Board - Help",
        "",
        "Big board:",
        "  /            Search by name",
        "  s            Cycle sort mode",
        "  f            Cycle top-10 scout filter",
        "  j/k or ↑/↓   Move",
        "  Space        Pick for comparison (max 2)",
        "  c            Compare picked players",
        "  Enter / d    Player profile",
        "  e            Export board to xlsx",
        "",
        "Profile:",
        "  t            Per game / season totals",
        "  a / m        Full stats / measurements",
        "  r            Write a scouting report",
        "  b / Esc      Back",
        "",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
