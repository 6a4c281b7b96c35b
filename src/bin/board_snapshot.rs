use std::env;

use anyhow::{Context, Result, anyhow};
use tracing::info;

use draft_board::compare::{build_comparison, ComparisonView};
use draft_board::config::{AppConfig, arg_value};
use draft_board::dataset::{Dataset, PlayerId};
use draft_board::logging;
use draft_board::profile::{build_profile, Panel, StatMode, PLAYER_NOT_FOUND};
use draft_board::rank::Scout;
use draft_board::reports::{ReportLedger, NO_REPORTS};
use draft_board::roster::{build_roster, RosterQuery, SortMode};
use draft_board::routes::Route;
use draft_board::state::scout_filter_label;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    logging::init_stderr_logging();

    let args = env::args().skip(1).collect::<Vec<_>>();
    let config = AppConfig::from_env().with_args(&args);
    let query = query_from_args(&args)?;

    let dataset = Dataset::load(&config.data_path)
        .with_context(|| format!("unable to load {}", config.data_path.display()))?;

    let route = config.initial_route.clone().unwrap_or(Route::BigBoard);
    info!(path = %route.to_path(), "rendering snapshot");
    let out = match route {
        Route::BigBoard => board_text(&dataset, &query),
        Route::Player(id) => profile_text(&dataset, id),
        Route::Compare(ids) => compare_text(&build_comparison(&dataset, &ids)),
    };
    print!("{out}");
    Ok(())
}

fn query_from_args(args: &[String]) -> Result<RosterQuery> {
    let mut query = RosterQuery::default();
    if let Some(search) = arg_value(args, "search") {
        query.search = search;
    }
    if let Some(raw) = arg_value(args, "scout") {
        let scout = Scout::ALL
            .into_iter()
            .find(|s| s.label().to_lowercase().starts_with(&raw.to_lowercase()))
            .ok_or_else(|| anyhow!("unknown scout {raw:?}"))?;
        query.scout_filter = Some(scout);
    }
    if let Some(raw) = arg_value(args, "sort") {
        query.sort = SortMode::from_key(&raw).ok_or_else(|| {
            let keys = SortMode::ALL.iter().map(|m| m.key()).collect::<Vec<_>>();
            anyhow!("unknown sort {raw:?}, expected one of {}", keys.join(", "))
        })?;
    }
    Ok(query)
}

fn board_text(dataset: &Dataset, query: &RosterQuery) -> String {
    let entries = build_roster(dataset, query);
    let mut out = format!(
        "Big Board | Sort: {} | {} | Search: {:?}\n",
        query.sort.label(),
        scout_filter_label(query.scout_filter),
        query.search
    );
    if entries.is_empty() {
        out.push_str("No players match.\n");
        return out;
    }
    for (idx, entry) in entries.iter().enumerate() {
        let team = entry.bio.current_team.as_deref().unwrap_or("");
        out.push_str(&format!(
            "{:>3}. {:<26} {:<24} avg {}\n",
            idx + 1,
            entry.full_name(),
            team,
            entry.avg_rank_label()
        ));
        let marks = entry
            .scout_marks()
            .into_iter()
            .map(|m| format!("{}: {}", m.scout.label(), m.label))
            .collect::<Vec<_>>();
        out.push_str(&format!("     {}\n", marks.join(" | ")));
    }
    out
}

fn profile_text(dataset: &Dataset, id: Option<PlayerId>) -> String {
    let Some(view) = build_profile(dataset, id) else {
        return format!("{PLAYER_NOT_FOUND}\n");
    };
    let mut out = format!("{}\n{}\n", view.name(), view.headline());
    for (label, value) in view.bio_lines() {
        out.push_str(&format!("{label}: {value}\n"));
    }
    for mode in [StatMode::PerGame, StatMode::Totals] {
        out.push_str(&format!("\n[{}]\n", mode.label()));
        push_panel(&mut out, view.season_stats(mode));
    }
    out.push_str("\n[Measurements]\n");
    push_panel(&mut out, view.measurement_rows());

    out.push_str("\n[Scouting Reports]\n");
    let ledger = ReportLedger::seeded(dataset.all_reports(), view.bio.player_id);
    if ledger.is_empty() {
        out.push_str(NO_REPORTS);
        out.push('\n');
    }
    for report in ledger.reports() {
        out.push_str(&format!("- {}: {}\n", report.scout, report.report));
    }
    out
}

fn push_panel(out: &mut String, panel: Panel) {
    match panel {
        Panel::Rows(rows) => {
            for (label, value) in rows {
                out.push_str(&format!("  {label:<16} {value}\n"));
            }
        }
        Panel::Empty(msg) => {
            out.push_str(msg);
            out.push('\n');
        }
    }
}

fn compare_text(view: &ComparisonView) -> String {
    if view.is_empty() {
        return "No players to compare\n".to_string();
    }
    let mut out = String::new();
    for card in &view.players {
        out.push_str(&format!("{} ({})\n", card.name, card.team));
        for (label, value) in card.lines() {
            out.push_str(&format!("  {label}: {value}\n"));
        }
    }
    out.push('\n');
    out.push_str(&format!("{:<16}", "Stat"));
    for card in &view.players {
        out.push_str(&format!("{:<22}", card.name));
    }
    out.push('\n');
    for row in &view.rows {
        out.push_str(&format!("{:<16}", row.label));
        for cell in &row.cells {
            out.push_str(&format!("{cell:<22}"));
        }
        out.push('\n');
    }
    out
}
