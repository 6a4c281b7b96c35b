use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::info;

use crate::compare::ComparisonView;
use crate::format::{plain_or_na, text_or_na, to_fixed, NOT_AVAILABLE};
use crate::rank::Scout;
use crate::roster::RosterEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub players: usize,
    pub comparison_rows: usize,
}

/// Write the board (in displayed order) and, optionally, the current
/// comparison table to an xlsx workbook.
pub fn export_board(
    path: &Path,
    entries: &[RosterEntry<'_>],
    comparison: Option<&ComparisonView>,
) -> Result<ExportReport> {
    let board_rows = board_rows(entries);
    let comparison_rows = comparison.map(comparison_rows).unwrap_or_default();

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Big Board")?;
        write_rows(sheet, &board_rows)?;
    }
    if !comparison_rows.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Comparison")?;
        write_rows(sheet, &comparison_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    let report = ExportReport {
        players: board_rows.len().saturating_sub(1),
        comparison_rows: comparison_rows.len().saturating_sub(1),
    };
    info!(
        path = %path.display(),
        players = report.players,
        comparison_rows = report.comparison_rows,
        "board exported"
    );
    Ok(report)
}

/// Header plus one row per board entry.
pub fn board_rows(entries: &[RosterEntry<'_>]) -> Vec<Vec<String>> {
    let mut header = vec![
        "Board #".to_string(),
        "Player ID".to_string(),
        "Player".to_string(),
        "Team".to_string(),
        "League".to_string(),
        "Height (in)".to_string(),
        "Birth Date".to_string(),
        "Avg Rank".to_string(),
    ];
    header.extend(Scout::ALL.iter().map(|s| s.label().to_string()));

    let mut rows = vec![header];
    for (idx, entry) in entries.iter().enumerate() {
        let bio = entry.bio;
        let mut row = vec![
            (idx + 1).to_string(),
            bio.player_id.to_string(),
            entry.full_name(),
            text_or_na(bio.current_team.as_deref()),
            text_or_na(bio.league.as_deref()),
            plain_or_na(bio.height),
            text_or_na(bio.birth_date.as_deref()),
            if entry.is_ranked() {
                to_fixed(entry.avg_rank, 1)
            } else {
                NOT_AVAILABLE.to_string()
            },
        ];
        row.extend(Scout::ALL.iter().map(|scout| {
            entry
                .ranking
                .and_then(|r| r.get(*scout).display())
                .unwrap_or_default()
        }));
        rows.push(row);
    }
    rows
}

pub fn comparison_rows(view: &ComparisonView) -> Vec<Vec<String>> {
    if view.is_empty() {
        return Vec::new();
    }
    let mut header = vec!["Stat".to_string()];
    header.extend(view.players.iter().map(|p| p.name.clone()));
    let mut rows = vec![header];
    for row in &view.rows {
        let mut line = vec![row.label.to_string()];
        line.extend(row.cells.iter().cloned());
        rows.push(line);
    }
    rows
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
