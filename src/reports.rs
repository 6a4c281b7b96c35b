use tracing::debug;
use uuid::Uuid;

use crate::dataset::{PlayerId, ScoutingReport};

pub const NO_REPORTS: &str = "No reports yet.";

/// Supplies identifiers for newly written reports.
pub trait ReportIdSource {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidReportIds;

impl ReportIdSource for UuidReportIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Session-scoped reports for one player, newest first.
///
/// Nothing written here outlives the ledger: building a new ledger for the
/// same player starts again from the dataset's reports.
#[derive(Debug, Clone)]
pub struct ReportLedger<I = UuidReportIds> {
    player_id: PlayerId,
    reports: Vec<ScoutingReport>,
    ids: I,
}

impl ReportLedger<UuidReportIds> {
    pub fn seeded(all_reports: &[ScoutingReport], player_id: PlayerId) -> Self {
        Self::with_ids(all_reports, player_id, UuidReportIds)
    }
}

impl<I: ReportIdSource> ReportLedger<I> {
    pub fn with_ids(all_reports: &[ScoutingReport], player_id: PlayerId, ids: I) -> Self {
        let reports = all_reports
            .iter()
            .filter(|r| r.player_id == player_id)
            .cloned()
            .collect();
        Self {
            player_id,
            reports,
            ids,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn reports(&self) -> &[ScoutingReport] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Prepend a report. Blank scout names or bodies are ignored and return
    /// `None`; accepted text is stored exactly as entered.
    pub fn submit(&mut self, scout: &str, body: &str) -> Option<&ScoutingReport> {
        if scout.trim().is_empty() || body.trim().is_empty() {
            debug!(player_id = self.player_id, "blank scouting report ignored");
            return None;
        }
        let entry = ScoutingReport {
            scout: scout.to_string(),
            report_id: self.ids.next_id(),
            player_id: self.player_id,
            report: body.to_string(),
        };
        debug!(
            player_id = self.player_id,
            report_id = %entry.report_id,
            "scouting report added"
        );
        self.reports.insert(0, entry);
        self.reports.first()
    }
}
