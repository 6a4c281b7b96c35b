//! Draft prospect big board: scout-rank aggregation, board filtering and
//! sorting, player profiles, head-to-head comparison, and a session-scoped
//! scouting report ledger, all computed from one static dataset.

pub mod board_export;
pub mod compare;
pub mod config;
pub mod dataset;
pub mod format;
pub mod logging;
pub mod profile;
pub mod rank;
pub mod reports;
pub mod roster;
pub mod routes;
pub mod state;

pub use dataset::{Dataset, PlayerId};
pub use rank::{average_rank, Scout, ScoutRanking};
pub use roster::{build_roster, RosterQuery, SortMode};
pub use routes::Route;
