use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::routes::Route;

pub const DEFAULT_DATA_PATH: &str = "data/draft_dataset.json";
pub const DEFAULT_EXPORT_PATH: &str = "big_board.xlsx";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub export_path: PathBuf,
    /// Where tracing output goes; stdout belongs to the dashboard.
    pub log_file: Option<PathBuf>,
    pub initial_route: Option<Route>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            log_file: None,
            initial_route: None,
        }
    }
}

impl AppConfig {
    /// Reads `DRAFT_BOARD_DATA`, `DRAFT_BOARD_EXPORT` and `DRAFT_BOARD_LOG_FILE`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = env_path("DRAFT_BOARD_DATA") {
            config.data_path = path;
        }
        if let Some(path) = env_path("DRAFT_BOARD_EXPORT") {
            config.export_path = path;
        }
        config.log_file = env_path("DRAFT_BOARD_LOG_FILE");
        config
    }

    /// Command-line overrides: `--data`, `--export`, `--route`.
    pub fn with_args(mut self, args: &[String]) -> Self {
        if let Some(path) = arg_value(args, "data") {
            self.data_path = PathBuf::from(path);
        }
        if let Some(path) = arg_value(args, "export") {
            self.export_path = PathBuf::from(path);
        }
        if let Some(raw) = arg_value(args, "route") {
            self.initial_route = Route::parse(&raw);
            if self.initial_route.is_none() {
                warn!(route = %raw, "unknown route, starting on the big board");
            }
        }
        self
    }
}

/// The `--route` value when it names no known view.
pub fn rejected_route(args: &[String]) -> Option<String> {
    arg_value(args, "route").filter(|raw| Route::parse(raw).is_none())
}

/// Value of `--name=value` or `--name value`; blank values are ignored.
pub fn arg_value(args: &[String], name: &str) -> Option<String> {
    let flag = format!("--{name}");
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if *arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn args_override_defaults() {
        let config = AppConfig::default().with_args(&args(&[
            "--data=fixtures/board.json",
            "--route",
            "/compare?ids=5,9",
        ]));
        assert_eq!(config.data_path, PathBuf::from("fixtures/board.json"));
        assert_eq!(config.export_path, PathBuf::from(DEFAULT_EXPORT_PATH));
        assert_eq!(config.initial_route, Some(Route::Compare(vec![5, 9])));
    }

    #[test]
    fn unknown_route_is_reported_and_ignored() {
        let raw = args(&["--route=/teams/4"]);
        let config = AppConfig::default().with_args(&raw);
        assert_eq!(config.initial_route, None);
        assert_eq!(rejected_route(&raw), Some("/teams/4".to_string()));
        assert_eq!(rejected_route(&args(&["--route", "/player/5"])), None);
        assert_eq!(rejected_route(&args(&[])), None);
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = AppConfig::default().with_args(&args(&["--data=", "--export"]));
        assert_eq!(config, AppConfig::default());
    }
}
