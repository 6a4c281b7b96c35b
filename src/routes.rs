use crate::dataset::PlayerId;

/// The three addressable views. The core only produces these as requests;
/// whoever hosts the views performs the navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    BigBoard,
    /// `None` when the path segment is not a valid player identifier.
    Player(Option<PlayerId>),
    Compare(Vec<PlayerId>),
}

impl Route {
    /// Parse `/`, `/player/<id>` or `/compare?ids=<a>,<b>`.
    pub fn parse(raw: &str) -> Option<Route> {
        let raw = raw.trim();
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (raw, None),
        };
        let path = path.trim_end_matches('/');

        if path.is_empty() {
            return Some(Route::BigBoard);
        }
        if let Some(segment) = path.strip_prefix("/player/") {
            return Some(Route::Player(parse_player_id(segment)));
        }
        if path == "/player" {
            return Some(Route::Player(None));
        }
        if path == "/compare" {
            let ids = query.and_then(ids_param).map(parse_id_list).unwrap_or_default();
            return Some(Route::Compare(ids));
        }
        None
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::BigBoard => "/".to_string(),
            Route::Player(Some(id)) => format!("/player/{id}"),
            Route::Player(None) => "/player/".to_string(),
            Route::Compare(ids) => {
                let joined = ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                format!("/compare?ids={joined}")
            }
        }
    }
}

fn ids_param(query: &str) -> Option<&str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "ids")
        .map(|(_, value)| value)
}

/// Comma-separated identifiers; blank or malformed entries are dropped.
pub fn parse_id_list(raw: &str) -> Vec<PlayerId> {
    raw.split(',')
        .filter_map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }
            parse_player_id(part)
        })
        .collect()
}

/// Numeric identifier from a path or query value. Whole-valued decimals
/// such as `5.0` resolve to the same player as `5`.
pub fn parse_player_id(raw: &str) -> Option<PlayerId> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<PlayerId>() {
        return Some(id);
    }
    let value = raw.parse::<f64>().ok()?;
    let whole = value.is_finite() && value.fract() == 0.0;
    if whole && value >= 0.0 && value <= f64::from(PlayerId::MAX) {
        Some(value as PlayerId)
    } else {
        None
    }
}
