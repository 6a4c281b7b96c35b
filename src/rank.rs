use serde::Deserialize;
use serde_json::{Map, Value};

use crate::dataset::PlayerId;

/// Scouts whose boards feed the aggregate rank, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scout {
    Espn,
    SamVecenie,
    KevinOConnor,
    KyleBoone,
    GaryParrish,
}

impl Scout {
    pub const ALL: [Scout; 5] = [
        Scout::Espn,
        Scout::SamVecenie,
        Scout::KevinOConnor,
        Scout::KyleBoone,
        Scout::GaryParrish,
    ];

    /// Field name used by the dataset, also the label shown on cards.
    pub fn label(self) -> &'static str {
        match self {
            Scout::Espn => "ESPN Rank",
            Scout::SamVecenie => "Sam Vecenie Rank",
            Scout::KevinOConnor => "Kevin O'Connor Rank",
            Scout::KyleBoone => "Kyle Boone Rank",
            Scout::GaryParrish => "Gary Parrish Rank",
        }
    }

    pub fn from_key(key: &str) -> Option<Scout> {
        Scout::ALL.into_iter().find(|s| s.label() == key)
    }

    fn index(self) -> usize {
        match self {
            Scout::Espn => 0,
            Scout::SamVecenie => 1,
            Scout::KevinOConnor => 2,
            Scout::KyleBoone => 3,
            Scout::GaryParrish => 4,
        }
    }
}

/// One scout's entry for a player as it appeared in the source data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RankValue {
    #[default]
    Absent,
    Null,
    Number(f64),
    Text(String),
}

impl RankValue {
    fn from_json(value: &Value) -> RankValue {
        match value {
            Value::Null => RankValue::Null,
            Value::Number(n) => n.as_f64().map(RankValue::Number).unwrap_or(RankValue::Null),
            Value::String(s) => RankValue::Text(s.clone()),
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => RankValue::Text(value.to_string()),
        }
    }

    /// Numeric rank used for aggregation.
    ///
    /// Text that trims to a finite number is coerced; blank or unparseable
    /// text counts as absent, same as null.
    pub fn coerced(&self) -> Option<f64> {
        match self {
            RankValue::Number(n) if n.is_finite() => Some(*n),
            RankValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    /// Only genuinely numeric entries; text ranks do not qualify.
    pub fn strict(&self) -> Option<f64> {
        match self {
            RankValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, RankValue::Absent | RankValue::Null)
    }

    /// `#<rank>` as printed on a roster card, `None` when the scout passed.
    pub fn display(&self) -> Option<String> {
        match self {
            RankValue::Absent | RankValue::Null => None,
            RankValue::Number(n) => Some(format!("#{n}")),
            RankValue::Text(s) => Some(format!("#{s}")),
        }
    }
}

/// Per-player scout board entries. Keys outside [`Scout::ALL`] are dropped
/// on load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ScoutRanking {
    pub player_id: PlayerId,
    ranks: [RankValue; 5],
}

impl ScoutRanking {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            ranks: Default::default(),
        }
    }

    pub fn with_rank(mut self, scout: Scout, value: RankValue) -> Self {
        self.ranks[scout.index()] = value;
        self
    }

    pub fn get(&self, scout: Scout) -> &RankValue {
        &self.ranks[scout.index()]
    }

    pub fn entries(&self) -> impl Iterator<Item = (Scout, &RankValue)> + '_ {
        Scout::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

impl TryFrom<Map<String, Value>> for ScoutRanking {
    type Error = String;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        let player_id = raw
            .get("playerId")
            .and_then(Value::as_u64)
            .and_then(|id| PlayerId::try_from(id).ok())
            .ok_or_else(|| "scout ranking without a valid playerId".to_string())?;

        let mut ranking = ScoutRanking::new(player_id);
        for (key, value) in &raw {
            if let Some(scout) = Scout::from_key(key) {
                ranking.ranks[scout.index()] = RankValue::from_json(value);
            }
        }
        Ok(ranking)
    }
}

/// Mean of every usable scout rank; `f64::INFINITY` when nobody ranked the
/// player (or there is no ranking record at all).
pub fn average_rank(ranking: Option<&ScoutRanking>) -> f64 {
    let Some(ranking) = ranking else {
        return f64::INFINITY;
    };
    let mut total = 0.0;
    let mut count = 0usize;
    for (_, value) in ranking.entries() {
        if let Some(rank) = value.coerced() {
            total += rank;
            count += 1;
        }
    }
    if count == 0 {
        f64::INFINITY
    } else {
        total / count as f64
    }
}

/// How one scout's rank sits against the player's aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankTrend {
    /// More than two spots better than the average.
    Ahead,
    /// More than two spots worse than the average.
    Behind,
    InLine,
    Unranked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoutMark {
    pub scout: Scout,
    pub label: String,
    pub trend: RankTrend,
}

pub fn scout_marks(ranking: Option<&ScoutRanking>, avg_rank: f64) -> Vec<ScoutMark> {
    Scout::ALL
        .into_iter()
        .map(|scout| {
            let value = ranking.map(|r| r.get(scout)).unwrap_or(&RankValue::Absent);
            let Some(label) = value.display() else {
                return ScoutMark {
                    scout,
                    label: "Did not rank".to_string(),
                    trend: RankTrend::Unranked,
                };
            };
            let trend = match value.coerced() {
                Some(rank) if rank < avg_rank - 2.0 => RankTrend::Ahead,
                Some(rank) if rank > avg_rank + 2.0 => RankTrend::Behind,
                _ => RankTrend::InLine,
            };
            ScoutMark { scout, label, trend }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_is_coerced() {
        assert_eq!(RankValue::Text(" 7 ".to_string()).coerced(), Some(7.0));
        assert_eq!(RankValue::Text("7".to_string()).strict(), None);
        assert_eq!(RankValue::Text("n/r".to_string()).coerced(), None);
        assert_eq!(RankValue::Text(String::new()).coerced(), None);
        assert_eq!(RankValue::Null.coerced(), None);
    }

    #[test]
    fn parses_known_scouts_and_ignores_others() {
        let raw = serde_json::json!({
            "playerId": 12,
            "ESPN Rank": 3,
            "Sam Vecenie Rank": null,
            "Kyle Boone Rank": "8",
            "Somebody Else Rank": 1
        });
        let ranking: ScoutRanking = serde_json::from_value(raw).expect("ranking should parse");
        assert_eq!(ranking.player_id, 12);
        assert_eq!(ranking.get(Scout::Espn), &RankValue::Number(3.0));
        assert_eq!(ranking.get(Scout::SamVecenie), &RankValue::Null);
        assert_eq!(ranking.get(Scout::KyleBoone), &RankValue::Text("8".to_string()));
        assert_eq!(ranking.get(Scout::GaryParrish), &RankValue::Absent);
        assert_eq!(average_rank(Some(&ranking)), 5.5);
    }

    #[test]
    fn ranking_without_player_id_is_rejected() {
        let raw = serde_json::json!({ "ESPN Rank": 3 });
        assert!(serde_json::from_value::<ScoutRanking>(raw).is_err());
    }

    #[test]
    fn marks_flag_outliers() {
        let ranking = ScoutRanking::new(1)
            .with_rank(Scout::Espn, RankValue::Number(1.0))
            .with_rank(Scout::SamVecenie, RankValue::Number(10.0))
            .with_rank(Scout::KyleBoone, RankValue::Number(4.0));
        let avg = average_rank(Some(&ranking));
        assert_eq!(avg, 5.0);
        let marks = scout_marks(Some(&ranking), avg);
        assert_eq!(marks.len(), 5);
        assert_eq!(marks[0].trend, RankTrend::Ahead);
        assert_eq!(marks[0].label, "#1");
        assert_eq!(marks[1].trend, RankTrend::Behind);
        assert_eq!(marks[2].trend, RankTrend::Unranked);
        assert_eq!(marks[2].label, "Did not rank");
        assert_eq!(marks[3].trend, RankTrend::InLine);
    }
}
