//! スコア済みレコードの並べ替え。
//!
//! レコードは JSON オブジェクト。スコアが欠けているか数値でない行と、未知の優先度ラベルの行は
//! 有効な行の後ろに置き、互いの相対順序は保つ。
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::scoring::PriorityLabel;

/// 表形式の1行。
pub type ArticleRecord = Map<String, Value>;

pub const DEFAULT_SCORE_COLUMN: &str = "popularity_percentage";
pub const PRIORITY_COLUMN: &str = "priority_label";
pub const RANK_COLUMN: &str = "rank";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RankingError {
    #[error("column `{column}` is missing from every record")]
    InvalidInput { column: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    #[default]
    Score,
    Priority,
}

impl RankingMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::Priority => "priority",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEngine {
    score_column: String,
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_COLUMN)
    }
}

impl RankingEngine {
    #[must_use]
    pub fn new(score_column: impl Into<String>) -> Self {
        Self {
            score_column: score_column.into(),
        }
    }

    #[must_use]
    pub fn score_column(&self) -> &str {
        &self.score_column
    }

    /// スコアの降順に安定ソートし、1始まりの `rank` を付与する。
    ///
    /// # Errors
    /// 空でないバッチのどのレコードにもスコア列がない場合は [`RankingError::InvalidInput`] を返す。
    pub fn rank_by_score(
        &self,
        records: Vec<ArticleRecord>,
    ) -> Result<Vec<ArticleRecord>, RankingError> {
        if records.is_empty() {
            return Ok(records);
        }
        self.require_column(&records, &self.score_column)?;

        let mut keyed: Vec<(Option<f64>, ArticleRecord)> = records
            .into_iter()
            .map(|record| (self.score_of(&record), record))
            .collect();
        keyed.sort_by(|a, b| descending_nulls_last(a.0, b.0));

        Ok(assign_ranks(keyed.into_iter().map(|(_, record)| record)))
    }

    /// High → Medium → Non の順、同じ段の中はスコア降順。
    ///
    /// # Errors
    /// 空でないバッチのどのレコードにも `priority_label` かスコア列がない場合は
    /// [`RankingError::InvalidInput`] を返す。
    pub fn rank_by_priority(
        &self,
        records: Vec<ArticleRecord>,
    ) -> Result<Vec<ArticleRecord>, RankingError> {
        if records.is_empty() {
            return Ok(records);
        }
        self.require_column(&records, PRIORITY_COLUMN)?;
        self.require_column(&records, &self.score_column)?;

        let mut keyed: Vec<(Option<u8>, Option<f64>, ArticleRecord)> = records
            .into_iter()
            .map(|record| {
                let tier = record
                    .get(PRIORITY_COLUMN)
                    .and_then(Value::as_str)
                    .and_then(PriorityLabel::from_label)
                    .map(PriorityLabel::tier);
                (tier, self.score_of(&record), record)
            })
            .collect();
        keyed.sort_by(|a, b| {
            ascending_nulls_last(a.0, b.0).then_with(|| descending_nulls_last(a.1, b.1))
        });

        Ok(assign_ranks(keyed.into_iter().map(|(_, _, record)| record)))
    }

    /// # Errors
    /// [`RankingEngine::rank_by_score`] と [`RankingEngine::rank_by_priority`] を参照。
    pub fn rank(
        &self,
        records: Vec<ArticleRecord>,
        mode: RankingMode,
    ) -> Result<Vec<ArticleRecord>, RankingError> {
        debug!(mode = mode.as_str(), records = records.len(), "ranking records");
        match mode {
            RankingMode::Score => self.rank_by_score(records),
            RankingMode::Priority => self.rank_by_priority(records),
        }
    }

    fn score_of(&self, record: &ArticleRecord) -> Option<f64> {
        record
            .get(&self.score_column)
            .and_then(Value::as_f64)
            .filter(|score| score.is_finite())
    }

    fn require_column(&self, records: &[ArticleRecord], column: &str) -> Result<(), RankingError> {
        if records.iter().any(|record| record.contains_key(column)) {
            Ok(())
        } else {
            Err(RankingError::InvalidInput {
                column: column.to_string(),
            })
        }
    }
}

fn descending_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn ascending_nulls_last(a: Option<u8>, b: Option<u8>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn assign_ranks(records: impl Iterator<Item = ArticleRecord>) -> Vec<ArticleRecord> {
    records
        .enumerate()
        .map(|(idx, mut record)| {
            record.insert(RANK_COLUMN.to_string(), Value::from(idx + 1));
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> ArticleRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn ids(records: &[ArticleRecord]) -> Vec<&str> {
        records
            .iter()
            .map(|r| r.get("id").and_then(Value::as_str).unwrap_or_default())
            .collect()
    }

    fn ranks(records: &[ArticleRecord]) -> Vec<u64> {
        records
            .iter()
            .map(|r| r.get(RANK_COLUMN).and_then(Value::as_u64).unwrap_or_default())
            .collect()
    }

    #[test]
    fn ranks_by_score_descending() {
        let records = vec![
            record(json!({"id": "a", "popularity_percentage": 10})),
            record(json!({"id": "b", "popularity_percentage": 90})),
            record(json!({"id": "c", "popularity_percentage": 50})),
        ];
        let ranked = RankingEngine::default().rank_by_score(records).expect("ranked");
        assert_eq!(ids(&ranked), vec!["b", "c", "a"]);
        assert_eq!(ranks(&ranked), vec![1, 2, 3]);
    }

    #[test]
    fn ranks_by_priority_then_score() {
        let records = vec![
            record(json!({"id": "x", "popularity_percentage": 60.0, "priority_label": "High Priority"})),
            record(json!({"id": "y", "popularity_percentage": 80.0, "priority_label": "High Priority"})),
            record(json!({"id": "z", "popularity_percentage": 95.0, "priority_label": "Medium Priority"})),
        ];
        let ranked = RankingEngine::default()
            .rank_by_priority(records)
            .expect("ranked");
        assert_eq!(ids(&ranked), vec!["y", "x", "z"]);
        assert_eq!(ranks(&ranked), vec![1, 2, 3]);
        assert!(ranked.iter().all(|r| r.len() == 4), "tier must not leak");
    }

    #[test]
    fn missing_column_is_invalid_input() {
        let records = vec![record(json!({"id": "a", "score": 1}))];
        let error = RankingEngine::default()
            .rank_by_score(records.clone())
            .expect_err("no score column");
        assert_eq!(
            error,
            RankingError::InvalidInput {
                column: DEFAULT_SCORE_COLUMN.to_string()
            }
        );

        let error = RankingEngine::new("score")
            .rank_by_priority(records)
            .expect_err("no label column");
        assert_eq!(
            error,
            RankingError::InvalidInput {
                column: PRIORITY_COLUMN.to_string()
            }
        );
    }

    #[test]
    fn empty_batch_ranks_to_empty() {
        let engine = RankingEngine::default();
        assert!(engine.rank(Vec::new(), RankingMode::Score).expect("ok").is_empty());
        assert!(engine.rank(Vec::new(), RankingMode::Priority).expect("ok").is_empty());
    }

    #[test]
    fn missing_and_non_numeric_scores_sort_last() {
        let records = vec![
            record(json!({"id": "none"})),
            record(json!({"id": "low", "popularity_percentage": 5})),
            record(json!({"id": "text", "popularity_percentage": "high"})),
            record(json!({"id": "top", "popularity_percentage": 70.5})),
        ];
        let ranked = RankingEngine::default().rank_by_score(records).expect("ranked");
        assert_eq!(ids(&ranked), vec!["top", "low", "none", "text"]);
        assert_eq!(ranks(&ranked), vec![1, 2, 3, 4]);
    }

    #[test]
    fn unknown_labels_sort_after_known_tiers() {
        let records = vec![
            record(json!({"id": "odd", "popularity_percentage": 99, "priority_label": "urgent"})),
            record(json!({"id": "non", "popularity_percentage": 10, "priority_label": "Non-Priority"})),
            record(json!({"id": "med", "popularity_percentage": 40, "priority_label": "Medium Priority"})),
        ];
        let ranked = RankingEngine::default()
            .rank(records, RankingMode::Priority)
            .expect("ranked");
        assert_eq!(ids(&ranked), vec!["med", "non", "odd"]);
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let records = (0..5)
            .map(|i| record(json!({"id": format!("r{i}"), "popularity_percentage": 42})))
            .collect();
        let ranked = RankingEngine::default().rank_by_score(records).expect("ranked");
        assert_eq!(ids(&ranked), vec!["r0", "r1", "r2", "r3", "r4"]);
    }

    #[test]
    fn existing_rank_is_overwritten() {
        let records = vec![
            record(json!({"id": "a", "rank": 7, "popularity_percentage": 1})),
            record(json!({"id": "b", "rank": 1, "popularity_percentage": 2})),
        ];
        let ranked = RankingEngine::default().rank_by_score(records).expect("ranked");
        assert_eq!(ids(&ranked), vec!["b", "a"]);
        assert_eq!(ranks(&ranked), vec![1, 2]);
    }

    #[test]
    fn mode_parses_from_snake_case() {
        let mode: RankingMode = serde_json::from_str("\"priority\"").expect("mode");
        assert_eq!(mode, RankingMode::Priority);
        assert_eq!(RankingMode::default(), RankingMode::Score);
    }
}
