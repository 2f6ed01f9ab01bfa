//! 記事1件（またはバッチ）を スコア → ラベル → 寄与度 → 理由 の順に処理する。
//!
//! スコアラーと説明エンジンが読む `Arc<WeightVector>` はパイプラインが1つだけ保持する。
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::article::{ArticleInput, ArticleText};
use crate::config::Config;
use crate::explain::{Contribution, DEFAULT_TOP_K, ExplainabilityEngine, Reason, round2};
use crate::ranking::{
    ArticleRecord, DEFAULT_SCORE_COLUMN, RankingEngine, RankingError, RankingMode,
};
use crate::scoring::{PopularityScorer, PriorityLabel, WeightVector};
use crate::signals::SignalVector;

pub mod prepare;

pub use prepare::{PreparedBatch, prepare_batch};

/// この件数以上のバッチは rayon のプールで解析する。
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// 出力列。同名の入力列は計算値で置き換える。
const OUTPUT_COLUMNS: [&str; 7] = [
    "title",
    "description",
    "popularity_percentage",
    "priority_label",
    "signals",
    "contributions",
    "top_reasons",
];

/// 解析済みの記事1件。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleAnalysis {
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// 小数第2位で丸めた最終スコア。
    pub popularity_percentage: f64,
    pub priority_label: PriorityLabel,
    pub signals: SignalVector,
    pub contributions: Contribution,
    pub top_reasons: Vec<Reason>,
}

impl ArticleAnalysis {
    /// ランキング用のレコードに変換する。`score_column` が既定と異なる場合は
    /// その列にもスコアを書き込む。
    #[must_use]
    pub fn to_record(&self, score_column: &str) -> ArticleRecord {
        let mut record = Map::new();
        record.insert("title".into(), Value::from(self.title.as_str()));
        record.insert("description".into(), Value::from(self.description.as_str()));
        for (key, value) in &self.extra {
            record.insert(key.clone(), value.clone());
        }
        record.insert(
            DEFAULT_SCORE_COLUMN.into(),
            Value::from(self.popularity_percentage),
        );
        record.insert(
            "priority_label".into(),
            Value::from(self.priority_label.as_str()),
        );
        record.insert(
            "signals".into(),
            Value::Object(
                self.signals
                    .iter()
                    .map(|(signal, value)| (signal.as_str().to_string(), Value::from(value)))
                    .collect(),
            ),
        );
        record.insert(
            "contributions".into(),
            Value::Object(
                self.contributions
                    .iter()
                    .map(|(signal, value)| (signal.to_string(), Value::from(value)))
                    .collect(),
            ),
        );
        record.insert(
            "top_reasons".into(),
            Value::Array(
                self.top_reasons
                    .iter()
                    .map(|reason| {
                        let mut entry = Map::new();
                        entry.insert("signal".into(), Value::from(reason.signal.as_str()));
                        entry.insert("value".into(), Value::from(reason.value));
                        Value::Object(entry)
                    })
                    .collect(),
            ),
        );
        if score_column != DEFAULT_SCORE_COLUMN {
            record.insert(
                score_column.to_string(),
                Value::from(self.popularity_percentage),
            );
        }
        record
    }
}

#[derive(Debug)]
pub struct PopularityPipeline {
    scorer: PopularityScorer,
    explainer: ExplainabilityEngine,
    ranking: RankingEngine,
    top_k: usize,
    parallel_threshold: usize,
}

impl Default for PopularityPipeline {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

impl PopularityPipeline {
    /// 既定の編集重みを1つだけ作り、スコアラーと説明エンジンで共有する。
    #[must_use]
    pub fn new(top_k: usize) -> Self {
        let weights = Arc::new(WeightVector::editorial());
        Self {
            scorer: PopularityScorer::new(Arc::clone(&weights)),
            explainer: ExplainabilityEngine::new(weights),
            ranking: RankingEngine::default(),
            top_k,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.top_reasons())
            .with_score_column(config.score_column())
            .with_parallel_threshold(config.parallel_threshold())
    }

    #[must_use]
    pub fn with_score_column(mut self, column: impl Into<String>) -> Self {
        self.ranking = RankingEngine::new(column);
        self
    }

    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    #[must_use]
    pub fn weights(&self) -> &Arc<WeightVector> {
        self.scorer.weights()
    }

    #[must_use]
    pub fn scorer(&self) -> &PopularityScorer {
        &self.scorer
    }

    #[must_use]
    pub fn explainer(&self) -> &ExplainabilityEngine {
        &self.explainer
    }

    #[must_use]
    pub fn ranking(&self) -> &RankingEngine {
        &self.ranking
    }

    #[must_use]
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    #[must_use]
    pub fn analyze(&self, title: &str, description: &str) -> ArticleAnalysis {
        self.analyze_input(ArticleInput::new(title, description))
    }

    /// 入力の追加列を保持したまま解析する。
    #[must_use]
    pub fn analyze_input(&self, input: ArticleInput) -> ArticleAnalysis {
        let ArticleInput {
            title,
            description,
            mut extra,
        } = input;
        extra.retain(|key, _| !OUTPUT_COLUMNS.contains(&key.as_str()));

        let result = self
            .scorer
            .score(&ArticleText::new(&title, &description).joined());
        let contributions = self.explainer.explain(&result.signals);
        let top_reasons = self.explainer.top_reasons(&contributions, self.top_k);

        ArticleAnalysis {
            title,
            description,
            extra,
            popularity_percentage: round2(result.final_score),
            priority_label: result.priority(),
            signals: result.signals,
            contributions,
            top_reasons,
        }
    }

    /// 入力順を保ったまま解析する。閾値以上のバッチは rayon で並列に処理する。
    #[must_use]
    pub fn analyze_batch(&self, inputs: Vec<ArticleInput>) -> Vec<ArticleAnalysis> {
        if inputs.len() >= self.parallel_threshold {
            debug!(articles = inputs.len(), "analysing batch in parallel");
            inputs
                .into_par_iter()
                .map(|input| self.analyze_input(input))
                .collect()
        } else {
            inputs
                .into_iter()
                .map(|input| self.analyze_input(input))
                .collect()
        }
    }

    /// # Errors
    /// ランキングエンジンの [`RankingError::InvalidInput`] をそのまま返す。
    pub fn rank(
        &self,
        analyses: &[ArticleAnalysis],
        mode: RankingMode,
    ) -> Result<Vec<ArticleRecord>, RankingError> {
        let records = analyses
            .iter()
            .map(|analysis| analysis.to_record(self.ranking.score_column()))
            .collect();
        self.ranking.rank(records, mode)
    }
}
