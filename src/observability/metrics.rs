/// Prometheusメトリクス定義。
use prometheus::{
    Counter, CounterVec, Histogram, Registry, register_counter_vec_with_registry,
    register_counter_with_registry, register_histogram_with_registry,
};
use std::sync::Arc;

use crate::scoring::PriorityLabel;

/// メトリクスコレクター。
#[derive(Debug, Clone)]
pub struct Metrics {
    // カウンター
    pub articles_scored: Counter,
    pub articles_dropped: Counter,
    pub ranking_requests: Counter,
    pub ranking_failures: Counter,
    pub validation_rejections: Counter,
    pub priority_assignments: CounterVec,

    // ヒストグラム
    pub scoring_duration: Histogram,
    pub batch_duration: Histogram,
}

impl Metrics {
    /// 新しいメトリクスコレクターを作成し、`registry` に登録する。
    ///
    /// # Errors
    /// 同名のメトリクスが既に登録されている場合はエラーを返す。
    pub fn new(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        Ok(Self {
            articles_scored: register_counter_with_registry!(
                "popularity_articles_scored_total",
                "Total number of articles scored",
                registry
            )?,
            articles_dropped: register_counter_with_registry!(
                "popularity_articles_dropped_total",
                "Articles dropped as empty or duplicate during batch preparation",
                registry
            )?,
            ranking_requests: register_counter_with_registry!(
                "popularity_ranking_requests_total",
                "Total number of ranking requests",
                registry
            )?,
            ranking_failures: register_counter_with_registry!(
                "popularity_ranking_failures_total",
                "Ranking requests rejected because a required column was missing",
                registry
            )?,
            validation_rejections: register_counter_with_registry!(
                "popularity_validation_rejections_total",
                "Requests rejected by input validation",
                registry
            )?,
            priority_assignments: register_counter_vec_with_registry!(
                "popularity_priority_assignments_total",
                "Scored articles per priority label",
                &["priority"],
                registry
            )?,
            scoring_duration: register_histogram_with_registry!(
                "popularity_scoring_duration_seconds",
                "Duration of single-article scoring",
                registry
            )?,
            batch_duration: register_histogram_with_registry!(
                "popularity_batch_duration_seconds",
                "Duration of batch preparation, scoring and ranking",
                registry
            )?,
        })
    }

    /// 採点結果の優先度ラベルを集計する。
    pub fn observe_priority(&self, label: PriorityLabel) {
        self.priority_assignments
            .with_label_values(&[label.as_str()])
            .inc();
    }
}
