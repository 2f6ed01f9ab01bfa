//! 重み付き線形結合による人気ポテンシャルスコア。
use std::sync::Arc;

use serde::Serialize;

use crate::article::ArticleText;
use crate::signals::{SignalExtractor, SignalVector};

pub mod priority;
pub mod weights;

pub use priority::{HIGH_PRIORITY_THRESHOLD, MEDIUM_PRIORITY_THRESHOLD, PriorityLabel};
pub use weights::{EDITORIAL_WEIGHTS, WeightError, WeightVector};

/// テキスト1件のスコアリング結果。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopularityResult {
    /// clamp(加重和 × 100, 0, 100)
    pub final_score: f64,
    /// クランプ前の 加重和 × 100
    pub unclamped_score: f64,
    pub signals: SignalVector,
}

impl PopularityResult {
    /// 最終スコアがクランプされたか。この場合、寄与度の合計は最終スコアと一致しない。
    #[must_use]
    pub fn is_clamped(&self) -> bool {
        (self.final_score - self.unclamped_score).abs() > f64::EPSILON
    }

    #[must_use]
    pub fn priority(&self) -> PriorityLabel {
        PriorityLabel::from_score(self.final_score)
    }
}

/// 重みベクトルを共有しつつシグナルを集約するスコアラー。
#[derive(Debug)]
pub struct PopularityScorer {
    extractor: SignalExtractor,
    weights: Arc<WeightVector>,
}

impl PopularityScorer {
    #[must_use]
    pub fn new(weights: Arc<WeightVector>) -> Self {
        Self::with_extractor(SignalExtractor::new(), weights)
    }

    #[must_use]
    pub fn with_extractor(extractor: SignalExtractor, weights: Arc<WeightVector>) -> Self {
        Self { extractor, weights }
    }

    /// 共有の重み。説明とスコアを一致させるため、説明エンジンにはこれを渡す。
    #[must_use]
    pub fn weights(&self) -> &Arc<WeightVector> {
        &self.weights
    }

    /// テキストをスコアリングする。空文字列を含むどんな入力でも失敗しない。
    #[must_use]
    pub fn score(&self, text: &str) -> PopularityResult {
        let signals = self.extractor.extract(text);
        let unclamped_score = self.weights.weighted_sum(&signals) * 100.0;
        let final_score = if unclamped_score.is_finite() {
            unclamped_score.clamp(0.0, 100.0)
        } else {
            0.0
        };
        PopularityResult {
            final_score,
            unclamped_score,
            signals,
        }
    }

    /// タイトルと説明文を連結してスコアリングする。
    #[must_use]
    pub fn score_article(&self, title: &str, description: &str) -> PopularityResult {
        self.score(&ArticleText::new(title, description).joined())
    }

    #[must_use]
    pub fn priority_label(&self, score: f64) -> PriorityLabel {
        PriorityLabel::from_score(score)
    }
}
