//! 記事テキストから6種類の言語シグナルを抽出する。
//!
//! どのシグナルもエラーを返さない。入力が空や異常な場合は安全な既定値（多くは0）に落ちる。
use std::fmt;

use serde::Serialize;
use serde::ser::SerializeMap;
use tracing::debug;

pub mod lexicon;
pub mod readability;
pub mod sentiment;
pub mod surface;
pub mod urgency;

use readability::{FleschReadingEase, ReadabilityEstimator};
use sentiment::{LexiconSentiment, Sentiment, SentimentEstimator};
use urgency::UrgencyMatcher;

pub const SIGNAL_COUNT: usize = 6;

/// シグナル名（閉じた集合）。並び順が反復順序になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalName {
    Emotion,
    Urgency,
    Lexical,
    Readability,
    Length,
    Subjectivity,
}

impl SignalName {
    pub const ALL: [SignalName; SIGNAL_COUNT] = [
        SignalName::Emotion,
        SignalName::Urgency,
        SignalName::Lexical,
        SignalName::Readability,
        SignalName::Length,
        SignalName::Subjectivity,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Emotion => "emotion",
            Self::Urgency => "urgency",
            Self::Lexical => "lexical",
            Self::Readability => "readability",
            Self::Length => "length",
            Self::Subjectivity => "subjectivity",
        }
    }

    /// モデル説明エンドポイントで使う表示名。
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Emotion => "Emotional Intensity",
            Self::Urgency => "Urgency",
            Self::Lexical => "Lexical Diversity",
            Self::Readability => "Readability",
            Self::Length => "Length",
            Self::Subjectivity => "Subjectivity",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|signal| signal.as_str() == name)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SignalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 6シグナルのスコア。全キーが常に存在する。
///
/// readability 以外は [0, 1] に収まる。readability は指標値を100で割っただけで
/// クランプしないため、極端なテキストでは負や1超になり得る。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalVector {
    values: [f64; SIGNAL_COUNT],
}

impl SignalVector {
    /// [`SignalName::ALL`] の順に並んだ値から構築する。
    #[must_use]
    pub fn from_values(values: [f64; SIGNAL_COUNT]) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn get(&self, signal: SignalName) -> f64 {
        self.values[signal.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SignalName, f64)> + '_ {
        SignalName::ALL
            .into_iter()
            .map(move |signal| (signal, self.get(signal)))
    }
}

impl Serialize for SignalVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(SIGNAL_COUNT))?;
        for (signal, value) in self.iter() {
            map.serialize_entry(signal.as_str(), &value)?;
        }
        map.end()
    }
}

/// シグナル抽出器。感情推定と可読性指標は差し替え可能な戦略として保持する。
pub struct SignalExtractor {
    sentiment: Box<dyn SentimentEstimator>,
    readability: Box<dyn ReadabilityEstimator>,
    urgency: &'static UrgencyMatcher,
}

impl fmt::Debug for SignalExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalExtractor")
            .field("urgency", &self.urgency)
            .finish_non_exhaustive()
    }
}

impl Default for SignalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalExtractor {
    /// 既定の戦略（辞書ベース感情推定 + Flesch Reading Ease）で構築する。
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategies(Box::new(LexiconSentiment::new()), Box::new(FleschReadingEase))
    }

    #[must_use]
    pub fn with_strategies(
        sentiment: Box<dyn SentimentEstimator>,
        readability: Box<dyn ReadabilityEstimator>,
    ) -> Self {
        Self {
            sentiment,
            readability,
            urgency: UrgencyMatcher::shared(),
        }
    }

    /// 感情極性の絶対値。
    #[must_use]
    pub fn emotion(&self, text: &str) -> f64 {
        self.estimate_sentiment(text).polarity.abs()
    }

    #[must_use]
    pub fn subjectivity(&self, text: &str) -> f64 {
        self.estimate_sentiment(text).subjectivity
    }

    #[must_use]
    pub fn urgency(&self, text: &str) -> f64 {
        self.urgency.score(text)
    }

    #[must_use]
    pub fn lexical_diversity(&self, text: &str) -> f64 {
        surface::lexical_diversity(text)
    }

    /// 可読性指標を100で割った値。指標の計算に失敗した場合は0。
    #[must_use]
    pub fn readability(&self, text: &str) -> f64 {
        match self.readability.estimate(text) {
            Ok(index) if index.is_finite() => index / 100.0,
            Ok(index) => {
                debug!(index, "readability index is not finite; falling back to zero");
                0.0
            }
            Err(error) => {
                debug!(%error, "readability estimation failed; falling back to zero");
                0.0
            }
        }
    }

    #[must_use]
    pub fn length(&self, text: &str) -> f64 {
        surface::length_score(text)
    }

    /// 6つのシグナルをすべて計算する。感情推定は1回だけ行い、emotion と subjectivity で共有する。
    #[must_use]
    pub fn extract(&self, text: &str) -> SignalVector {
        let sentiment = self.estimate_sentiment(text);
        SignalVector::from_values([
            sentiment.polarity.abs(),
            self.urgency(text),
            self.lexical_diversity(text),
            self.readability(text),
            self.length(text),
            sentiment.subjectivity,
        ])
    }

    fn estimate_sentiment(&self, text: &str) -> Sentiment {
        self.sentiment.estimate(text).sanitized()
    }
}
