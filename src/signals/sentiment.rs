//! 辞書ベースの感情極性・主観性推定。
//!
//! 評価語ごとに (極性, 主観性) を引き、直前の強調語で倍率をかけ、否定語があれば
//! 極性を -0.5 倍する。テキスト全体の値は一致した評価語の平均。
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;

use super::lexicon::{INTENSIFIERS, NEGATIONS, SENTIMENT_LEXICON, TRANSPARENT_WORDS};

const NEGATION_FACTOR: f64 = -0.5;

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)*").expect("sentiment token regex"));

static LEXICON: Lazy<FxHashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    SENTIMENT_LEXICON
        .iter()
        .map(|(word, polarity, subjectivity)| (*word, (*polarity, *subjectivity)))
        .collect()
});

static INTENSITY: Lazy<FxHashMap<&'static str, f64>> =
    Lazy::new(|| INTENSIFIERS.iter().copied().collect());

/// 極性 [-1, 1] と主観性 [0, 1]。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sentiment {
    pub polarity: f64,
    pub subjectivity: f64,
}

impl Sentiment {
    /// 範囲外や非有限値を安全な値に丸める。
    #[must_use]
    pub fn sanitized(self) -> Self {
        let polarity = if self.polarity.is_finite() {
            self.polarity.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let subjectivity = if self.subjectivity.is_finite() {
            self.subjectivity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            polarity,
            subjectivity,
        }
    }
}

/// 感情推定の戦略。実装はパニックせず、常に値を返すこと。
pub trait SentimentEstimator: Send + Sync {
    fn estimate(&self, text: &str) -> Sentiment;
}

/// 形容詞辞書による推定器。強調語と否定を考慮する。
#[derive(Default, Clone, Copy)]
pub struct LexiconSentiment;

impl fmt::Debug for LexiconSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexiconSentiment")
            .field("entries", &SENTIMENT_LEXICON.len())
            .finish()
    }
}

impl LexiconSentiment {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SentimentEstimator for LexiconSentiment {
    #[allow(clippy::cast_precision_loss)]
    fn estimate(&self, text: &str) -> Sentiment {
        let lowered = text.to_lowercase();
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut hits = 0usize;
        let mut intensity: Option<f64> = None;
        let mut negated = false;

        for token in TOKEN.find_iter(&lowered).map(|m| m.as_str()) {
            if is_negation(token) {
                negated = true;
                continue;
            }
            if let Some(factor) = INTENSITY.get(token) {
                intensity = Some(intensity.unwrap_or(1.0) * factor);
                continue;
            }
            if let Some(&(polarity, subjectivity)) = LEXICON.get(token) {
                let factor = intensity.take().unwrap_or(1.0);
                let mut polarity = (polarity * factor).clamp(-1.0, 1.0);
                if negated {
                    polarity *= NEGATION_FACTOR;
                }
                polarity_sum += polarity;
                subjectivity_sum += (subjectivity * factor).min(1.0);
                hits += 1;
                negated = false;
                continue;
            }
            if TRANSPARENT_WORDS.contains(&token) {
                continue;
            }
            intensity = None;
            negated = false;
        }

        if hits == 0 {
            return Sentiment::default();
        }

        let count = hits as f64;
        Sentiment {
            polarity: polarity_sum / count,
            subjectivity: subjectivity_sum / count,
        }
        .sanitized()
    }
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}
