//! シグナルごとの寄与度と、人が読める理由の生成。
//!
//! 各シグナルの寄与度は `round(value × weight × 100, 2)`。エンジンはスコアラーと
//! 同じ `Arc<WeightVector>` で構築しなければならない。重みが異なると説明とスコアが食い違う。
//!
//! 最終スコアがクランプされた場合（極端な readability 値でのみ起こる）も寄与度は
//! クランプしないので、その合計は最終スコアと一致しなくなる。
use std::{cmp::Ordering, fmt, sync::Arc};

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::scoring::WeightVector;
use crate::signals::SignalVector;

pub const DEFAULT_TOP_K: usize = 3;

/// 小数第2位で丸める。
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// シグナルごとの寄与度（%）。入力の順序を保持する。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contribution {
    entries: Vec<(String, f64)>,
}

impl Contribution {
    #[must_use]
    pub fn get(&self, signal: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == signal)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 寄与度の合計。
    #[must_use]
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, value)| value).sum()
    }
}

impl FromIterator<(String, f64)> for Contribution {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Contribution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// 上位理由の1件。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reason {
    pub signal: String,
    pub value: f64,
}

impl fmt::Display for Reason {
    /// `"Emotion → 12.5% contribution"` 形式で表示する。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {}% contribution",
            capitalize(&self.signal),
            format_percentage(self.value)
        )
    }
}

#[derive(Debug, Clone)]
pub struct ExplainabilityEngine {
    weights: Arc<WeightVector>,
}

impl ExplainabilityEngine {
    #[must_use]
    pub fn new(weights: Arc<WeightVector>) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &Arc<WeightVector> {
        &self.weights
    }

    #[must_use]
    pub fn explain(&self, signals: &SignalVector) -> Contribution {
        self.explain_pairs(
            signals
                .iter()
                .map(|(signal, value)| (signal.as_str(), value)),
        )
    }

    /// 任意の (名前, 値) 列から寄与度を計算する。重みのない名前は寄与度0。
    pub fn explain_pairs<I, S>(&self, signals: I) -> Contribution
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        signals
            .into_iter()
            .map(|(name, value)| {
                let name = name.as_ref();
                let weight = self.weights.weight_for(name);
                (name.to_string(), round2(value * weight * 100.0))
            })
            .collect()
    }

    /// 寄与度の降順で上位 `top_k` 件。同値は入力順を保つ。
    #[must_use]
    pub fn top_reasons(&self, contribution: &Contribution, top_k: usize) -> Vec<Reason> {
        let mut ranked: Vec<(&str, f64)> = contribution.iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked
            .into_iter()
            .take(top_k)
            .map(|(signal, value)| Reason {
                signal: signal.to_string(),
                value,
            })
            .collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn format_percentage(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
