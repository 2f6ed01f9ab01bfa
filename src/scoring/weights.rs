//! 編集方針としての固定重み。
use serde::Serialize;
use serde::ser::SerializeMap;
use thiserror::Error;

use crate::signals::{SIGNAL_COUNT, SignalName, SignalVector};

const SUM_TOLERANCE: f64 = 1e-9;

/// [`SignalName::ALL`] の順に並べた編集重み。
pub const EDITORIAL_WEIGHTS: [(SignalName, f64); SIGNAL_COUNT] = [
    (SignalName::Emotion, 0.25),
    (SignalName::Urgency, 0.20),
    (SignalName::Lexical, 0.15),
    (SignalName::Readability, 0.15),
    (SignalName::Length, 0.10),
    (SignalName::Subjectivity, 0.15),
];

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum WeightError {
    #[error("weight for {signal} must be a finite non-negative number, got {weight}")]
    Invalid { signal: SignalName, weight: f64 },
    #[error("weights must sum to 1.0, got {sum}")]
    Sum { sum: f64 },
}

/// シグナルごとの重み。非負で合計1.0。構築後は変更しない。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightVector {
    weights: [f64; SIGNAL_COUNT],
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::editorial()
    }
}

impl WeightVector {
    /// 既定の編集重み（emotion 0.25, urgency 0.20, lexical 0.15, readability 0.15,
    /// length 0.10, subjectivity 0.15）。
    #[must_use]
    pub fn editorial() -> Self {
        let mut weights = [0.0; SIGNAL_COUNT];
        for (signal, weight) in EDITORIAL_WEIGHTS {
            weights[signal.index()] = weight;
        }
        Self { weights }
    }

    /// 検証済みの重みベクトルを構築する。指定のないシグナルの重みは 0。
    ///
    /// # Errors
    /// 重みが負か有限でない場合、または合計が 1.0 でない場合は [`WeightError`] を返す。
    pub fn new(
        entries: impl IntoIterator<Item = (SignalName, f64)>,
    ) -> Result<Self, WeightError> {
        let mut weights = [0.0; SIGNAL_COUNT];
        for (signal, weight) in entries {
            if !weight.is_finite() || weight < 0.0 {
                return Err(WeightError::Invalid { signal, weight });
            }
            weights[signal.index()] = weight;
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(WeightError::Sum { sum });
        }
        Ok(Self { weights })
    }

    #[must_use]
    pub fn weight(&self, signal: SignalName) -> f64 {
        self.weights[signal.index()]
    }

    /// 名前で重みを引く。未知のシグナルは0。
    #[must_use]
    pub fn weight_for(&self, name: &str) -> f64 {
        SignalName::from_name(name).map_or(0.0, |signal| self.weight(signal))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SignalName, f64)> + '_ {
        SignalName::ALL
            .into_iter()
            .map(move |signal| (signal, self.weight(signal)))
    }

    /// Σ signal × weight。スケーリングもクランプもしない。
    #[must_use]
    pub fn weighted_sum(&self, signals: &SignalVector) -> f64 {
        signals
            .iter()
            .map(|(signal, value)| value * self.weight(signal))
            .sum()
    }
}

impl Serialize for WeightVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(SIGNAL_COUNT))?;
        for (signal, weight) in self.iter() {
            map.serialize_entry(signal.as_str(), &weight)?;
        }
        map.end()
    }
}
