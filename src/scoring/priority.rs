//! 最終スコアから3段階の優先度ラベルを決める。
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// この値以上は Medium Priority 以上。
pub const MEDIUM_PRIORITY_THRESHOLD: f64 = 35.0;
/// この値以上は High Priority。
pub const HIGH_PRIORITY_THRESHOLD: f64 = 80.0;

/// 編集上の優先度。シリアライズ形式は表示用文字列。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityLabel {
    #[serde(rename = "High Priority")]
    HighPriority,
    #[serde(rename = "Medium Priority")]
    MediumPriority,
    #[serde(rename = "Non-Priority")]
    NonPriority,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown priority label: {0}")]
pub struct ParsePriorityError(pub String);

impl PriorityLabel {
    pub const ALL: [PriorityLabel; 3] = [
        PriorityLabel::HighPriority,
        PriorityLabel::MediumPriority,
        PriorityLabel::NonPriority,
    ];

    /// 段階関数。境界値 35 と 80 は上位の段に属する。NaN は Non-Priority。
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_PRIORITY_THRESHOLD {
            Self::HighPriority
        } else if score >= MEDIUM_PRIORITY_THRESHOLD {
            Self::MediumPriority
        } else {
            Self::NonPriority
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HighPriority => "High Priority",
            Self::MediumPriority => "Medium Priority",
            Self::NonPriority => "Non-Priority",
        }
    }

    /// 優先度ランキングでの並び順（High が先頭）。
    #[must_use]
    pub fn tier(self) -> u8 {
        match self {
            Self::HighPriority => 0,
            Self::MediumPriority => 1,
            Self::NonPriority => 2,
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|priority| priority.as_str() == label)
    }
}

impl fmt::Display for PriorityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityLabel {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| ParsePriorityError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, PriorityLabel::NonPriority)]
    #[case(34.999, PriorityLabel::NonPriority)]
    #[case(35.0, PriorityLabel::MediumPriority)]
    #[case(79.999, PriorityLabel::MediumPriority)]
    #[case(80.0, PriorityLabel::HighPriority)]
    #[case(100.0, PriorityLabel::HighPriority)]
    #[case(f64::NAN, PriorityLabel::NonPriority)]
    fn boundaries_belong_to_upper_tier(#[case] score: f64, #[case] expected: PriorityLabel) {
        assert_eq!(PriorityLabel::from_score(score), expected);
    }

    #[test]
    fn label_is_monotonic_in_score() {
        let mut previous = PriorityLabel::from_score(0.0).tier();
        for step in 0..=1000 {
            let score = f64::from(step) / 10.0;
            let tier = PriorityLabel::from_score(score).tier();
            assert!(tier <= previous, "tier went down-priority at {score}");
            previous = tier;
        }
    }

    #[test]
    fn labels_round_trip_through_strings() {
        for label in PriorityLabel::ALL {
            assert_eq!(label.as_str().parse::<PriorityLabel>(), Ok(label));
            let json = serde_json::to_string(&label).expect("serializes");
            assert_eq!(json, format!("\"{}\"", label.as_str()));
        }
        assert!("high".parse::<PriorityLabel>().is_err());
    }
}
