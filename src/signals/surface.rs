//! 表層統計。語彙の多様性と長さの段階関数。
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

static WORD_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word token regex"));

/// 小文字化したテキスト中の `\w+` トークンのうち、異なり語の割合。トークンがなければ 0。
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn lexical_diversity(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let mut total = 0usize;
    let mut distinct: FxHashSet<&str> = FxHashSet::default();
    for token in WORD_TOKEN.find_iter(&lowered) {
        total += 1;
        distinct.insert(token.as_str());
    }
    if total == 0 {
        return 0.0;
    }
    distinct.len() as f64 / total as f64
}

/// 空白区切りの語数。
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[must_use]
pub fn length_score(text: &str) -> f64 {
    length_score_for(word_count(text))
}

/// 語数に対する段階関数。短すぎる記事と長すぎる記事を減点する。
#[must_use]
pub fn length_score_for(words: usize) -> f64 {
    match words {
        0..50 => 0.3,
        50..150 => 1.0,
        150..300 => 0.8,
        _ => 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[rstest]
    #[case(0, 0.3)]
    #[case(40, 0.3)]
    #[case(49, 0.3)]
    #[case(50, 1.0)]
    #[case(149, 1.0)]
    #[case(150, 0.8)]
    #[case(200, 0.8)]
    #[case(299, 0.8)]
    #[case(300, 0.5)]
    #[case(400, 0.5)]
    fn length_steps(#[case] count: usize, #[case] expected: f64) {
        assert!((length_score(&words(count)) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn word_count_splits_on_any_whitespace() {
        assert_eq!(word_count("  one\ttwo\nthree  "), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn lexical_diversity_is_case_folded() {
        let diversity = lexical_diversity("The the THE cat");
        assert!((diversity - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn lexical_diversity_ignores_punctuation() {
        assert!((lexical_diversity("Alpha, beta! Gamma?") - 1.0).abs() < f64::EPSILON);
        assert_eq!(lexical_diversity("... !!! ---"), 0.0);
        assert_eq!(lexical_diversity(""), 0.0);
    }
}
