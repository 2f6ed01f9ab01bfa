//! 緊急性キーワードの照合。
//!
//! 小文字化したテキストに対する部分文字列一致で数える。語境界は見ないため
//! "nowhere" は "now" に一致する。スコアが変わるのでこの挙動は維持している。
use aho_corasick::{AhoCorasick, BuildError};
use once_cell::sync::Lazy;

/// 既定の緊急性キーワード。
pub const URGENCY_KEYWORDS: [&str; 8] = [
    "breaking",
    "urgent",
    "just in",
    "alert",
    "now",
    "today",
    "immediately",
    "developing",
];

static DEFAULT_MATCHER: Lazy<UrgencyMatcher> =
    Lazy::new(|| UrgencyMatcher::new(&URGENCY_KEYWORDS).expect("default urgency matcher"));

/// 固定キーワードに対する重複ありの Aho-Corasick マッチャー。
#[derive(Debug)]
pub struct UrgencyMatcher {
    ac: AhoCorasick,
    keyword_count: usize,
}

impl UrgencyMatcher {
    /// # Errors
    /// `keywords` からオートマトンを構築できない場合はエラーを返す。
    pub fn new(keywords: &[&str]) -> Result<Self, BuildError> {
        let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        let ac = AhoCorasick::new(&lowered)?;
        Ok(Self {
            ac,
            keyword_count: keywords.len(),
        })
    }

    /// プロセス全体で共有する既定 matcher。
    #[must_use]
    pub fn shared() -> &'static UrgencyMatcher {
        &DEFAULT_MATCHER
    }

    /// テキスト中に現れたキーワードの添字（重複なし、キーワード順）。
    #[must_use]
    pub fn matched_keywords(&self, text: &str) -> Vec<usize> {
        let lowered = text.to_lowercase();
        let mut hits = vec![false; self.keyword_count];
        for mat in self.ac.find_overlapping_iter(&lowered) {
            hits[mat.pattern().as_usize()] = true;
        }
        hits.iter()
            .enumerate()
            .filter_map(|(idx, hit)| hit.then_some(idx))
            .collect()
    }

    /// `text` に含まれるキーワードの割合。各キーワードは最大1回だけ数える。
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self, text: &str) -> f64 {
        if self.keyword_count == 0 {
            return 0.0;
        }
        self.matched_keywords(text).len() as f64 / self.keyword_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn four_of_eight_keywords_yield_half() {
        let matcher = UrgencyMatcher::shared();
        let score = matcher.score("Breaking news: urgent alert issued today");
        assert!((score - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn substring_match_counts_now_inside_nowhere() {
        // 語境界を見ない既存挙動。
        let matcher = UrgencyMatcher::shared();
        assert!((matcher.score("The storm came from nowhere") - 0.125).abs() < f64::EPSILON);
        assert!((matcher.score("I know the answer") - 0.125).abs() < f64::EPSILON);
        assert_eq!(matcher.score("I knew the answer"), 0.0);
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let matcher = UrgencyMatcher::shared();
        assert!((matcher.score("alert alert ALERT") - 0.125).abs() < f64::EPSILON);
    }

    #[test]
    fn overlapping_keywords_are_all_found() {
        // "just in" と "now" が文字 n を共有しても両方数える。
        let matcher = UrgencyMatcher::shared();
        let hits = matcher.matched_keywords("JUST INOW");
        assert_eq!(hits, vec![2, 4]);
    }

    #[rstest]
    #[case("", 0.0)]
    #[case("Developing story", 0.125)]
    #[case("Breaking urgent just in alert now today immediately developing", 1.0)]
    fn scores_are_fractions_of_the_keyword_list(#[case] text: &str, #[case] expected: f64) {
        let score = UrgencyMatcher::shared().score(text);
        assert!((score - expected).abs() < 1e-12, "{text}: {score}");
    }

    #[test]
    fn empty_keyword_list_scores_zero() {
        let matcher = UrgencyMatcher::new(&[]).expect("matcher builds");
        assert_eq!(matcher.score("breaking now"), 0.0);
    }
}
