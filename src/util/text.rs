/// テキスト処理ユーティリティ。
///
/// 文分割、ハッシング、バッチ入力向けの簡易クリーニングを提供します。
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;
use xxhash_rust::xxh3::xxh3_64;

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+|www\S+").expect("url regex"));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("html tag regex"));
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s.,!?]").expect("disallowed chars regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// テキストをXXH3でハッシュする。
///
/// XXH3は高速で衝突率が低いハッシュアルゴリズムです。
#[must_use]
pub fn hash_text(text: &str) -> u64 {
    xxh3_64(text.as_bytes())
}

/// テキストを文に分割する。
///
/// Unicode UAX#29に準拠した文境界検出を使用します。
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// バッチ入力向けの最小限のクリーニング。
///
/// NFC正規化と小文字化のあと、URL・HTMLタグを除去し、英数字と `.,!?`・空白以外を落として
/// 空白を1つに畳む。
#[must_use]
pub fn clean_text(text: &str) -> String {
    let normalized = text.nfc().collect::<String>().to_lowercase();
    let without_urls = URL.replace_all(&normalized, "");
    let without_tags = HTML_TAG.replace_all(&without_urls, "");
    let allowed = DISALLOWED.replace_all(&without_tags, "");
    WHITESPACE.replace_all(&allowed, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn hash_text_is_deterministic() {
        let text = "Hello, world!";
        assert_eq!(hash_text(text), hash_text(text));
    }

    #[test]
    fn hash_text_produces_different_hashes() {
        assert_ne!(hash_text("Hello, world!"), hash_text("Goodbye, world!"));
    }

    #[test]
    fn split_sentences_handles_simple_text() {
        let text = "First sentence. Second sentence! Third sentence?";
        let sentences = split_sentences(text);
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0], "First sentence.");
        assert_eq!(sentences[1], "Second sentence!");
        assert_eq!(sentences[2], "Third sentence?");
    }

    #[test]
    fn split_sentences_filters_empty() {
        let text = "Sentence one.  \n\n  Sentence two.";
        assert_eq!(split_sentences(text).len(), 2);
    }

    #[rstest]
    #[case("<p>Hello <strong>World</strong>!</p>", "hello world!")]
    #[case("Read more at https://example.com/story?id=1 now", "read more at now")]
    #[case("Visit www.example.org today.", "visit today.")]
    #[case("Price: $5 — 50% off!!", "price 5 50 off!!")]
    #[case("  many   spaces\n\tand lines ", "many spaces and lines")]
    #[case("", "")]
    fn clean_text_strips_markup_and_noise(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(clean_text(raw), expected);
    }
}
