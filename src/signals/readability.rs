//! 読みやすさ指標（Flesch Reading Ease）。
//!
//! 206.835 − 1.015 × (words / sentences) − 84.6 × (syllables / words)
//!
//! 値が大きいほど読みやすい。短く平易な文は100を超え、長く多音節の文は負になる。
//! 呼び出し側はクランプせずに100で割る。
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use crate::util::text::split_sentences;

/// 可読性指標の計算失敗。抽出器側で0に置き換えられる。
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReadabilityError {
    #[error("text contains no words")]
    NoWords,
    #[error("readability index is not a finite number")]
    NonFinite,
}

/// 可読性指標の戦略。
pub trait ReadabilityEstimator: Send + Sync {
    /// 指標の生の値を返す（通常の文章ではおおよそ 0〜100）。
    ///
    /// # Errors
    /// 指標を計算できない場合、実装はパニックせずエラーを返す。
    fn estimate(&self, text: &str) -> Result<f64, ReadabilityError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FleschReadingEase;

impl ReadabilityEstimator for FleschReadingEase {
    #[allow(clippy::cast_precision_loss)]
    fn estimate(&self, text: &str) -> Result<f64, ReadabilityError> {
        let stats = TextStatistics::collect(text);
        if stats.words == 0 {
            return Err(ReadabilityError::NoWords);
        }

        let words = stats.words as f64;
        let sentences = stats.sentences.max(1) as f64;
        let syllables = stats.syllables as f64;

        let index = 206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words);
        if !index.is_finite() {
            return Err(ReadabilityError::NonFinite);
        }
        Ok((index * 100.0).round() / 100.0)
    }
}

/// 語・文・音節の集計。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStatistics {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
}

impl TextStatistics {
    #[must_use]
    pub fn collect(text: &str) -> Self {
        let mut stats = Self::default();
        for sentence in split_sentences(text) {
            let mut has_word = false;
            for word in sentence.unicode_words() {
                has_word = true;
                stats.words += 1;
                stats.syllables += count_syllables(word);
            }
            if has_word {
                stats.sentences += 1;
            }
        }
        stats
    }
}

/// 母音グループ数による英語の音節数近似。最低1。
#[must_use]
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0usize;
    let mut previous_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    // 語末の黙字 e（"-le" で子音が前にある場合は発音する）
    let len = letters.len();
    if count > 1 && letters[len - 1] == 'e' {
        let consonant_le = len >= 3 && letters[len - 2] == 'l' && !is_vowel(letters[len - 3]);
        if !consonant_le && !is_vowel(letters[len - 2]) {
            count -= 1;
        }
    }

    count.max(1)
}
