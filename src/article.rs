//! 記事入力（タイトル + 説明文）。
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// スコアリング時にタイトルと説明文をつなぐ区切り。
pub const SCORING_SEPARATOR: &str = ". ";
/// バッチの重複除去キーとなる結合テキストの区切り。
pub const FULL_TEXT_SEPARATOR: &str = " [SEP] ";

/// スコアリング用の一時的なテキスト対。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleText<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

impl<'a> ArticleText<'a> {
    #[must_use]
    pub fn new(title: &'a str, description: &'a str) -> Self {
        Self { title, description }
    }

    /// スコアリング用の `"{title}. {description}"`。
    #[must_use]
    pub fn joined(&self) -> String {
        format!("{}{SCORING_SEPARATOR}{}", self.title, self.description)
    }

    /// 重複除去用の `"{title} [SEP] {description}"`。
    #[must_use]
    pub fn full_text(&self) -> String {
        format!("{}{FULL_TEXT_SEPARATOR}{}", self.title, self.description)
    }

    /// タイトルと説明文の両方が空白のみか。
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.description.trim().is_empty()
    }
}

/// バッチ入力の1行。title/description 以外の列はそのまま順位付き出力に引き継ぐ。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArticleInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ArticleInput {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn text(&self) -> ArticleText<'_> {
        ArticleText::new(&self.title, &self.description)
    }
}
