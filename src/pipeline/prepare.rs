use rustc_hash::FxHashSet;
use tracing::debug;

use crate::article::ArticleInput;
use crate::util::text::{clean_text, hash_text};

/// 整形と重複除去を通過した記事。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreparedBatch {
    pub articles: Vec<ArticleInput>,
    pub dropped: usize,
}

/// バッチを整形する。
///
/// `clean` が真ならタイトルと説明文を [`clean_text`] で正規化する。結合テキスト
/// （`"{title} [SEP] {description}"`）が空の記事と、同じ結合テキストの2件目以降は
/// 取り除く。
#[must_use]
pub fn prepare_batch(inputs: Vec<ArticleInput>, clean: bool) -> PreparedBatch {
    let total = inputs.len();
    let mut seen = FxHashSet::default();
    let mut articles = Vec::with_capacity(total);

    for mut article in inputs {
        if clean {
            article.title = clean_text(&article.title);
            article.description = clean_text(&article.description);
        }
        if article.text().is_blank() {
            continue;
        }
        if seen.insert(hash_text(&article.text().full_text())) {
            articles.push(article);
        }
    }

    let dropped = total - articles.len();
    if dropped > 0 {
        debug!(total, dropped, "dropped empty or duplicate articles");
    }
    PreparedBatch { articles, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_duplicates_keeping_first() {
        let mut first = ArticleInput::new("Storm hits", "Coast braces");
        first.extra.insert("id".into(), 1.into());
        let mut second = ArticleInput::new("Storm hits", "Coast braces");
        second.extra.insert("id".into(), 2.into());

        let batch = prepare_batch(vec![first, second, ArticleInput::new("Other", "")], false);

        assert_eq!(batch.articles.len(), 2);
        assert_eq!(batch.dropped, 1);
        assert_eq!(batch.articles[0].extra.get("id"), Some(&1.into()));
    }

    #[test]
    fn cleaning_collapses_near_duplicates() {
        let batch = prepare_batch(
            vec![
                ArticleInput::new("<b>Storm</b> hits", "See https://example.com now"),
                ArticleInput::new("storm   hits", "see now"),
            ],
            true,
        );
        assert_eq!(batch.articles.len(), 1);
        assert_eq!(batch.articles[0].title, "storm hits");
        assert_eq!(batch.articles[0].description, "see now");
    }

    #[test]
    fn drops_articles_that_clean_to_nothing() {
        let batch = prepare_batch(
            vec![
                ArticleInput::new("<p></p>", "http://only.link"),
                ArticleInput::new("", "   "),
            ],
            true,
        );
        assert!(batch.articles.is_empty());
        assert_eq!(batch.dropped, 2);
    }

    #[test]
    fn without_cleaning_text_is_untouched() {
        let batch = prepare_batch(vec![ArticleInput::new("<b>Bold</b>", "Body")], false);
        assert_eq!(batch.articles[0].title, "<b>Bold</b>");
    }
}
