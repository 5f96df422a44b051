//! Data models for the digest pipeline.
//!
//! This module defines the values that flow between the pipeline stages:
//! - [`NewsQuery`]: the immutable search parameters built from the CLI
//! - [`NewsArticle`]: a provider article projected to the four fields we use
//! - [`ArticleSummary`]: the model's condensation of one article, keyed by url
//! - [`Digest`]: everything a run produces
//!
//! Field order on the serialized types is significant: it is the exact JSON
//! the language model receives as its user message.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

/// Search parameters for one run.
///
/// Constructed once from the command line and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    /// Free-text search terms (sent as `q`).
    pub query: String,
    /// Which article fields the provider searches (sent as `searchIN`).
    pub search_in: String,
    /// Oldest publication date, inclusive.
    pub from: NaiveDate,
    /// Newest publication date, inclusive.
    pub to: NaiveDate,
    /// News API key (sent as `apiKey`).
    pub api_key: String,
    /// Two-letter language code (sent as `language` when set).
    pub language: Option<String>,
    /// Results per page (sent as `pageSize` when set).
    pub page_size: Option<u32>,
    /// One-based result page (sent as `page` when set).
    pub page: Option<u32>,
}

/// A fetched article reduced to the fields the summarizer needs.
///
/// Values are kept exactly as the provider sent them, whatever their JSON
/// type (NewsAPI sends `null` for missing text), and serialized back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsArticle {
    pub title: Value,
    pub description: Value,
    pub content: Value,
    pub url: Value,
}

/// A two-sentence summary of one article.
///
/// Built fresh from a [`NewsArticle`]; nothing but the url survives from the
/// source record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleSummary {
    /// Citation key. Absent when the pipeline runs without url retention.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Value>,
    pub summary: String,
}

impl ArticleSummary {
    /// Pair a model-produced summary with its source article.
    pub fn from_article(article: &NewsArticle, summary: String, retain_url: bool) -> Self {
        Self {
            url: retain_url.then(|| article.url.clone()),
            summary,
        }
    }
}

/// The complete output of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Digest {
    /// Per-article summaries, in fetch order.
    pub summaries: Vec<ArticleSummary>,
    /// The final cited overview.
    pub overview: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn article(url: &str) -> NewsArticle {
        NewsArticle {
            title: json!("A"),
            description: json!("d"),
            content: json!("c"),
            url: json!(url),
        }
    }

    #[test]
    fn test_article_serializes_in_field_order() {
        let json = serde_json::to_string(&article("http://x/1")).unwrap();
        assert_eq!(
            json,
            r#"{"title":"A","description":"d","content":"c","url":"http://x/1"}"#
        );
    }

    #[test]
    fn test_article_values_serialize_unchanged() {
        let article = NewsArticle {
            title: json!(1),
            description: Value::Null,
            content: json!(["a", "b"]),
            url: Value::Null,
        };
        assert_eq!(
            serde_json::to_string(&article).unwrap(),
            r#"{"title":1,"description":null,"content":["a","b"],"url":null}"#
        );
    }

    #[test]
    fn test_summary_keeps_source_url() {
        let summary = ArticleSummary::from_article(&article("http://x/1"), "S".into(), true);
        assert_eq!(summary.url, Some(json!("http://x/1")));
        assert_eq!(
            serde_json::to_string(&summary).unwrap(),
            r#"{"url":"http://x/1","summary":"S"}"#
        );
    }

    #[test]
    fn test_summary_keeps_null_url() {
        let mut source = article("unused");
        source.url = Value::Null;
        let summary = ArticleSummary::from_article(&source, "S".into(), true);
        assert_eq!(
            serde_json::to_string(&summary).unwrap(),
            r#"{"url":null,"summary":"S"}"#
        );
    }

    #[test]
    fn test_summary_without_url_retention() {
        let summary = ArticleSummary::from_article(&article("http://x/1"), "S".into(), false);
        assert_eq!(summary.url, None);
        assert_eq!(serde_json::to_string(&summary).unwrap(), r#"{"summary":"S"}"#);
    }

    #[test]
    fn test_summary_does_not_mix_urls() {
        let sources = [article("http://x/1"), article("http://x/2"), article("http://x/3")];
        let summaries: Vec<ArticleSummary> = sources
            .iter()
            .map(|a| ArticleSummary::from_article(a, format!("about {}", a.url), true))
            .collect();

        for (source, summary) in sources.iter().zip(&summaries) {
            assert_eq!(summary.url.as_ref(), Some(&source.url));
        }
    }

    #[test]
    fn test_digest_serialization() {
        let digest = Digest {
            summaries: vec![ArticleSummary {
                url: Some(json!("http://x/1")),
                summary: "S".into(),
            }],
            overview: "O".into(),
        };
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(
            json,
            r#"{"summaries":[{"url":"http://x/1","summary":"S"}],"overview":"O"}"#
        );
    }
}
