//! Projection of the news API payload onto [`NewsArticle`].
//!
//! The payload looks like:
//!
//! ```json
//! {"status":"ok","totalResults":1,"articles":[
//!   {"source":{..},"author":..,"title":..,"description":..,"url":..,
//!    "urlToImage":..,"publishedAt":..,"content":..}
//! ]}
//! ```
//!
//! Only `title`, `description`, `content` and `url` are kept. Each key must
//! be present on every record; a missing key is a schema error for the whole
//! run. A present value is kept as sent, `null` and non-strings included.

use crate::error::{PipelineError, Result};
use crate::models::NewsArticle;
use serde_json::{Map, Value};

/// Decode `body` and normalize its `articles` array, preserving order.
pub fn parse_articles(body: &str) -> Result<Vec<NewsArticle>> {
    let payload: Value = serde_json::from_str(body).map_err(PipelineError::Parse)?;

    if payload.get("status").and_then(Value::as_str) == Some("error") {
        let envelope = |name: &str| {
            payload
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string()
        };
        return Err(PipelineError::NewsApi {
            code: envelope("code"),
            message: envelope("message"),
        });
    }

    let articles = payload
        .get("articles")
        .ok_or_else(|| PipelineError::Schema("response has no `articles` field".into()))?
        .as_array()
        .ok_or_else(|| PipelineError::Schema("`articles` is not an array".into()))?;

    articles
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_article(index, raw))
        .collect()
}

fn normalize_article(index: usize, raw: &Value) -> Result<NewsArticle> {
    let record = raw
        .as_object()
        .ok_or_else(|| PipelineError::Schema(format!("article {index} is not an object")))?;

    Ok(NewsArticle {
        title: field(index, record, "title")?,
        description: field(index, record, "description")?,
        content: field(index, record, "content")?,
        url: field(index, record, "url")?,
    })
}

fn field(index: usize, record: &Map<String, Value>, name: &str) -> Result<Value> {
    record
        .get(name)
        .cloned()
        .ok_or_else(|| PipelineError::Schema(format!("article {index} has no `{name}` field")))
}
