//! News API client: query building, fetching and normalization.
//!
//! The search runs in two phases, mirroring how the rest of the pipeline is
//! staged:
//!
//! 1. **Fetching** ([`query`]): build the `/v2/everything` URL and GET the raw
//!    body. The body is handed on untouched, whatever the HTTP status.
//! 2. **Normalizing** ([`normalize`]): decode the JSON and project every
//!    article onto [`NewsArticle`].
//!
//! A body that is not JSON at all surfaces as [`PipelineError::Parse`], which
//! the binary reports without an error exit.
//!
//! [`PipelineError::Parse`]: crate::error::PipelineError::Parse

pub mod normalize;
pub mod query;

use crate::error::Result;
use crate::models::{NewsArticle, NewsQuery};
use reqwest::Client;
use tracing::{info, instrument, warn};

/// Search the news API and return the normalized articles in provider order.
#[instrument(level = "info", skip_all, fields(query = %news_query.query))]
pub async fn fetch_articles(
    client: &Client,
    endpoint: &str,
    news_query: &NewsQuery,
) -> Result<Vec<NewsArticle>> {
    if !query::is_known_scope(&news_query.search_in) {
        warn!(
            search_in = %news_query.search_in,
            "searchIN is not one of title/description/content; sending it as given"
        );
    }
    if news_query.from > news_query.to {
        warn!(from = %news_query.from, to = %news_query.to, "Date range is inverted");
    }

    let url = query::build_search_url(endpoint, news_query)?;
    info!(url = %query::redacted(&url), "Requesting news search");

    let body = query::fetch_raw(client, &url).await?;
    let articles = normalize::parse_articles(&body)?;
    info!(count = articles.len(), "Normalized news articles");
    Ok(articles)
}
