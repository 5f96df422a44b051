//! Search URL construction and the raw HTTP fetch.
//!
//! # URL Pattern
//!
//! ```text
//! {endpoint}?q=<text>&searchIN=<scope>&from=YYYY-MM-DD&to=YYYY-MM-DD&apiKey=<key>
//! ```
//!
//! followed, only when set, by `&language=<code>&pageSize=<n>&page=<n>`.
//!
//! Every value is percent-encoded: only `A-Z a-z 0-9 - _ . ~` pass through.

use crate::error::{PipelineError, Result};
use crate::models::NewsQuery;
use crate::utils::truncate_for_log;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Search scopes the provider documents for `searchIN`.
const KNOWN_SCOPES: [&str; 3] = ["title", "description", "content"];

/// Build the fully-qualified search URL for `news_query`.
pub fn build_search_url(endpoint: &str, news_query: &NewsQuery) -> Result<Url> {
    let mut url = Url::parse(endpoint)
        .map_err(|e| PipelineError::Config(format!("news endpoint `{endpoint}`: {e}")))?;

    let from = news_query.from.to_string();
    let to = news_query.to.to_string();
    let mut params = vec![
        ("q", news_query.query.clone()),
        ("searchIN", news_query.search_in.clone()),
        ("from", from),
        ("to", to),
        ("apiKey", news_query.api_key.clone()),
    ];
    if let Some(language) = &news_query.language {
        params.push(("language", language.clone()));
    }
    if let Some(page_size) = news_query.page_size {
        params.push(("pageSize", page_size.to_string()));
    }
    if let Some(page) = news_query.page {
        params.push(("page", page.to_string()));
    }

    let query = params
        .iter()
        .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    url.set_query(Some(&query));
    Ok(url)
}

/// The URL with its `apiKey` value masked, for logs.
pub fn redacted(url: &Url) -> String {
    let mut shown = url.clone();
    let query = url.query().map(|q| {
        q.split('&')
            .map(|pair| if pair.starts_with("apiKey=") { "apiKey=***" } else { pair })
            .collect::<Vec<_>>()
            .join("&")
    });
    shown.set_query(query.as_deref());
    shown.to_string()
}

/// Whether every comma-separated entry of `search_in` is a documented scope.
pub fn is_known_scope(search_in: &str) -> bool {
    search_in.split(',').all(|scope| {
        let scope = scope.trim().to_ascii_lowercase();
        KNOWN_SCOPES.contains(&scope.as_str())
    })
}

/// GET `url` and return the body text.
///
/// A non-success status is logged but the body is still returned: the news
/// API reports failures as JSON, which the normalizer interprets.
#[instrument(level = "info", skip_all)]
pub async fn fetch_raw(client: &Client, url: &Url) -> Result<String> {
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!(%status, body_preview = %truncate_for_log(&body, 200), "News API returned a non-success status");
    }
    info!(bytes = body.len(), "Fetched news response");
    debug!(body_preview = %truncate_for_log(&body, 500), "News response");
    Ok(body)
}
