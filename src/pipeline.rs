//! The fetch → summarize → overview run.
//!
//! Each stage finishes before the next starts:
//! 1. **Fetching**: one GET against the news API, normalized to articles
//! 2. **Summarizing**: one model call per article, in fetch order
//! 3. **Overview**: one model call over all summaries
//!
//! Any error ends the run; nothing partial is returned.

use crate::api::AskAsync;
use crate::config::{PipelineOptions, Settings};
use crate::error::{PipelineError, Result};
use crate::models::{Digest, NewsQuery};
use crate::newsapi;
use crate::summarize::{summarize_articles, write_overview};
use reqwest::Client;
use serde_json::to_string_pretty;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Run the whole pipeline for `news_query`.
///
/// # Arguments
///
/// * `http` - client used for the news API
/// * `settings` - endpoints and model names
/// * `options` - url retention and model tier
/// * `news_query` - search parameters
/// * `model` - language model used for every completion
#[instrument(level = "info", skip_all, fields(query = %news_query.query, from = %news_query.from, to = %news_query.to))]
pub async fn run<M>(
    http: &Client,
    settings: &Settings,
    options: PipelineOptions,
    news_query: &NewsQuery,
    model: &M,
) -> Result<Digest>
where
    M: AskAsync<Response = String>,
{
    let t0 = Instant::now();

    let articles = newsapi::fetch_articles(http, &settings.news_endpoint, news_query).await?;
    info!(count = articles.len(), "Fetch stage complete");

    let summaries = summarize_articles(model, settings, options, &articles).await?;
    info!(count = summaries.len(), "Summary stage complete");

    let overview = write_overview(model, settings, options, &summaries).await?;

    let elapsed = t0.elapsed();
    info!(
        ?elapsed,
        articles = summaries.len(),
        retain_url = options.retain_url,
        model_tier = ?options.model_tier,
        "Digest complete"
    );

    Ok(Digest {
        summaries,
        overview,
    })
}

/// Line printed when the news response is not JSON.
pub const DECODE_FAILURE_MESSAGE: &str = "Error decoding the JSON response.";

/// Turn a run result into the text printed on stdout.
///
/// A decode failure is a normal outcome with its own message; every other
/// error is handed back so the process exits non-zero.
pub fn render(result: Result<Digest>) -> Result<String> {
    match result {
        Ok(digest) => {
            let summaries = to_string_pretty(&digest.summaries).map_err(|e| {
                PipelineError::Schema(format!("cannot render summaries: {e}"))
            })?;
            Ok(format!("{summaries}\n\n{}", digest.overview))
        }
        Err(e) if e.is_decode_failure() => {
            debug!(error = %e, "News response was not JSON");
            Ok(DECODE_FAILURE_MESSAGE.to_string())
        }
        Err(e) => Err(e),
    }
}
