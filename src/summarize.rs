//! Per-article summaries and the aggregate overview.
//!
//! Articles are summarized one at a time, in fetch order. The overview call
//! waits until every summary exists; a failed call anywhere stops the stage.

use crate::api::{AskAsync, Prompt, ask_logged};
use crate::config::{PipelineOptions, Settings};
use crate::error::{PipelineError, Result};
use crate::models::{ArticleSummary, NewsArticle};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::{debug, info, instrument};

pub const ARTICLE_SUMMARY_PROMPT: &str =
    "Summarize the content of this article in two sentences.";

pub const OVERVIEW_PROMPT: &str = "Write a comprehensive overview of the news mentioned in these summaries but do not include duplicate information. Use the mutually exclusive, collectively exhaustive approach. Cite the sources for the topics you identify by providing the URLs mentioned in the summaries in your text as inline references.";

/// Overview instruction used when summaries carry no urls to cite.
pub const OVERVIEW_PROMPT_UNCITED: &str = "Write a comprehensive overview of the news mentioned in these summaries but do not include duplicate information. Use the mutually exclusive, collectively exhaustive approach.";

fn to_user_message<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| PipelineError::Schema(format!("cannot serialize user message: {e}")))
}

/// Ask the summary model for a two-sentence summary of `article`.
#[instrument(level = "info", skip_all, fields(url = %article.url))]
pub async fn summarize_article<M>(
    model: &M,
    settings: &Settings,
    options: PipelineOptions,
    article: &NewsArticle,
) -> Result<ArticleSummary>
where
    M: AskAsync<Response = String>,
{
    let user = to_user_message(article)?;
    let prompt = Prompt {
        model: &settings.summary_model,
        system: ARTICLE_SUMMARY_PROMPT,
        user: &user,
    };
    let summary = ask_logged(model, &prompt).await?;
    Ok(ArticleSummary::from_article(article, summary, options.retain_url))
}

/// Summarize every article sequentially, stopping at the first failure.
#[instrument(level = "info", skip_all, fields(count = articles.len()))]
pub async fn summarize_articles<M>(
    model: &M,
    settings: &Settings,
    options: PipelineOptions,
    articles: &[NewsArticle],
) -> Result<Vec<ArticleSummary>>
where
    M: AskAsync<Response = String>,
{
    let total = articles.len();
    let summaries: Vec<ArticleSummary> = stream::iter(articles.iter().enumerate())
        .then(move |(index, article)| async move {
            debug!(index, total, url = %article.url, "Summarizing article");
            summarize_article(model, settings, options, article).await
        })
        .try_collect()
        .await?;

    info!(count = summaries.len(), "Summarized all articles");
    Ok(summaries)
}

/// Ask for the deduplicated overview of all `summaries`.
#[instrument(level = "info", skip_all, fields(count = summaries.len()))]
pub async fn write_overview<M>(
    model: &M,
    settings: &Settings,
    options: PipelineOptions,
    summaries: &[ArticleSummary],
) -> Result<String>
where
    M: AskAsync<Response = String>,
{
    let user = to_user_message(summaries)?;
    let system = if options.retain_url {
        OVERVIEW_PROMPT
    } else {
        OVERVIEW_PROMPT_UNCITED
    };
    let prompt = Prompt {
        model: settings.overview_model_for(options.model_tier),
        system,
        user: &user,
    };
    ask_logged(model, &prompt).await
}
