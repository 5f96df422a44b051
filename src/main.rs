//! # News Digest
//!
//! Fetches recent articles matching a query from NewsAPI, summarizes each one
//! through an OpenAI-compatible LLM, and writes a single overview that cites
//! the source urls inline.
//!
//! ## Usage
//!
//! ```sh
//! export NEWS_API_KEY=... OPENAI_API_KEY=...
//! news_digest --query "open source AI" --search-in title
//! ```
//!
//! ## Architecture
//!
//! The application is a strictly sequential pipeline:
//! 1. **Fetching**: build the search URL and GET the results
//! 2. **Normalizing**: reduce each result to title, description, content, url
//! 3. **Summarizing**: one model call per article, then one overview call
//!
//! Summaries (as JSON) and then the overview are printed to stdout; logs go to
//! stderr.

use clap::Parser;
use reqwest::Client;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod models;
mod newsapi;
mod pipeline;
mod summarize;
mod utils;

#[cfg(test)]
mod testing;

use api::ChatCompletionClient;
use cli::Cli;
use config::{Settings, openai_api_key};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("news_digest starting up");

    let args = Cli::parse();
    let options = args.options();
    debug!(?args.config, ?options, "Parsed CLI arguments");

    // ---- Configuration: fail before any network traffic ----
    let settings = Settings::load(args.config.as_deref())?;
    let api_key = openai_api_key()?;

    let http = Client::new();
    let model = ChatCompletionClient::new(
        http.clone(),
        settings.api_base.clone(),
        api_key,
        settings.temperature,
    );
    let news_query = args.news_query(utils::today());

    let result = pipeline::run(&http, &settings, options, &news_query, &model).await;
    match pipeline::render(result) {
        Ok(printed) => {
            println!("{printed}");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Run failed");
            Err(e.into())
        }
    }
}
