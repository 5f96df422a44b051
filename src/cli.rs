//! Command-line interface definitions for News Digest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The news API key can come from a flag or the `NEWS_API_KEY` environment
//! variable; there is no built-in default.

use crate::config::{ModelTier, PipelineOptions};
use crate::models::NewsQuery;
use crate::utils::resolve_date_range;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the News Digest application.
///
/// # Examples
///
/// ```sh
/// # Yesterday's genAI news, API key from the environment
/// NEWS_API_KEY=... OPENAI_API_KEY=... news_digest
///
/// # A fixed window, titles only, one model for everything
/// news_digest --query "rust lang" --search-in title \
///     --from 2025-05-01 --to 2025-05-06 --model-tier single
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search text
    #[arg(long, default_value = "genAI")]
    pub query: String,

    /// Fields the news API searches (title, description, content)
    #[arg(long = "search-in", alias = "searchIN", default_value = "Description")]
    pub search_in: String,

    /// Oldest publication date, YYYY-MM-DD (default: yesterday)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Newest publication date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// News API key
    #[arg(long = "api-key", alias = "apiKey", env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Restrict results to one language, e.g. en or de
    #[arg(long)]
    pub language: Option<String>,

    /// Articles per request (the provider defaults to 100); each one costs a model call
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub page_size: Option<u32>,

    /// Result page to fetch, starting at 1
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// Optional path to a YAML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Which model writes the overview
    #[arg(long, value_enum, default_value_t = ModelTier::Tiered)]
    pub model_tier: ModelTier,

    /// Drop article urls from the summaries (the overview then cites nothing)
    #[arg(long)]
    pub no_retain_url: bool,
}

impl Cli {
    /// Build the search parameters, filling date defaults relative to `today`.
    pub fn news_query(&self, today: NaiveDate) -> NewsQuery {
        let (from, to) = resolve_date_range(self.from, self.to, today);
        NewsQuery {
            query: self.query.clone(),
            search_in: self.search_in.clone(),
            from,
            to,
            api_key: self.api_key.clone(),
            language: self.language.clone(),
            page_size: self.page_size,
            page: self.page,
        }
    }

    pub fn options(&self) -> PipelineOptions {
        PipelineOptions {
            retain_url: !self.no_retain_url,
            model_tier: self.model_tier,
        }
    }
}
