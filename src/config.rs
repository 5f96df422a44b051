//! Runtime settings: endpoints, model names and pipeline options.
//!
//! Settings come from an optional YAML file; every field has a default so an
//! absent file (or a partial one) is fine. Secrets are never read from the
//! file: the language-model key comes from `OPENAI_API_KEY` and the news key
//! from the command line.
//!
//! ```yaml
//! news_endpoint: https://newsapi.org/v2/everything
//! api_base: https://api.openai.com/v1
//! summary_model: gpt-3.5-turbo
//! overview_model: gpt-4
//! temperature: 0.0
//! ```

use crate::error::{PipelineError, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument};
use url::Url;

/// Environment variable holding the language-model API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// NewsAPI search endpoint.
    pub news_endpoint: String,
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`).
    pub api_base: String,
    /// Model used for per-article summaries.
    pub summary_model: String,
    /// Model used for the overview when running tiered.
    pub overview_model: String,
    pub temperature: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            news_endpoint: "https://newsapi.org/v2/everything".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            summary_model: "gpt-3.5-turbo".to_string(),
            overview_model: "gpt-4".to_string(),
            temperature: 0.0,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file, or defaults when `path` is `None`.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            None => Settings::default(),
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    PipelineError::Config(format!("cannot read {}: {e}", path.display()))
                })?;
                let settings: Settings = serde_yaml::from_str(&raw).map_err(|e| {
                    PipelineError::Config(format!("invalid settings in {}: {e}", path.display()))
                })?;
                info!(path = %path.display(), "Loaded settings file");
                settings
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("news_endpoint", &self.news_endpoint),
            ("api_base", &self.api_base),
        ] {
            Url::parse(value)
                .map_err(|e| PipelineError::Config(format!("{name} `{value}` is not a URL: {e}")))?;
        }
        Ok(())
    }

    /// Model that serves the overview call under the given tier.
    pub fn overview_model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Single => &self.summary_model,
            ModelTier::Tiered => &self.overview_model,
        }
    }
}

/// How many model configurations the pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModelTier {
    /// The summary model also writes the overview.
    Single,
    /// A stronger model writes the overview.
    #[default]
    Tiered,
}

/// Switches that distinguish the pipeline variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Keep each article's url on its summary so the overview can cite it.
    pub retain_url: bool,
    pub model_tier: ModelTier,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            retain_url: true,
            model_tier: ModelTier::Tiered,
        }
    }
}

/// Read the language-model key from the environment.
///
/// Called before any network traffic so a missing key fails fast.
pub fn openai_api_key() -> Result<String> {
    match std::env::var(OPENAI_API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(PipelineError::Config(format!("{OPENAI_API_KEY_VAR} is not set"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.news_endpoint, "https://newsapi.org/v2/everything");
        assert_eq!(settings.temperature, 0.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "overview_model: gpt-4o").unwrap();
        writeln!(file, "api_base: http://localhost:8080/v1").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.overview_model, "gpt-4o");
        assert_eq!(settings.api_base, "http://localhost:8080/v1");
        assert_eq!(settings.summary_model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "temperature: [not, a, number]").unwrap();

        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_bad_endpoint_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "news_endpoint: not a url").unwrap();

        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("news_endpoint"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("missing.yaml"))).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_overview_model_per_tier() {
        let settings = Settings::default();
        assert_eq!(settings.overview_model_for(ModelTier::Tiered), "gpt-4");
        assert_eq!(settings.overview_model_for(ModelTier::Single), "gpt-3.5-turbo");
    }
}
