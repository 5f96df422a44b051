//! Test doubles shared by the unit tests.

use crate::api::{AskAsync, Prompt};
use crate::error::{PipelineError, Result};
use crate::models::NewsArticle;
use serde_json::Value;
use std::cell::RefCell;

/// One captured model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub model: String,
    pub system: String,
    pub user: String,
}

/// In-memory model that records every prompt and answers `reply {n}`,
/// where `n` is the zero-based call number.
#[derive(Debug, Default)]
pub struct RecordingModel {
    calls: RefCell<Vec<RecordedCall>>,
    fail_on: Option<usize>,
}

impl RecordingModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the call with zero-based number `n` (it is still recorded).
    pub fn failing_on(n: usize) -> Self {
        Self {
            calls: RefCell::default(),
            fail_on: Some(n),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }
}

impl AskAsync for RecordingModel {
    type Response = String;

    async fn ask(&self, prompt: &Prompt<'_>) -> Result<Self::Response> {
        let n = self.calls.borrow().len();
        self.calls.borrow_mut().push(RecordedCall {
            model: prompt.model.to_string(),
            system: prompt.system.to_string(),
            user: prompt.user.to_string(),
        });

        if self.fail_on == Some(n) {
            return Err(PipelineError::Model("insufficient_quota".into()));
        }
        Ok(format!("reply {n}"))
    }
}

/// An article with description `d` and content `c`.
pub fn article(title: &str, url: &str) -> NewsArticle {
    NewsArticle {
        title: Value::from(title),
        description: Value::from("d"),
        content: Value::from("c"),
        url: Value::from(url),
    }
}
