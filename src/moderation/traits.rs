// Moderation provider trait: the swap-ready abstraction.
//
// Every vendor adapter implements ModerationProvider and maps its own response
// shape into ModerationResult, so callers never need to know which vendor
// produced a verdict.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ModerationError, Result};

/// Normalized verdict for a single input text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerationResult {
    /// True when the vendor considers the text in violation of any category
    pub flagged: bool,
    /// Per-category boolean verdicts, keyed by the vendor's category name
    pub categories: BTreeMap<String, bool>,
    /// Per-category confidence from 0.0 to 1.0
    pub category_scores: BTreeMap<String, f64>,
}

impl ModerationResult {
    /// Names of the categories marked true, in sorted order.
    pub fn flagged_categories(&self) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|(_, hit)| **hit)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// One or more texts to classify. Never empty, and no text is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ModerationRequest {
    texts: Vec<String>,
}

impl ModerationRequest {
    /// A one-element batch.
    pub fn single(text: impl Into<String>) -> Result<Self> {
        Self::batch(vec![text.into()])
    }

    pub fn batch(texts: Vec<String>) -> Result<Self> {
        if texts.is_empty() {
            return Err(ModerationError::Validation(
                "at least one text is required".to_string(),
            ));
        }
        if let Some(index) = texts.iter().position(|t| t.is_empty()) {
            return Err(ModerationError::Validation(format!(
                "text at index {index} is empty"
            )));
        }
        Ok(Self { texts })
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Always false for a request that passed validation.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Trait for content moderation providers. Implementations are async because
/// every provider is a remote HTTP API.
///
/// Failures from the remote call come back unchanged as
/// [`ModerationError::Transport`]; nothing is retried.
#[async_trait]
pub trait ModerationProvider: Send + Sync {
    /// Short provider name, used in logs and terminal output.
    fn name(&self) -> &'static str;

    /// Check a single text. Equivalent to a batch of one, unwrapped.
    async fn check_content(&self, text: &str) -> Result<ModerationResult>;

    /// Check several texts in one request, returning results in input order.
    async fn batch_check_content(&self, texts: &[String]) -> Result<Vec<ModerationResult>>;
}
