// OpenAI moderation adapter.
//
// Wraps POST /v1/moderations. OpenAI accepts either a string or an array as
// `input`; we always send an array so single and batch calls share one path.
//
// API docs: https://platform.openai.com/docs/api-reference/moderations

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http;
use super::models::OpenAiModerationModel;
use super::traits::{ModerationProvider, ModerationRequest, ModerationResult};
use crate::config::Credential;
use crate::error::{Result, TransportError};
use crate::output::truncate_chars;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const PROVIDER: &str = "openai";

/// OpenAI moderation adapter.
#[derive(Debug, Clone)]
pub struct OpenAiModerator {
    client: Client,
    credential: Credential,
    base_url: String,
    model: OpenAiModerationModel,
}

impl OpenAiModerator {
    /// Create an adapter with the default model and base URL.
    pub fn new(credential: Credential) -> Result<Self> {
        Ok(Self {
            client: http::build_client()?,
            credential,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: OpenAiModerationModel::default(),
        })
    }

    /// Model used by `check_content` and `batch_check_content`.
    pub fn with_model(mut self, model: OpenAiModerationModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Swap in a caller-built client, e.g. one with a request timeout.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn model(&self) -> OpenAiModerationModel {
        self.model
    }

    /// Send the request and return OpenAI's response as-is.
    pub async fn detect(
        &self,
        model: OpenAiModerationModel,
        request: &ModerationRequest,
    ) -> Result<OpenAiModerationResponse> {
        let body = OpenAiRequest {
            model,
            input: request,
        };
        let url = http::moderations_url(&self.base_url);
        http::post_json(&self.client, PROVIDER, &url, &self.credential, &body).await
    }

    /// Classify every text in `request` with `model`, in input order.
    pub async fn moderate(
        &self,
        model: OpenAiModerationModel,
        request: &ModerationRequest,
    ) -> Result<Vec<ModerationResult>> {
        let response = self.detect(model, request).await?;
        http::ensure_result_count(PROVIDER, request.len(), response.results.len())?;

        let results: Vec<ModerationResult> =
            response.results.into_iter().map(Into::into).collect();

        debug!(
            provider = PROVIDER,
            model = %model,
            inputs = request.len(),
            flagged = results.iter().filter(|r| r.flagged).count(),
            text_preview = %truncate_chars(&request.texts()[0], 50),
            "Moderated texts"
        );

        Ok(results)
    }
}

#[async_trait]
impl ModerationProvider for OpenAiModerator {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn check_content(&self, text: &str) -> Result<ModerationResult> {
        let request = ModerationRequest::single(text)?;
        let results = self.moderate(self.model, &request).await?;
        results.into_iter().next().ok_or_else(|| {
            TransportError::MalformedResponse {
                provider: PROVIDER,
                message: "no results".to_string(),
            }
            .into()
        })
    }

    async fn batch_check_content(&self, texts: &[String]) -> Result<Vec<ModerationResult>> {
        let request = ModerationRequest::batch(texts.to_vec())?;
        self.moderate(self.model, &request).await
    }
}

// --- OpenAI request/response types ---

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: OpenAiModerationModel,
    input: &'a ModerationRequest,
}

/// Raw body of a successful `/moderations` call.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiModerationResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub results: Vec<OpenAiModerationResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiModerationResult {
    pub flagged: bool,
    /// Some categories come back as `null`; normalization drops them
    #[serde(default)]
    pub categories: BTreeMap<String, Option<bool>>,
    #[serde(default)]
    pub category_scores: BTreeMap<String, Option<f64>>,
    /// Only returned by the omni models; dropped by normalization
    #[serde(default)]
    pub category_applied_input_types: Option<BTreeMap<String, Vec<String>>>,
}

impl From<OpenAiModerationResult> for ModerationResult {
    fn from(result: OpenAiModerationResult) -> Self {
        Self {
            flagged: result.flagged,
            categories: http::present(result.categories),
            category_scores: http::present(result.category_scores),
        }
    }
}
