// Mistral moderation adapter.
//
// Wraps POST /v1/moderations on api.mistral.ai. Mistral always takes a list
// of inputs. Its results carry categories and scores but no overall verdict,
// so `flagged` is derived: any category marked true flags the text.
//
// API docs: https://docs.mistral.ai/capabilities/guardrailing/

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http;
use super::models::MistralModerationModel;
use super::traits::{ModerationProvider, ModerationRequest, ModerationResult};
use crate::config::Credential;
use crate::error::{Result, TransportError};
use crate::output::truncate_chars;

pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1";

const PROVIDER: &str = "mistral";

/// Mistral moderation adapter.
#[derive(Debug, Clone)]
pub struct MistralModerator {
    client: Client,
    credential: Credential,
    base_url: String,
    model: MistralModerationModel,
}

impl MistralModerator {
    /// Create an adapter with the default model and base URL.
    pub fn new(credential: Credential) -> Result<Self> {
        Ok(Self {
            client: http::build_client()?,
            credential,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: MistralModerationModel::default(),
        })
    }

    /// Model used by `check_content` and `batch_check_content`.
    pub fn with_model(mut self, model: MistralModerationModel) -> Self {
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

    pub fn model(&self) -> MistralModerationModel {
        self.model
    }

    /// Send the request and return Mistral's response as-is.
    pub async fn detect(
        &self,
        model: MistralModerationModel,
        request: &ModerationRequest,
    ) -> Result<MistralModerationResponse> {
        let body = MistralRequest {
            model,
            input: request,
        };
        let url = http::moderations_url(&self.base_url);
        http::post_json(&self.client, PROVIDER, &url, &self.credential, &body).await
    }

    /// Classify every text in `request` with `model`, in input order.
    pub async fn moderate(
        &self,
        model: MistralModerationModel,
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
impl ModerationProvider for MistralModerator {
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

// --- Mistral request/response types ---

#[derive(Serialize)]
struct MistralRequest<'a> {
    model: MistralModerationModel,
    input: &'a ModerationRequest,
}

/// Raw body of a successful `/moderations` call.
#[derive(Debug, Clone, Deserialize)]
pub struct MistralModerationResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub results: Vec<MistralModerationResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MistralModerationResult {
    /// Not sent by the current API
    #[serde(default)]
    pub flagged: Option<bool>,
    /// Some categories come back as `null`; normalization drops them
    #[serde(default)]
    pub categories: BTreeMap<String, Option<bool>>,
    #[serde(default)]
    pub category_scores: BTreeMap<String, Option<f64>>,
}

impl From<MistralModerationResult> for ModerationResult {
    fn from(result: MistralModerationResult) -> Self {
        let categories = http::present(result.categories);
        let flagged = result
            .flagged
            .unwrap_or_else(|| categories.values().any(|hit| *hit));
        Self {
            flagged,
            categories,
            category_scores: http::present(result.category_scores),
        }
    }
}
