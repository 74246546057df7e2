// Runtime provider selection without trait objects.
//
// Moderator is a closed enum over the vendor adapters. It implements
// ModerationProvider by matching on the variant, so a caller can pick the
// vendor from configuration and still hold a concrete, Clone-able type.

use async_trait::async_trait;

use super::mistral::MistralModerator;
use super::openai::OpenAiModerator;
use super::traits::{ModerationProvider, ModerationResult};
use crate::config::{Config, Credential, ProviderKind};
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum Moderator {
    OpenAi(OpenAiModerator),
    Mistral(MistralModerator),
}

impl Moderator {
    /// Build the adapter for `kind` with the models and base URLs from `config`.
    pub fn new(kind: ProviderKind, credential: Credential, config: &Config) -> Result<Self> {
        let moderator = match kind {
            ProviderKind::OpenAi => Self::OpenAi(
                OpenAiModerator::new(credential)?
                    .with_model(config.openai_model)
                    .with_base_url(&config.openai_base_url),
            ),
            ProviderKind::Mistral => Self::Mistral(
                MistralModerator::new(credential)?
                    .with_model(config.mistral_model)
                    .with_base_url(&config.mistral_base_url),
            ),
        };
        Ok(moderator)
    }

    /// Load the configured provider's credential and build its adapter.
    ///
    /// Fails with a configuration error before any request is made if the
    /// credential file is missing or incomplete.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credential = config.credential()?;
        Self::new(config.provider, credential, config)
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::OpenAi(_) => ProviderKind::OpenAi,
            Self::Mistral(_) => ProviderKind::Mistral,
        }
    }

    /// Identifier of the model this adapter sends by default.
    pub fn model_id(&self) -> &'static str {
        match self {
            Self::OpenAi(m) => m.model().as_str(),
            Self::Mistral(m) => m.model().as_str(),
        }
    }
}

impl From<OpenAiModerator> for Moderator {
    fn from(m: OpenAiModerator) -> Self {
        Self::OpenAi(m)
    }
}

impl From<MistralModerator> for Moderator {
    fn from(m: MistralModerator) -> Self {
        Self::Mistral(m)
    }
}

#[async_trait]
impl ModerationProvider for Moderator {
    fn name(&self) -> &'static str {
        match self {
            Self::OpenAi(m) => m.name(),
            Self::Mistral(m) => m.name(),
        }
    }

    async fn check_content(&self, text: &str) -> Result<ModerationResult> {
        match self {
            Self::OpenAi(m) => m.check_content(text).await,
            Self::Mistral(m) => m.check_content(text).await,
        }
    }

    async fn batch_check_content(&self, texts: &[String]) -> Result<Vec<ModerationResult>> {
        match self {
            Self::OpenAi(m) => m.batch_check_content(texts).await,
            Self::Mistral(m) => m.batch_check_content(texts).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::models::MistralModerationModel;

    #[test]
    fn builds_the_requested_vendor() {
        let mut config = Config::default();
        config.mistral_model = MistralModerationModel::Text2411;

        let credential = Credential::new("test-key").unwrap();
        let moderator = Moderator::new(ProviderKind::Mistral, credential, &config).unwrap();

        assert_eq!(moderator.kind(), ProviderKind::Mistral);
        assert_eq!(moderator.name(), "mistral");
        assert_eq!(moderator.model_id(), "mistral-moderation-2411");
    }

    #[test]
    fn from_adapter_keeps_default_model() {
        let credential = Credential::new("test-key").unwrap();
        let moderator: Moderator = OpenAiModerator::new(credential).unwrap().into();
        assert_eq!(moderator.kind(), ProviderKind::OpenAi);
        assert_eq!(moderator.model_id(), "text-moderation-latest");
    }
}
