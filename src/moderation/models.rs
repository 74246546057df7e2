// Closed sets of moderation model identifiers, one enum per vendor.
//
// New model versions mean a new variant here; there is no runtime discovery.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a string does not name a known model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {provider} moderation model `{value}`")]
pub struct UnknownModel {
    pub provider: &'static str,
    pub value: String,
}

/// OpenAI moderation models.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpenAiModerationModel {
    #[serde(rename = "omni-moderation-latest")]
    OmniLatest,
    #[serde(rename = "omni-moderation-2024-09-26")]
    Omni20240926,
    #[default]
    #[serde(rename = "text-moderation-latest")]
    TextLatest,
    #[serde(rename = "text-moderation-stable")]
    TextStable,
    #[serde(rename = "text-moderation-007")]
    Text007,
}

impl OpenAiModerationModel {
    pub const ALL: [Self; 5] = [
        Self::OmniLatest,
        Self::Omni20240926,
        Self::TextLatest,
        Self::TextStable,
        Self::Text007,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OmniLatest => "omni-moderation-latest",
            Self::Omni20240926 => "omni-moderation-2024-09-26",
            Self::TextLatest => "text-moderation-latest",
            Self::TextStable => "text-moderation-stable",
            Self::Text007 => "text-moderation-007",
        }
    }
}

/// Mistral moderation models.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MistralModerationModel {
    #[serde(rename = "mistral-moderation-2411")]
    Text2411,
    #[default]
    #[serde(rename = "mistral-moderation-latest")]
    TextLatest,
}

impl MistralModerationModel {
    pub const ALL: [Self; 2] = [Self::Text2411, Self::TextLatest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text2411 => "mistral-moderation-2411",
            Self::TextLatest => "mistral-moderation-latest",
        }
    }
}

impl fmt::Display for OpenAiModerationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MistralModerationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpenAiModerationModel {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| UnknownModel {
                provider: "openai",
                value: s.to_string(),
            })
    }
}

impl FromStr for MistralModerationModel {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| UnknownModel {
                provider: "mistral",
                value: s.to_string(),
            })
    }
}
