use std::env::{self, VarError};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use reqwest::header::HeaderValue;
use serde_json::Value;
use tracing::debug;

use crate::error::{ModerationError, Result};
use crate::moderation::models::{MistralModerationModel, OpenAiModerationModel};
use crate::moderation::{mistral, openai};

/// Which moderation vendor to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderKind {
    /// OpenAI moderation endpoint (default)
    #[default]
    OpenAi,
    /// Mistral moderation endpoint
    Mistral,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Mistral => "mistral",
        }
    }

    /// Credential file name inside the credentials directory.
    pub fn credential_file(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai.json",
            Self::Mistral => "mistralai.json",
        }
    }

    /// Key the credential file must contain.
    pub fn credential_key(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai_api_key",
            Self::Mistral => "mistralai_api_key",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ModerationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "mistral" | "mistralai" => Ok(Self::Mistral),
            other => Err(ModerationError::Configuration(format!(
                "unknown moderation provider `{other}` (expected `openai` or `mistral`)"
            ))),
        }
    }
}

/// An API key, trimmed and checked to be usable as a bearer token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into().trim().to_string();
        if secret.is_empty() {
            return Err(ModerationError::Configuration(
                "API key is empty".to_string(),
            ));
        }
        // The secret itself stays out of the message
        if HeaderValue::from_str(&format!("Bearer {secret}")).is_err() {
            return Err(ModerationError::Configuration(
                "API key contains characters not allowed in an HTTP header".to_string(),
            ));
        }
        Ok(Self(secret))
    }

    /// Read `{vendor}_api_key` from a JSON credential file.
    ///
    /// A missing file, malformed JSON, or a missing/empty/non-string key all
    /// fail with a configuration error.
    pub fn from_file(path: &Path, provider: ProviderKind) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ModerationError::Configuration(format!(
                "failed to read credential file {}: {e}",
                path.display()
            ))
        })?;

        let record: Value = serde_json::from_str(&raw).map_err(|e| {
            ModerationError::Configuration(format!(
                "credential file {} is not valid JSON: {e}",
                path.display()
            ))
        })?;

        let key = provider.credential_key();
        let secret = record.get(key).and_then(Value::as_str).ok_or_else(|| {
            ModerationError::Configuration(format!(
                "credential file {} has no string `{key}`",
                path.display()
            ))
        })?;

        debug!(provider = %provider, path = %path.display(), "Loaded credential");
        Self::new(secret)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Load the credential for `provider` from its file under `dir`.
pub fn load_credential(dir: &Path, provider: ProviderKind) -> Result<Credential> {
    Credential::from_file(&dir.join(provider.credential_file()), provider)
}

/// Read an environment variable, treating only "not set" as absent.
/// A value that is set but not valid Unicode is a configuration error.
fn env_setting(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ModerationError::Configuration(format!(
            "{name} is set but is not valid Unicode"
        ))),
    }
}

/// Returns the default directory holding credential files.
/// Uses the platform config directory: ~/.config/modgate/ on Linux.
pub fn default_credentials_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("modgate")
}

/// Central configuration loaded from environment variables.
///
/// Secrets are not part of this struct; they live in per-vendor credential
/// files under `credentials_dir` and are read when an adapter is built.
#[derive(Debug, Clone)]
pub struct Config {
    /// Which vendor to dispatch to (MODGATE_PROVIDER, default openai)
    pub provider: ProviderKind,
    /// Directory holding openai.json / mistralai.json
    pub credentials_dir: PathBuf,
    pub openai_model: OpenAiModerationModel,
    pub mistral_model: MistralModerationModel,
    pub openai_base_url: String,
    pub mistral_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            credentials_dir: default_credentials_dir(),
            openai_model: OpenAiModerationModel::default(),
            mistral_model: MistralModerationModel::default(),
            openai_base_url: openai::DEFAULT_BASE_URL.to_string(),
            mistral_base_url: mistral::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every setting has a default; only values that are set but invalid
    /// (an unknown provider or model) fail.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let provider = match env_setting("MODGATE_PROVIDER")? {
            Some(value) => value.parse::<ProviderKind>()?,
            None => defaults.provider,
        };

        let openai_model = match env_setting("MODGATE_OPENAI_MODEL")? {
            Some(value) => value.parse::<OpenAiModerationModel>().map_err(|e| {
                ModerationError::Configuration(format!("MODGATE_OPENAI_MODEL: {e}"))
            })?,
            None => defaults.openai_model,
        };

        let mistral_model = match env_setting("MODGATE_MISTRAL_MODEL")? {
            Some(value) => value.parse::<MistralModerationModel>().map_err(|e| {
                ModerationError::Configuration(format!("MODGATE_MISTRAL_MODEL: {e}"))
            })?,
            None => defaults.mistral_model,
        };

        Ok(Self {
            provider,
            credentials_dir: env_setting("MODGATE_CREDENTIALS_DIR")?
                .map(PathBuf::from)
                .unwrap_or(defaults.credentials_dir),
            openai_model,
            mistral_model,
            openai_base_url: env_setting("OPENAI_BASE_URL")?
                .unwrap_or(defaults.openai_base_url),
            mistral_base_url: env_setting("MISTRAL_BASE_URL")?
                .unwrap_or(defaults.mistral_base_url),
        })
    }

    /// Load the credential for the configured provider.
    /// Call this before building an adapter so a bad file fails early.
    pub fn credential(&self) -> Result<Credential> {
        load_credential(&self.credentials_dir, self.provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names_parse_case_insensitively() {
        assert_eq!("OpenAI".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!("mistralai".parse::<ProviderKind>().unwrap(), ProviderKind::Mistral);
        assert!("perspective".parse::<ProviderKind>().unwrap_err().is_configuration());
    }

    #[test]
    fn credential_debug_is_redacted() {
        let cred = Credential::new("sk-very-secret").unwrap();
        let shown = format!("{cred:?}");
        assert!(!shown.contains("sk-very-secret"));
        assert_eq!(shown, "Credential(<redacted>)");
    }

    #[test]
    fn blank_credential_is_rejected() {
        assert!(Credential::new("   ").unwrap_err().is_configuration());
    }

    #[test]
    fn credential_is_trimmed() {
        let cred = Credential::new("  sk-abc\n").unwrap();
        assert_eq!(cred.expose(), "sk-abc");
    }

    #[test]
    fn credential_with_control_characters_is_rejected() {
        let err = Credential::new("sk-a\u{7}bc").unwrap_err();
        assert!(err.is_configuration());
        assert!(!err.to_string().contains("sk-a"));

        assert!(Credential::new("sk-a\r\nX-Injected: 1").unwrap_err().is_configuration());
    }

    #[test]
    fn unset_variable_is_absent() {
        let name = "MODGATE_TEST_UNSET_SETTING";
        env::remove_var(name);
        assert_eq!(env_setting(name).unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn non_unicode_variable_is_configuration_error() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let name = "MODGATE_TEST_NON_UNICODE_SETTING";
        env::set_var(name, OsString::from_vec(vec![0x6f, 0x70, 0xff, 0x65]));
        let err = env_setting(name).unwrap_err();
        env::remove_var(name);

        assert!(err.is_configuration());
        assert!(err.to_string().contains(name));
    }

    #[test]
    fn credential_file_names_follow_vendor() {
        assert_eq!(ProviderKind::OpenAi.credential_file(), "openai.json");
        assert_eq!(ProviderKind::Mistral.credential_key(), "mistralai_api_key");
    }
}
