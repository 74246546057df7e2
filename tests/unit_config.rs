// Unit tests for credential loading and provider construction.
//
// Credential files are written to temp directories; nothing here touches
// the network or the real credentials directory.

use std::fs;
use std::path::Path;

use modgate::config::{load_credential, Config, Credential, ProviderKind};
use modgate::moderation::{MistralModerationModel, ModerationProvider, Moderator, OpenAiModerationModel};

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn config_in(dir: &Path, provider: ProviderKind) -> Config {
    Config {
        provider,
        credentials_dir: dir.to_path_buf(),
        ..Config::default()
    }
}

// ============================================================
// Credential files
// ============================================================

#[test]
fn loads_openai_key() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "openai.json", r#"{"openai_api_key": "sk-abc"}"#);

    let cred = load_credential(dir.path(), ProviderKind::OpenAi).unwrap();
    assert_eq!(cred.expose(), "sk-abc");
}

#[test]
fn loads_mistral_key_and_ignores_extra_fields() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "mistralai.json",
        r#"{"mistralai_api_key": "ms-abc", "org": "acme"}"#,
    );

    let cred = load_credential(dir.path(), ProviderKind::Mistral).unwrap();
    assert_eq!(cred.expose(), "ms-abc");
}

#[test]
fn missing_file_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_credential(dir.path(), ProviderKind::OpenAi).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("openai.json"));
}

#[test]
fn missing_key_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    // Right file, wrong vendor's key
    write(dir.path(), "mistralai.json", r#"{"openai_api_key": "sk-abc"}"#);

    let err = load_credential(dir.path(), ProviderKind::Mistral).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("mistralai_api_key"));
}

#[test]
fn malformed_json_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "openai.json", "openai_api_key = sk-abc");

    let err = load_credential(dir.path(), ProviderKind::OpenAi).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn non_string_or_empty_key_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "openai.json", r#"{"openai_api_key": 42}"#);
    assert!(load_credential(dir.path(), ProviderKind::OpenAi)
        .unwrap_err()
        .is_configuration());

    write(dir.path(), "openai.json", r#"{"openai_api_key": ""}"#);
    assert!(load_credential(dir.path(), ProviderKind::OpenAi)
        .unwrap_err()
        .is_configuration());
}

#[test]
fn from_file_reads_an_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("elsewhere.json");
    fs::write(&path, r#"{"openai_api_key": "sk-explicit"}"#).unwrap();

    let cred = Credential::from_file(&path, ProviderKind::OpenAi).unwrap();
    assert_eq!(cred.expose(), "sk-explicit");
}

// ============================================================
// Moderator::from_config
// ============================================================

#[test]
fn from_config_fails_before_any_request_without_key() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "openai.json", r#"{"something_else": "x"}"#);

    let config = config_in(dir.path(), ProviderKind::OpenAi);
    let err = Moderator::from_config(&config).err().unwrap();
    assert!(err.is_configuration());
}

#[test]
fn from_config_builds_configured_provider_and_model() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "mistralai.json", r#"{"mistralai_api_key": "ms-abc"}"#);

    let mut config = config_in(dir.path(), ProviderKind::Mistral);
    config.mistral_model = MistralModerationModel::Text2411;

    let moderator = Moderator::from_config(&config).unwrap();
    assert_eq!(moderator.kind(), ProviderKind::Mistral);
    assert_eq!(moderator.name(), "mistral");
    assert_eq!(moderator.model_id(), "mistral-moderation-2411");
}

#[test]
fn default_config_targets_openai_latest() {
    let config = Config::default();
    assert_eq!(config.provider, ProviderKind::OpenAi);
    assert_eq!(config.openai_model, OpenAiModerationModel::TextLatest);
    assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
    assert_eq!(config.mistral_base_url, "https://api.mistral.ai/v1");
    assert!(config.credentials_dir.ends_with("modgate"));
}

// ============================================================
// Model identifiers
// ============================================================

#[test]
fn every_model_round_trips_through_its_identifier() {
    for model in OpenAiModerationModel::ALL {
        assert_eq!(model.to_string().parse::<OpenAiModerationModel>().unwrap(), model);
    }
    for model in MistralModerationModel::ALL {
        assert_eq!(model.to_string().parse::<MistralModerationModel>().unwrap(), model);
    }
}

#[test]
fn model_deserializes_from_wire_string() {
    let model: OpenAiModerationModel = serde_json::from_str(r#""text-moderation-007""#).unwrap();
    assert_eq!(model, OpenAiModerationModel::Text007);

    assert!(serde_json::from_str::<MistralModerationModel>(r#""mistral-moderation-9999""#).is_err());
}
