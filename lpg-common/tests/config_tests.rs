//! Configuration resolution tests
//!
//! Environment variables are process-global, so these tests run serially.

use lpg_common::config::{
    self, AdminCredentials, OpenAiSettings, SearchKeys, TomlConfig, ENV_ADMIN_EMAIL,
    ENV_ADMIN_PASSWORD, ENV_OPENAI_API_KEY, ENV_ROOT, ENV_SERPAPI_API_KEY, ENV_YOUTUBE_API_KEY,
};
use serial_test::serial;
use std::path::PathBuf;

fn clear_env() {
    for var in [
        ENV_ROOT,
        ENV_OPENAI_API_KEY,
        ENV_SERPAPI_API_KEY,
        ENV_YOUTUBE_API_KEY,
        ENV_ADMIN_EMAIL,
        ENV_ADMIN_PASSWORD,
    ] {
        std::env::remove_var(var);
    }
}

const SAMPLE_TOML: &str = r#"
root_folder = "/srv/lpg"

[logging]
level = "debug"

[openai]
api_key = "sk-toml"
model = "gpt-4o-mini"

[serpapi]
api_key = "serp-toml"

[admin]
email = "Team@Example.io"
password = "hunter22"
"#;

fn write_sample(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, SAMPLE_TOML).unwrap();
    path
}

#[test]
#[serial]
fn test_load_explicit_toml() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let cfg = config::load_toml_config(Some(&write_sample(&dir))).unwrap();
    assert_eq!(cfg.root_folder.as_deref(), Some("/srv/lpg"));
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.openai.model.as_deref(), Some("gpt-4o-mini"));
    assert_eq!(cfg.youtube.api_key, None);
}

#[test]
#[serial]
fn test_missing_explicit_toml_is_error() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    assert!(config::load_toml_config(Some(&dir.path().join("nope.toml"))).is_err());
}

#[test]
#[serial]
fn test_invalid_toml_is_error() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "root_folder = [unterminated").unwrap();
    assert!(config::load_toml_config(Some(&path)).is_err());
}

#[test]
#[serial]
fn test_root_folder_priority() {
    clear_env();
    let cfg = TomlConfig {
        root_folder: Some("/from/toml".to_string()),
        ..TomlConfig::default()
    };

    assert_eq!(
        config::resolve_root_folder(Some("/from/cli"), &cfg),
        PathBuf::from("/from/cli")
    );

    std::env::set_var(ENV_ROOT, "/from/env");
    assert_eq!(config::resolve_root_folder(None, &cfg), PathBuf::from("/from/env"));

    std::env::remove_var(ENV_ROOT);
    assert_eq!(config::resolve_root_folder(None, &cfg), PathBuf::from("/from/toml"));

    let default = config::resolve_root_folder(None, &TomlConfig::default());
    assert!(default.ends_with("lpg") || default.ends_with("lpg_data"));
    assert_eq!(config::database_path(&default), default.join("lpg.db"));
}

#[test]
#[serial]
fn test_openai_settings() {
    clear_env();
    assert!(OpenAiSettings::resolve(&TomlConfig::default()).is_err());

    let dir = tempfile::tempdir().unwrap();
    let cfg = config::load_toml_config(Some(&write_sample(&dir))).unwrap();
    let settings = OpenAiSettings::resolve(&cfg).unwrap();
    assert_eq!(settings.api_key, "sk-toml");
    assert_eq!(settings.model, "gpt-4o-mini");
    assert_eq!(settings.base_url, config::DEFAULT_OPENAI_BASE_URL);
    assert_eq!(settings.max_tokens, 1400);

    std::env::set_var(ENV_OPENAI_API_KEY, "sk-env");
    assert_eq!(OpenAiSettings::resolve(&cfg).unwrap().api_key, "sk-env");
    clear_env();
}

#[test]
#[serial]
fn test_search_keys_optional() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let cfg = config::load_toml_config(Some(&write_sample(&dir))).unwrap();

    let keys = SearchKeys::resolve(&cfg);
    assert_eq!(keys.serpapi.as_deref(), Some("serp-toml"));
    assert_eq!(keys.youtube, None);

    std::env::set_var(ENV_YOUTUBE_API_KEY, "   ");
    assert_eq!(SearchKeys::resolve(&cfg).youtube, None, "blank keys are ignored");
    clear_env();
}

#[test]
#[serial]
fn test_admin_credentials() {
    clear_env();
    assert!(AdminCredentials::resolve(&TomlConfig::default()).is_err());

    let dir = tempfile::tempdir().unwrap();
    let cfg = config::load_toml_config(Some(&write_sample(&dir))).unwrap();
    let creds = AdminCredentials::resolve(&cfg).unwrap();
    assert_eq!(creds.email, "team@example.io");
    assert!(creds.matches(" TEAM@example.io ", "hunter22"));
    assert!(!creds.matches("team@example.io", "hunter2"));

    std::env::set_var(ENV_ADMIN_PASSWORD, "from-env");
    assert!(AdminCredentials::resolve(&cfg).unwrap().matches("team@example.io", "from-env"));
    clear_env();
}

#[test]
#[serial]
fn test_blank_admin_env_falls_back_to_toml() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let cfg = config::load_toml_config(Some(&write_sample(&dir))).unwrap();

    std::env::set_var(ENV_ADMIN_EMAIL, "  ");
    std::env::set_var(ENV_ADMIN_PASSWORD, "");
    let creds = AdminCredentials::resolve(&cfg).unwrap();
    assert_eq!(creds.email, "team@example.io");
    assert!(creds.matches("team@example.io", "hunter22"));
    clear_env();
}
