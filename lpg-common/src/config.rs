//! Configuration loading and resolution
//!
//! Every setting resolves in the same priority order:
//! 1. Command-line argument (highest priority, handled by each binary's clap parser)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::{Error, Result};

pub const ENV_ROOT: &str = "LPG_ROOT";
pub const ENV_OPENAI_API_KEY: &str = "LPG_OPENAI_API_KEY";
pub const ENV_SERPAPI_API_KEY: &str = "LPG_SERPAPI_API_KEY";
pub const ENV_YOUTUBE_API_KEY: &str = "LPG_YOUTUBE_API_KEY";
pub const ENV_ADMIN_EMAIL: &str = "LPG_ADMIN_EMAIL";
pub const ENV_ADMIN_PASSWORD: &str = "LPG_ADMIN_PASSWORD";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "lpg.db";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 1400;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// `[openai]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAiSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Sections holding only an API key (`[serpapi]`, `[youtube]`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiKeySection {
    pub api_key: Option<String>,
}

/// `[admin]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminSection {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub openai: OpenAiSection,
    #[serde(default)]
    pub serpapi: ApiKeySection,
    #[serde(default)]
    pub youtube: ApiKeySection,
    #[serde(default)]
    pub admin: AdminSection,
}

/// Platform config file location
///
/// Linux checks `~/.config/lpg/config.toml` then `/etc/lpg/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("lpg").join("config.toml"));
    if let Some(path) = &user_config {
        if path.exists() {
            return user_config;
        }
    }
    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/lpg/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }
    None
}

/// Load the TOML config.
///
/// An explicit path must exist and parse. Without one, the platform default
/// is used when present, otherwise an empty config.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) => path,
            None => return Ok(TomlConfig::default()),
        },
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Resolve the root folder holding the database
pub fn resolve_root_folder(cli_arg: Option<&str>, toml_config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var(ENV_ROOT) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml_config.root_folder {
        return PathBuf::from(path);
    }

    default_root_folder()
}

/// OS-dependent default root folder
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("lpg"))
        .unwrap_or_else(|| PathBuf::from("./lpg_data"))
}

pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE)
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Resolve an API key from environment, then TOML.
///
/// Returns `None` when neither source holds a usable key.
pub fn resolve_api_key(name: &str, env_var: &str, toml_value: Option<&String>) -> Option<String> {
    let env_key = std::env::var(env_var).ok().filter(|k| is_valid_key(k));
    let toml_key = toml_value.filter(|k| is_valid_key(k)).cloned();

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "{} API key found in environment and TOML. Using environment (highest priority).",
            name
        );
    }

    if let Some(key) = env_key {
        info!("{} API key loaded from environment variable", name);
        return Some(key.trim().to_string());
    }
    if let Some(key) = toml_key {
        info!("{} API key loaded from TOML config", name);
        return Some(key.trim().to_string());
    }
    None
}

/// Chat completion settings
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl OpenAiSettings {
    /// Resolve completion settings; the API key is mandatory
    pub fn resolve(toml_config: &TomlConfig) -> Result<Self> {
        let section = &toml_config.openai;
        let api_key = resolve_api_key("OpenAI", ENV_OPENAI_API_KEY, section.api_key.as_ref())
            .ok_or_else(|| {
                Error::Config(format!(
                    "OpenAI API key not configured. Please configure using one of:\n\
                     1. Environment: {}=your-key-here\n\
                     2. TOML config: ~/.config/lpg/config.toml ([openai] api_key = \"your-key\")",
                    ENV_OPENAI_API_KEY
                ))
            })?;

        Ok(Self {
            api_key,
            base_url: section
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: section
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            max_tokens: section.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: section.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        })
    }
}

/// Optional search-side keys; a missing key disables that enrichment step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchKeys {
    pub serpapi: Option<String>,
    pub youtube: Option<String>,
}

impl SearchKeys {
    pub fn resolve(toml_config: &TomlConfig) -> Self {
        Self {
            serpapi: resolve_api_key(
                "SerpAPI",
                ENV_SERPAPI_API_KEY,
                toml_config.serpapi.api_key.as_ref(),
            ),
            youtube: resolve_api_key(
                "YouTube",
                ENV_YOUTUBE_API_KEY,
                toml_config.youtube.api_key.as_ref(),
            ),
        }
    }
}

/// Admin dashboard login
#[derive(Debug, Clone, PartialEq)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn resolve(toml_config: &TomlConfig) -> Result<Self> {
        let email = std::env::var(ENV_ADMIN_EMAIL)
            .ok()
            .filter(|e| !e.trim().is_empty())
            .or_else(|| toml_config.admin.email.clone())
            .filter(|e| !e.trim().is_empty());
        let password = std::env::var(ENV_ADMIN_PASSWORD)
            .ok()
            .filter(|p| !p.is_empty())
            .or_else(|| toml_config.admin.password.clone())
            .filter(|p| !p.is_empty());

        match (email, password) {
            (Some(email), Some(password)) => Ok(Self {
                email: email.trim().to_lowercase(),
                password,
            }),
            _ => Err(Error::Config(format!(
                "Admin credentials not configured. Set {} and {} or the [admin] section of config.toml",
                ENV_ADMIN_EMAIL, ENV_ADMIN_PASSWORD
            ))),
        }
    }

    /// Check a login attempt; email comparison ignores case and surrounding space
    pub fn matches(&self, email: &str, password: &str) -> bool {
        email.trim().eq_ignore_ascii_case(&self.email)
            && bool::from(password.as_bytes().ct_eq(self.password.as_bytes()))
    }
}
