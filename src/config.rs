use crate::error::{RecallError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "recall.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecallConfig {
    #[serde(default)]
    pub journal: JournalSettings,

    #[serde(default)]
    pub assistant: AssistantSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalSettings {
    /// Directory of the key-value store, relative to the data directory.
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    #[serde(default = "default_id_suffix_length")]
    pub id_suffix_length: usize,

    #[serde(default = "default_importance")]
    pub default_importance: u8,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_store_dir() -> String {
    "store".to_string()
}

fn default_id_suffix_length() -> usize {
    9
}

fn default_importance() -> u8 {
    crate::model::DEFAULT_IMPORTANCE
}

fn default_page_size() -> usize {
    20
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            id_suffix_length: default_id_suffix_length(),
            default_importance: default_importance(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Exchanges kept in the persisted chat history.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Exchanges replayed as context when history is requested.
    #[serde(default = "default_context_turns")]
    pub context_turns: usize,
}

fn default_endpoint() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_max_tokens() -> u32 {
    4000
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_history_limit() -> usize {
    50
}

fn default_context_turns() -> usize {
    10
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
            history_limit: default_history_limit(),
            context_turns: default_context_turns(),
        }
    }
}

impl RecallConfig {
    /// Load `recall.toml` from the data directory, falling back to defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&config_path)?;
        let config: RecallConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RecallError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::create_dir_all(data_dir)?;
        std::fs::write(data_dir.join(CONFIG_FILE), content)?;
        Ok(())
    }

    pub fn store_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.journal.store_dir)
    }
}

/// Resolve the data directory: explicit path, else the platform data dir.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    directories::ProjectDirs::from("", "", "recall")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            RecallError::Config("Could not determine a home directory for recall data".to_string())
        })
}

pub fn is_initialized(data_dir: &Path) -> bool {
    data_dir.join(CONFIG_FILE).exists()
}
