use super::kv_store::{KEY_SETTINGS, KvStore};
use crate::error::{RecallError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Tone of the assistant's replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    #[default]
    Casual,
    Professional,
    Detailed,
    Concise,
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Personality::Casual => write!(f, "casual"),
            Personality::Professional => write!(f, "professional"),
            Personality::Detailed => write!(f, "detailed"),
            Personality::Concise => write!(f, "concise"),
        }
    }
}

impl FromStr for Personality {
    type Err = RecallError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "casual" => Ok(Personality::Casual),
            "professional" => Ok(Personality::Professional),
            "detailed" => Ok(Personality::Detailed),
            "concise" => Ok(Personality::Concise),
            _ => Err(RecallError::Parse(format!("Invalid personality: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackupInterval {
    Off,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl BackupInterval {
    pub fn period(&self) -> Option<chrono::Duration> {
        match self {
            BackupInterval::Off => None,
            BackupInterval::Daily => Some(chrono::Duration::days(1)),
            BackupInterval::Weekly => Some(chrono::Duration::weeks(1)),
            BackupInterval::Monthly => Some(chrono::Duration::days(30)),
        }
    }
}

impl fmt::Display for BackupInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupInterval::Off => write!(f, "off"),
            BackupInterval::Daily => write!(f, "daily"),
            BackupInterval::Weekly => write!(f, "weekly"),
            BackupInterval::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for BackupInterval {
    type Err = RecallError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "off" | "never" => Ok(BackupInterval::Off),
            "daily" => Ok(BackupInterval::Daily),
            "weekly" => Ok(BackupInterval::Weekly),
            "monthly" => Ok(BackupInterval::Monthly),
            _ => Err(RecallError::Parse(format!("Invalid backup interval: {}", s))),
        }
    }
}

/// User preferences kept in the store under `settings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default, alias = "aiPersonality")]
    pub personality: Personality,

    #[serde(default)]
    pub auto_backup: BackupInterval,

    #[serde(default = "default_max_memories")]
    pub max_memories: usize,

    #[serde(default)]
    pub location_tracking: bool,
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_max_memories() -> usize {
    10_000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: default_language(),
            personality: Personality::default(),
            auto_backup: BackupInterval::default(),
            max_memories: default_max_memories(),
            location_tracking: false,
        }
    }
}

impl Settings {
    /// Stored settings merged over defaults; a missing entry gives defaults.
    pub fn load(store: &KvStore) -> Result<Self> {
        Ok(store.get(KEY_SETTINGS)?.unwrap_or_default())
    }

    pub fn save(&self, store: &KvStore) -> Result<()> {
        store.set(KEY_SETTINGS, self)
    }

    /// Set a single preference from its CLI name.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "language" => self.language = value.to_string(),
            "personality" => self.personality = value.parse()?,
            "auto-backup" | "auto_backup" | "autoBackup" => self.auto_backup = value.parse()?,
            "max-memories" | "max_memories" | "maxMemories" => {
                self.max_memories = value.parse().map_err(|_| {
                    RecallError::Parse(format!("max-memories must be a number, got '{}'", value))
                })?
            }
            "location-tracking" | "location_tracking" | "locationTracking" => {
                self.location_tracking = value.parse().map_err(|_| {
                    RecallError::Parse(format!(
                        "location-tracking must be true or false, got '{}'",
                        value
                    ))
                })?
            }
            _ => {
                return Err(RecallError::Config(format!("Unknown setting: {}", key)));
            }
        }
        Ok(())
    }
}
