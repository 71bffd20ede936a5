use crate::error::{RecallError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    #[default]
    Text,
    Voice,
    Photo,
    Video,
    Location,
    Document,
    #[serde(other)]
    Other,
}

impl MemoryKind {
    pub const ALL: [MemoryKind; 7] = [
        MemoryKind::Text,
        MemoryKind::Voice,
        MemoryKind::Photo,
        MemoryKind::Video,
        MemoryKind::Location,
        MemoryKind::Document,
        MemoryKind::Other,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            MemoryKind::Text => "📝",
            MemoryKind::Voice => "🎙️",
            MemoryKind::Photo => "📸",
            MemoryKind::Video => "🎥",
            MemoryKind::Location => "📍",
            MemoryKind::Document => "📄",
            MemoryKind::Other => "📎",
        }
    }
}

impl fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryKind::Text => write!(f, "text"),
            MemoryKind::Voice => write!(f, "voice"),
            MemoryKind::Photo => write!(f, "photo"),
            MemoryKind::Video => write!(f, "video"),
            MemoryKind::Location => write!(f, "location"),
            MemoryKind::Document => write!(f, "document"),
            MemoryKind::Other => write!(f, "other"),
        }
    }
}

impl FromStr for MemoryKind {
    type Err = RecallError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "note" => Ok(MemoryKind::Text),
            "voice" | "audio" => Ok(MemoryKind::Voice),
            "photo" | "image" => Ok(MemoryKind::Photo),
            "video" => Ok(MemoryKind::Video),
            "location" | "place" => Ok(MemoryKind::Location),
            "document" | "doc" => Ok(MemoryKind::Document),
            "other" => Ok(MemoryKind::Other),
            _ => Err(RecallError::Parse(format!("Invalid memory type: {}", s))),
        }
    }
}

/// Coarse bucket of the 1-10 importance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportanceLevel {
    Critical,
    High,
    Medium,
    Low,
    Minimal,
}

impl ImportanceLevel {
    pub fn from_score(importance: u8) -> Self {
        match importance {
            9.. => ImportanceLevel::Critical,
            7..=8 => ImportanceLevel::High,
            5..=6 => ImportanceLevel::Medium,
            3..=4 => ImportanceLevel::Low,
            _ => ImportanceLevel::Minimal,
        }
    }
}

impl fmt::Display for ImportanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportanceLevel::Critical => write!(f, "critical"),
            ImportanceLevel::High => write!(f, "high"),
            ImportanceLevel::Medium => write!(f, "medium"),
            ImportanceLevel::Low => write!(f, "low"),
            ImportanceLevel::Minimal => write!(f, "minimal"),
        }
    }
}

impl FromStr for ImportanceLevel {
    type Err = RecallError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(ImportanceLevel::Critical),
            "high" => Ok(ImportanceLevel::High),
            "medium" | "normal" => Ok(ImportanceLevel::Medium),
            "low" => Ok(ImportanceLevel::Low),
            "minimal" => Ok(ImportanceLevel::Minimal),
            _ => Err(RecallError::Parse(format!(
                "Invalid importance level: {}",
                s
            ))),
        }
    }
}

/// Topical class assigned by keyword rules, see [`crate::index::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryClass {
    Work,
    Personal,
    Learning,
    Travel,
    Food,
    Shopping,
    Health,
    Finance,
    Entertainment,
    Ideas,
    Media,
    Notes,
    Places,
    Documents,
    General,
}

impl fmt::Display for MemoryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MemoryClass::Work => "work",
            MemoryClass::Personal => "personal",
            MemoryClass::Learning => "learning",
            MemoryClass::Travel => "travel",
            MemoryClass::Food => "food",
            MemoryClass::Shopping => "shopping",
            MemoryClass::Health => "health",
            MemoryClass::Finance => "finance",
            MemoryClass::Entertainment => "entertainment",
            MemoryClass::Ideas => "ideas",
            MemoryClass::Media => "media",
            MemoryClass::Notes => "notes",
            MemoryClass::Places => "places",
            MemoryClass::Documents => "documents",
            MemoryClass::General => "general",
        };
        write!(f, "{}", name)
    }
}
