use super::types::{ImportanceLevel, MemoryKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_IMPORTANCE: u8 = 5;

const ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

fn default_importance() -> u8 {
    DEFAULT_IMPORTANCE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: MemoryKind,

    pub content: String,

    pub timestamp: DateTime<Utc>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default = "default_importance")]
    pub importance: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<String>,

    #[serde(
        default,
        rename = "createdBy",
        alias = "created_by",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl Memory {
    pub fn new(id: String, kind: MemoryKind, content: String) -> Self {
        Self {
            id,
            kind,
            content,
            timestamp: Utc::now(),
            tags: Vec::new(),
            importance: DEFAULT_IMPORTANCE,
            person: None,
            created_by: None,
            location: None,
            media: None,
            updated: None,
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_importance(mut self, importance: u8) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_person(mut self, person: Option<String>) -> Self {
        self.person = person;
        self
    }

    pub fn with_location(mut self, location: Option<GeoPoint>) -> Self {
        self.location = location;
        self
    }

    pub fn with_media(mut self, media: Option<MediaRef>) -> Self {
        self.media = media;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn touch(&mut self) {
        self.updated = Some(Utc::now());
    }

    /// Who the memory belongs to, for grouping.
    pub fn owner(&self) -> &str {
        self.person
            .as_deref()
            .or(self.created_by.as_deref())
            .unwrap_or("unknown")
    }

    pub fn importance_level(&self) -> ImportanceLevel {
        ImportanceLevel::from_score(self.importance)
    }

    /// `YYYY-MM-DD` of the creation timestamp (UTC).
    pub fn day_key(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// First `max` characters of the content, with an ellipsis when cut.
    pub fn preview(&self, max: usize) -> String {
        let mut chars = self.content.chars();
        let head: String = chars.by_ref().take(max).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }
}

/// Generate a memory ID: base36 epoch milliseconds followed by a random suffix.
pub fn generate_id(suffix_length: usize) -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let suffix = nanoid::format(nanoid::rngs::default, &ID_ALPHABET, suffix_length);
    format!("{}{}", to_base36(millis), suffix)
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ID_ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.iter().rev().collect()
}
