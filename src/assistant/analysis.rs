use crate::model::{DEFAULT_IMPORTANCE, Memory};
use serde::{Deserialize, Serialize};
use std::fmt;

const SUMMARY_CHARS: usize = 50;

const IMPORTANT_KEYWORDS: &[&str] = &[
    "important", "urgent", "meeting", "appointment", "hospital", "exam", "deadline", "중요",
    "긴급", "회의", "약속", "병원", "시험",
];
const POSITIVE_KEYWORDS: &[&str] = &[
    "good", "happy", "success", "congrat", "joy", "love", "great", "좋", "행복", "성공", "축하",
    "기쁨", "사랑",
];
const NEGATIVE_KEYWORDS: &[&str] = &[
    "bad", "sad", "fail", "problem", "worry", "stress", "나쁘", "슬프", "실패", "문제", "걱정",
    "스트레스",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Positive,
    Negative,
    #[default]
    #[serde(other)]
    Neutral,
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Emotion::Positive => write!(f, "positive"),
            Emotion::Neutral => write!(f, "neutral"),
            Emotion::Negative => write!(f, "negative"),
        }
    }
}

/// Where an analysis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    /// Structured JSON from the model
    Model,
    /// Free text from the model, wrapped
    ModelText,
    /// Local keyword heuristics
    #[default]
    Offline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryAnalysis {
    #[serde(default = "default_importance")]
    pub importance: u8,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub emotion: Emotion,

    #[serde(default)]
    pub summary: String,

    /// Traits the model expects related memories to share
    #[serde(
        default,
        deserialize_with = "string_items",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub related: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,

    #[serde(skip_deserializing)]
    pub source: AnalysisSource,
}

fn default_importance() -> u8 {
    DEFAULT_IMPORTANCE
}

/// Accept a list of strings, a single string, or anything else as empty.
fn string_items<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => vec![s],
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn summarize(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(SUMMARY_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

pub fn analysis_prompt(memory: &Memory) -> String {
    let mut prompt = format!(
        "Analyze this memory:\n\nType: {}\nContent: {}\nTime: {}\n",
        memory.kind,
        memory.content,
        memory.timestamp.format("%Y-%m-%d %H:%M UTC")
    );
    if !memory.tags.is_empty() {
        prompt.push_str(&format!("Tags: {}\n", memory.tags.join(", ")));
    }
    prompt.push_str(
        "\nReply with a single JSON object with the fields \
         \"importance\" (1-10), \"keywords\" (3-5 strings), \
         \"emotion\" (\"positive\", \"neutral\" or \"negative\"), \
         \"related\" (short traits of related memories, as strings) \
         and \"summary\" (one line).",
    );
    prompt
}

/// Read the model's reply, wrapping it as text when it holds no usable JSON.
pub fn parse_analysis(reply: &str, memory: &Memory) -> MemoryAnalysis {
    let json = match (reply.find('{'), reply.rfind('}')) {
        (Some(start), Some(end)) if start < end => Some(&reply[start..=end]),
        _ => None,
    };

    if let Some(parsed) = json.and_then(|j| serde_json::from_str::<MemoryAnalysis>(j).ok()) {
        return MemoryAnalysis {
            importance: parsed.importance.clamp(1, 10),
            summary: if parsed.summary.is_empty() {
                summarize(&memory.content)
            } else {
                parsed.summary
            },
            source: AnalysisSource::Model,
            ..parsed
        };
    }

    MemoryAnalysis {
        importance: DEFAULT_IMPORTANCE,
        keywords: Vec::new(),
        emotion: Emotion::Neutral,
        summary: summarize(&memory.content),
        related: Vec::new(),
        analysis: Some(reply.trim().to_string()),
        source: AnalysisSource::ModelText,
    }
}

/// Keyword heuristics used when the model is unavailable.
pub fn basic_analysis(memory: &Memory) -> MemoryAnalysis {
    let content = memory.content.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| content.contains(k));

    let importance = if mentions(IMPORTANT_KEYWORDS) {
        8
    } else {
        DEFAULT_IMPORTANCE
    };
    let emotion = if mentions(POSITIVE_KEYWORDS) {
        Emotion::Positive
    } else if mentions(NEGATIVE_KEYWORDS) {
        Emotion::Negative
    } else {
        Emotion::Neutral
    };

    MemoryAnalysis {
        importance,
        keywords: memory.tags.clone(),
        emotion,
        summary: summarize(&memory.content),
        related: Vec::new(),
        analysis: Some("Offline: basic keyword analysis only.".to_string()),
        source: AnalysisSource::Offline,
    }
}
