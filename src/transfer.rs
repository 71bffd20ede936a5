//! Export, import and backup of the journal.
//!
//! Three on-disk shapes are understood on import:
//!
//! - a bare array of memories (`recall export`)
//! - an export bundle `{version, exportDate, memories, settings}` (`recall export --bundle`)
//! - a backup `{version, timestamp, memories, settings, chatHistory}` (`recall backup`)
//!
//! Each may be JSON or YAML.

use crate::assistant::Exchange;
use crate::error::{RecallError, Result};
use crate::model::Memory;
use crate::storage::{
    BackupInterval, Journal, KEY_CHAT_HISTORY, KEY_LAST_BACKUP, KEY_LAST_IMPORT, KEY_SETTINGS,
    KvStore, Settings,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::{fmt, str::FromStr};
use tempfile::NamedTempFile;

pub const BUNDLE_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = RecallError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            _ => Err(RecallError::Parse(format!("Unknown export format: {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(rename = "exportDate", alias = "timestamp", alias = "exported_at")]
    pub exported_at: DateTime<Utc>,

    pub memories: Vec<Memory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "chat_history")]
    pub chat_history: Option<Vec<Exchange>>,
}

fn default_version() -> String {
    BUNDLE_VERSION.to_string()
}

impl ExportBundle {
    pub fn new(memories: Vec<Memory>, exported_at: DateTime<Utc>) -> Self {
        Self {
            version: default_version(),
            exported_at,
            memories,
            settings: None,
            chat_history: None,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_chat_history(mut self, history: Vec<Exchange>) -> Self {
        self.chat_history = Some(history);
        self
    }
}

fn render<T: Serialize + ?Sized>(value: &T, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        ExportFormat::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}

/// The memories as a plain array.
pub fn export_memories(memories: &[Memory], format: ExportFormat) -> Result<String> {
    render(memories, format)
}

pub fn export_bundle(bundle: &ExportBundle, format: ExportFormat) -> Result<String> {
    render(bundle, format)
}

/// `recall_backup_<YYYY-MM-DD>.json`
pub fn backup_file_name(now: DateTime<Utc>) -> String {
    format!("recall_backup_{}.json", now.format("%Y-%m-%d"))
}

/// Write a full backup into `dir` and record the time under `last_backup`.
pub fn write_backup(
    journal: &Journal,
    settings: &Settings,
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let store = journal.store();
    let history: Vec<Exchange> = store.get(KEY_CHAT_HISTORY)?.unwrap_or_default();
    let bundle = ExportBundle::new(journal.list().to_vec(), now)
        .with_settings(settings.clone())
        .with_chat_history(history);
    let content = export_bundle(&bundle, ExportFormat::Json)?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(backup_file_name(now));
    let mut temp_file = NamedTempFile::new_in(dir)
        .map_err(|e| RecallError::Storage(format!("Failed to create temp file: {}", e)))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| RecallError::Storage(format!("Failed to write backup: {}", e)))?;
    temp_file
        .persist(&path)
        .map_err(|e| RecallError::Storage(format!("Failed to persist backup: {}", e)))?;

    store.set(KEY_LAST_BACKUP, &now)?;
    tracing::info!(path = %path.display(), memories = bundle.memories.len(), "Wrote backup");
    Ok(path)
}

pub fn last_backup(journal: &Journal) -> Result<Option<DateTime<Utc>>> {
    journal.store().get(KEY_LAST_BACKUP)
}

/// Whether the configured interval has elapsed since the last backup.
pub fn backup_due(journal: &Journal, interval: BackupInterval, now: DateTime<Utc>) -> Result<bool> {
    let Some(period) = interval.period() else {
        return Ok(false);
    };
    Ok(match last_backup(journal)? {
        Some(last) => now - last >= period,
        None => true,
    })
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum ImportPayload {
    Memories(Vec<Memory>),
    Bundle(ExportBundle),
}

/// Parse any supported export shape; JSON when it looks like JSON, YAML otherwise.
pub fn parse_import(content: &str) -> Result<ExportBundle> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Err(RecallError::Parse("Import file is empty".to_string()));
    }

    let payload: ImportPayload = if trimmed.starts_with('[') || trimmed.starts_with('{') {
        serde_json::from_str(trimmed)
            .map_err(|e| RecallError::Parse(format!("Invalid JSON import: {}", e)))?
    } else {
        serde_yaml::from_str(trimmed)
            .map_err(|e| RecallError::Parse(format!("Invalid YAML import: {}", e)))?
    };

    Ok(match payload {
        ImportPayload::Memories(memories) => ExportBundle::new(memories, Utc::now()),
        ImportPayload::Bundle(bundle) => bundle,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Add memories whose ids are not present yet
    #[default]
    Merge,
    /// Swap the whole journal, settings and chat history included when present
    Replace,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub settings_restored: bool,
    pub history_restored: bool,
}

/// Write the side entries first and the memories last, remembering what
/// each overwritten key held before.
fn write_replacement<'k>(
    journal: &mut Journal,
    candidate: Vec<Memory>,
    extras: &[(&'k str, Option<String>)],
    written: &mut Vec<(&'k str, Option<String>)>,
) -> Result<()> {
    let store = journal.store().clone();
    for (key, raw) in extras {
        if let Some(raw) = raw {
            let previous = store.get_raw(key)?;
            store.set_raw(key, raw)?;
            written.push((*key, previous));
        }
    }
    journal.replace_all(candidate)
}

/// Put back a key's previous value after a failed replace.
fn restore(store: &KvStore, key: &str, previous: Option<String>) {
    let result = match previous {
        Some(raw) => store.set_raw(key, &raw),
        None => store.remove(key).map(|_| ()),
    };
    if let Err(e) = result {
        tracing::warn!(key = %key, error = %e, "Could not roll back store entry");
    }
}

pub fn import_bundle(
    journal: &mut Journal,
    bundle: ExportBundle,
    mode: ImportMode,
    now: DateTime<Utc>,
) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    match mode {
        ImportMode::Merge => {
            let outcome = journal.merge(bundle.memories)?;
            summary.imported = outcome.added;
            summary.skipped = outcome.skipped;
        }
        ImportMode::Replace => {
            let count = bundle.memories.len();
            let candidate = journal.prepare_replace(bundle.memories)?;
            let extras = [
                (KEY_SETTINGS, bundle.settings.as_ref().map(serde_json::to_string).transpose()?),
                (
                    KEY_CHAT_HISTORY,
                    bundle.chat_history.as_ref().map(serde_json::to_string).transpose()?,
                ),
            ];

            let store = journal.store().clone();
            let mut written = Vec::new();
            if let Err(e) = write_replacement(journal, candidate, &extras, &mut written) {
                for (key, previous) in written.into_iter().rev() {
                    restore(&store, key, previous);
                }
                return Err(e);
            }

            summary.imported = journal.len();
            summary.skipped = count - journal.len();
            summary.settings_restored = extras[0].1.is_some();
            summary.history_restored = extras[1].1.is_some();
        }
    }

    journal.store().set(KEY_LAST_IMPORT, &now)?;
    tracing::info!(
        imported = summary.imported,
        skipped = summary.skipped,
        mode = ?mode,
        "Imported memories"
    );
    Ok(summary)
}
