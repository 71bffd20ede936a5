//! Journal statistics for `recall stats`.

use crate::error::Result;
use crate::index::{ClassificationIndex, Dimension};
use crate::model::{Memory, MemoryKind};
use crate::storage::{KEY_LAST_BACKUP, KvStore};
use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

pub const RECENT_LIMIT: usize = 10;
pub const TOP_TAGS_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateCounts {
    pub today: usize,
    /// Since the start of the day seven days ago
    pub this_week: usize,
    pub this_month: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageInfo {
    pub memories: usize,
    pub keys: usize,
    pub bytes_used: u64,
    pub average_bytes: u64,
    pub last_backup: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataStatistics {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_class: BTreeMap<String, usize>,
    pub by_importance: BTreeMap<String, usize>,
    pub dates: DateCounts,
    pub recent_activity: Vec<Memory>,
    pub top_tags: Vec<TagCount>,
    pub storage: StorageInfo,
}

impl DataStatistics {
    pub fn compute(
        memories: &[Memory],
        index: &ClassificationIndex,
        store: &KvStore,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let usage = store.usage()?;
        let last_backup: Option<DateTime<Utc>> = store.get(KEY_LAST_BACKUP)?;
        let average_bytes = if memories.is_empty() {
            0
        } else {
            usage.bytes / memories.len() as u64
        };

        Ok(Self {
            total: memories.len(),
            by_type: index.counts(Dimension::Type),
            by_class: index.counts(Dimension::Class),
            by_importance: index.counts(Dimension::Importance),
            dates: date_counts(memories, now),
            recent_activity: recent_activity(memories, now)
                .into_iter()
                .cloned()
                .collect(),
            top_tags: top_tags(index, TOP_TAGS_LIMIT),
            storage: StorageInfo {
                memories: memories.len(),
                keys: usage.keys,
                bytes_used: usage.bytes,
                average_bytes,
                last_backup,
            },
        })
    }
}

pub fn date_counts(memories: &[Memory], now: DateTime<Utc>) -> DateCounts {
    let today = now.date_naive();
    let start_of_today = today.and_time(NaiveTime::MIN).and_utc();
    let week_start = start_of_today - Duration::days(7);
    let month_start = today
        .with_day(1)
        .unwrap_or(today)
        .and_time(NaiveTime::MIN)
        .and_utc();

    let since = |start: DateTime<Utc>| memories.iter().filter(|m| m.timestamp >= start).count();
    DateCounts {
        today: since(start_of_today),
        this_week: since(week_start),
        this_month: since(month_start),
    }
}

/// Memories from the last 24 hours, newest first.
pub fn recent_activity(memories: &[Memory], now: DateTime<Utc>) -> Vec<&Memory> {
    let cutoff = now - Duration::hours(24);
    let mut recent: Vec<&Memory> = memories.iter().filter(|m| m.timestamp > cutoff).collect();
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    recent.truncate(RECENT_LIMIT);
    recent
}

/// Most used tags; equal counts keep alphabetical order.
pub fn top_tags(index: &ClassificationIndex, limit: usize) -> Vec<TagCount> {
    let mut tags: Vec<TagCount> = index
        .counts(Dimension::Tags)
        .into_iter()
        .map(|(tag, count)| TagCount { tag, count })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count));
    tags.truncate(limit);
    tags
}

/// Count per kind, in declaration order, zero counts omitted.
pub fn type_breakdown(memories: &[Memory]) -> Vec<(MemoryKind, usize)> {
    MemoryKind::ALL
        .iter()
        .map(|kind| (*kind, memories.iter().filter(|m| m.kind == *kind).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}
