use crate::index::{ClassificationIndex, Dimension};
use crate::model::{Memory, MemoryKind};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use rand::seq::SliceRandom;
use regex::Regex;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Newest first
    #[default]
    Date,
    /// Highest importance first
    Importance,
    Type,
    Person,
    Random,
    /// Keep the incoming order
    None,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Date => write!(f, "date"),
            SortBy::Importance => write!(f, "importance"),
            SortBy::Type => write!(f, "type"),
            SortBy::Person => write!(f, "person"),
            SortBy::Random => write!(f, "random"),
            SortBy::None => write!(f, "none"),
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(SortBy::Date),
            "importance" => Ok(SortBy::Importance),
            "type" => Ok(SortBy::Type),
            "person" => Ok(SortBy::Person),
            "random" => Ok(SortBy::Random),
            "none" => Ok(SortBy::None),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

pub fn sort_memories(results: &mut [&Memory], sort_by: SortBy) {
    match sort_by {
        SortBy::Date => results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortBy::Importance => results.sort_by(|a, b| b.importance.cmp(&a.importance)),
        SortBy::Type => results.sort_by(|a, b| a.kind.to_string().cmp(&b.kind.to_string())),
        SortBy::Person => results.sort_by(|a, b| a.owner().cmp(b.owner())),
        SortBy::Random => results.shuffle(&mut rand::thread_rng()),
        SortBy::None => {}
    }
}

/// Keep memories with `start <= timestamp <= end`; open bounds match all.
pub fn filter_by_date_range<'a>(
    memories: Vec<&'a Memory>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Vec<&'a Memory> {
    memories
        .into_iter()
        .filter(|m| start.is_none_or(|s| m.timestamp >= s) && end.is_none_or(|e| m.timestamp <= e))
        .collect()
}

/// Case-insensitive substring match on content, tags or type, most
/// important first, then newest.
pub fn simple_search<'a>(query: &str, memories: &'a [Memory]) -> Vec<&'a Memory> {
    let query = query.to_lowercase();
    let mut results: Vec<&'a Memory> = memories
        .iter()
        .filter(|m| {
            m.content.to_lowercase().contains(&query)
                || m.tags.iter().any(|t| t.to_lowercase().contains(&query))
                || m.kind.to_string().contains(&query)
        })
        .collect();
    results.sort_by(|a, b| {
        b.importance
            .cmp(&a.importance)
            .then_with(|| b.timestamp.cmp(&a.timestamp))
    });
    results
}

/// Any whitespace-separated keyword found in content, tags, type or owner.
pub fn text_search<'a>(query: &str, memories: &'a [Memory]) -> Vec<&'a Memory> {
    let keywords: Vec<String> = query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if keywords.is_empty() {
        return Vec::new();
    }

    memories
        .iter()
        .filter(|m| {
            let haystack = format!(
                "{} {} {} {}",
                m.content,
                m.tags.join(" "),
                m.kind,
                m.owner()
            )
            .to_lowercase();
            keywords.iter().any(|k| haystack.contains(k.as_str()))
        })
        .collect()
}

/// Search expression with optional field prefix and regex support.
#[derive(Debug, Clone)]
pub enum SearchQuery {
    /// Simple substring search (case-insensitive)
    Simple(String),
    /// Regex search
    Regex(Regex),
    /// Field-specific search
    Field {
        field: SearchField,
        pattern: Box<SearchQuery>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Content,
    Tag,
    Type,
    Person,
    Id,
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "content" | "text" => Ok(SearchField::Content),
            "tag" | "tags" => Ok(SearchField::Tag),
            "type" => Ok(SearchField::Type),
            "person" | "by" => Ok(SearchField::Person),
            "id" => Ok(SearchField::Id),
            _ => Err(format!("Unknown field: {}", s)),
        }
    }
}

impl SearchQuery {
    /// Parse a search query string
    /// Supports:
    /// - Simple: "beach" -> searches content, tags and type
    /// - Field-specific: "tag:travel" -> searches tags only
    /// - Regex: "regex:jeju|busan" -> regex search
    /// - Combined: "content:regex:^Lunch" -> regex in the content field
    pub fn parse(query: &str) -> Result<Self, String> {
        if query.is_empty() {
            return Err("Empty query".to_string());
        }

        if let Some((field_str, pattern)) = query.split_once(':') {
            if let Ok(field) = field_str.parse::<SearchField>() {
                let sub_query = Self::parse(pattern)?;
                return Ok(SearchQuery::Field {
                    field,
                    pattern: Box::new(sub_query),
                });
            }

            if field_str == "regex" {
                let regex = Regex::new(pattern).map_err(|e| format!("Invalid regex: {}", e))?;
                return Ok(SearchQuery::Regex(regex));
            }
        }

        Ok(SearchQuery::Simple(query.to_string()))
    }

    fn matches_text(&self, text: &str) -> bool {
        match self {
            SearchQuery::Simple(p) => text.to_lowercase().contains(&p.to_lowercase()),
            SearchQuery::Regex(r) => r.is_match(text),
            SearchQuery::Field { .. } => false,
        }
    }

    pub fn matches(&self, memory: &Memory) -> bool {
        match self {
            SearchQuery::Simple(_) | SearchQuery::Regex(_) => {
                self.matches_text(&memory.content)
                    || memory.tags.iter().any(|t| self.matches_text(t))
                    || self.matches_text(&memory.kind.to_string())
            }
            SearchQuery::Field { field, pattern } => match field {
                SearchField::Content => pattern.matches_text(&memory.content),
                SearchField::Tag => memory.tags.iter().any(|t| pattern.matches_text(t)),
                SearchField::Type => pattern.matches_text(&memory.kind.to_string()),
                SearchField::Person => pattern.matches_text(memory.owner()),
                SearchField::Id => pattern.matches_text(&memory.id),
            },
        }
    }

    /// Matching memories, most important first, then newest.
    pub fn run<'a>(&self, memories: &'a [Memory]) -> Vec<&'a Memory> {
        if let SearchQuery::Simple(query) = self {
            return simple_search(query, memories);
        }
        let mut results: Vec<&'a Memory> = memories.iter().filter(|m| self.matches(m)).collect();
        results.sort_by(|a, b| {
            b.importance
                .cmp(&a.importance)
                .then_with(|| b.timestamp.cmp(&a.timestamp))
        });
        results
    }
}

/// Calendar span named in a natural-language query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    Day(NaiveDate),
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportanceHint {
    High,
    Low,
}

/// What a free-form query asks for, detected in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmartQuery {
    Date(DatePattern),
    Importance(ImportanceHint),
    Type(MemoryKind),
    Text(String),
}

const TYPE_KEYWORDS: &[(&str, MemoryKind)] = &[
    ("photo", MemoryKind::Photo),
    ("photos", MemoryKind::Photo),
    ("picture", MemoryKind::Photo),
    ("사진", MemoryKind::Photo),
    ("voice", MemoryKind::Voice),
    ("음성", MemoryKind::Voice),
    ("text", MemoryKind::Text),
    ("note", MemoryKind::Text),
    ("텍스트", MemoryKind::Text),
    ("video", MemoryKind::Video),
    ("videos", MemoryKind::Video),
    ("영상", MemoryKind::Video),
    ("location", MemoryKind::Location),
    ("위치", MemoryKind::Location),
    ("document", MemoryKind::Document),
    ("문서", MemoryKind::Document),
];

/// Whole-word match for ASCII keywords, substring match otherwise.
fn mentions(padded: &str, keyword: &str) -> bool {
    if keyword.is_ascii() {
        padded.contains(&format!(" {} ", keyword))
    } else {
        padded.contains(keyword)
    }
}

impl SmartQuery {
    pub fn parse(query: &str, today: NaiveDate) -> Self {
        let lower = query.to_lowercase();
        let padded = format!(" {} ", lower.split_whitespace().collect::<Vec<_>>().join(" "));

        if let Some(pattern) = Self::date_pattern(&lower, &padded, today) {
            return SmartQuery::Date(pattern);
        }

        if ["important", "urgent", "high", "중요", "높은"]
            .iter()
            .any(|k| mentions(&padded, k))
        {
            return SmartQuery::Importance(ImportanceHint::High);
        }
        if ["low", "낮은"].iter().any(|k| mentions(&padded, k)) {
            return SmartQuery::Importance(ImportanceHint::Low);
        }

        if let Some((_, kind)) = TYPE_KEYWORDS.iter().find(|(k, _)| mentions(&padded, k)) {
            return SmartQuery::Type(*kind);
        }

        SmartQuery::Text(query.trim().to_string())
    }

    fn date_pattern(lower: &str, padded: &str, today: NaiveDate) -> Option<DatePattern> {
        for token in lower.split_whitespace() {
            let token = token.trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '-' && c != '/');
            if let Ok(date) = NaiveDate::parse_from_str(token, "%Y-%m-%d") {
                return Some(DatePattern::Day(date));
            }
            if let Ok(date) = NaiveDate::parse_from_str(token, "%m/%d/%Y") {
                return Some(DatePattern::Day(date));
            }
        }

        if mentions(padded, "today") || mentions(padded, "오늘") {
            return Some(DatePattern::Day(today));
        }
        if mentions(padded, "yesterday") || mentions(padded, "어제") {
            return today.pred_opt().map(DatePattern::Day);
        }
        if mentions(padded, "this week") || mentions(padded, "이번주") {
            return Some(DatePattern::ThisWeek);
        }
        if mentions(padded, "last week") || mentions(padded, "지난주") {
            return Some(DatePattern::LastWeek);
        }
        if mentions(padded, "this month") || mentions(padded, "이번달") {
            return Some(DatePattern::ThisMonth);
        }
        if mentions(padded, "last month") || mentions(padded, "지난달") {
            return Some(DatePattern::LastMonth);
        }
        None
    }
}

/// Sunday-to-Saturday week containing `day`.
pub fn week_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = day - Duration::days(day.weekday().num_days_from_sunday() as i64);
    (start, start + Duration::days(6))
}

pub fn month_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = day.with_day(1).unwrap_or(day);
    let next = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
    };
    let end = next.and_then(|n| n.pred_opt()).unwrap_or(start);
    (start, end)
}

/// Whole days `[first 00:00:00, last 23:59:59.999]` in UTC.
pub fn day_span(first: NaiveDate, last: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = first.and_time(NaiveTime::MIN).and_utc();
    let end = (last.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::milliseconds(1)).and_utc();
    (start, end)
}

impl DatePattern {
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            DatePattern::Day(day) => (*day, *day),
            DatePattern::ThisWeek => week_bounds(today),
            DatePattern::LastWeek => week_bounds(today - Duration::days(7)),
            DatePattern::ThisMonth => month_bounds(today),
            DatePattern::LastMonth => {
                let (first, _) = month_bounds(today);
                month_bounds(first.pred_opt().unwrap_or(first))
            }
        }
    }
}

/// Admin-style filters; every set field must match.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Substring of content or any tag
    pub query: Option<String>,
    pub kind: Option<MemoryKind>,
    /// Timestamp prefix, e.g. `2024-05` or `2024-05-01`
    pub date_prefix: Option<String>,
    pub min_importance: Option<u8>,
    pub tag: Option<String>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.kind.is_none()
            && self.date_prefix.is_none()
            && self.min_importance.is_none()
            && self.tag.is_none()
    }

    pub fn matches(&self, memory: &Memory) -> bool {
        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            let hit = memory.content.to_lowercase().contains(&query)
                || memory.tags.iter().any(|t| t.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }
        if self.kind.is_some_and(|k| memory.kind != k) {
            return false;
        }
        if let Some(prefix) = &self.date_prefix {
            if !memory.timestamp.to_rfc3339().starts_with(prefix.as_str()) {
                return false;
            }
        }
        if self.min_importance.is_some_and(|min| memory.importance < min) {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !memory.has_tag(tag) {
                return false;
            }
        }
        true
    }
}

pub fn filter_memories<'a>(filters: &SearchFilters, memories: &'a [Memory]) -> Vec<&'a Memory> {
    memories.iter().filter(|m| filters.matches(m)).collect()
}

#[derive(Debug, Clone)]
pub struct SmartSearchOptions {
    pub filters: SearchFilters,
    pub sort_by: SortBy,
    pub limit: Option<usize>,
}

impl Default for SmartSearchOptions {
    fn default() -> Self {
        Self {
            filters: SearchFilters::default(),
            sort_by: SortBy::Date,
            limit: None,
        }
    }
}

/// Resolve a natural-language query against the journal.
pub fn smart_search<'a>(
    query: &str,
    options: &SmartSearchOptions,
    memories: &'a [Memory],
    index: &ClassificationIndex,
    now: DateTime<Utc>,
) -> Vec<&'a Memory> {
    let today = now.date_naive();
    let parsed = SmartQuery::parse(query, today);
    tracing::debug!(query = %query, parsed = ?parsed, "Smart search");

    let mut results: Vec<&'a Memory> = match &parsed {
        SmartQuery::Date(DatePattern::Day(day)) => {
            let key = day.format("%Y-%m-%d").to_string();
            let ids = index.ids(Dimension::Date, &key);
            memories.iter().filter(|m| ids.contains(&m.id)).collect()
        }
        SmartQuery::Date(pattern) => {
            let (first, last) = pattern.bounds(today);
            let (start, end) = day_span(first, last);
            filter_by_date_range(memories.iter().collect(), Some(start), Some(end))
        }
        SmartQuery::Importance(ImportanceHint::High) => {
            memories.iter().filter(|m| m.importance >= 7).collect()
        }
        SmartQuery::Importance(ImportanceHint::Low) => {
            memories.iter().filter(|m| m.importance <= 4).collect()
        }
        SmartQuery::Type(kind) => memories.iter().filter(|m| m.kind == *kind).collect(),
        SmartQuery::Text(text) => text_search(text, memories),
    };

    if !options.filters.is_empty() {
        results.retain(|m| options.filters.matches(m));
    }
    sort_memories(&mut results, options.sort_by);
    if let Some(limit) = options.limit {
        results.truncate(limit);
    }
    results
}

/// One page of a result list.
#[derive(Debug, Clone)]
pub struct Page<'s, T> {
    pub items: &'s [T],
    /// 1-based
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice out 1-based page `number`; out-of-range pages are empty.
pub fn paginate<T>(items: &[T], number: usize, size: usize) -> Page<'_, T> {
    let size = size.max(1);
    let number = number.max(1);
    let total_pages = items.len().div_ceil(size);
    let start = (number - 1).saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());
    Page {
        items: &items[start..end],
        number,
        total_pages,
        total_items: items.len(),
    }
}
