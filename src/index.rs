//! Classification indexes over the journal.
//!
//! Each dimension maps a derived key to the ids of the memories in that
//! group. The index is rebuilt from the full array on open and kept in step
//! with [`ClassificationIndex::insert`] / [`ClassificationIndex::remove`].

use crate::model::{Memory, MemoryClass, MemoryKind};
use crate::search::{self, SortBy};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::{fmt, str::FromStr};

const MONTH_PREFIX: &str = "month_";
const YEAR_PREFIX: &str = "year_";

/// Keyword rules checked in order; the first class with a hit wins.
const CLASS_RULES: &[(MemoryClass, &[&str])] = &[
    (
        MemoryClass::Work,
        &[
            "meeting", "work", "project", "report", "presentation", "office", "회의", "업무",
            "프로젝트", "일", "미팅", "보고서", "발표",
        ],
    ),
    (
        MemoryClass::Personal,
        &[
            "personal", "family", "friend", "hobby", "exercise", "개인", "가족", "친구", "취미",
            "운동", "건강",
        ],
    ),
    (
        MemoryClass::Learning,
        &[
            "study", "learn", "book", "lecture", "class", "course", "research", "공부", "학습",
            "책", "강의", "수업", "교육", "연구",
        ],
    ),
    (
        MemoryClass::Travel,
        &[
            "travel", "trip", "vacation", "hotel", "flight", "train", "여행", "휴가", "관광",
            "호텔", "비행기", "기차",
        ],
    ),
    (
        MemoryClass::Food,
        &[
            "food", "cooking", "restaurant", "recipe", "cafe", "음식", "요리", "식당", "레시피",
            "카페", "맛집",
        ],
    ),
    (
        MemoryClass::Shopping,
        &[
            "shopping", "purchase", "order", "delivery", "쇼핑", "구매", "온라인", "배송",
            "주문", "결제",
        ],
    ),
    (
        MemoryClass::Health,
        &[
            "hospital", "doctor", "medicine", "treatment", "checkup", "병원", "의사", "약",
            "치료", "검사", "건강",
        ],
    ),
    (
        MemoryClass::Finance,
        &[
            "money", "bank", "invest", "stock", "insurance", "돈", "결제", "은행", "투자", "주식",
            "보험",
        ],
    ),
    (
        MemoryClass::Entertainment,
        &[
            "movie", "music", "game", "sports", "concert", "drama", "영화", "음악", "게임",
            "스포츠", "공연", "드라마",
        ],
    ),
    (
        MemoryClass::Ideas,
        &[
            "idea", "thought", "plan", "goal", "dream", "inspiration", "아이디어", "생각", "계획",
            "목표", "꿈", "영감",
        ],
    ),
];

/// Assign a topical class: tags first, then content keywords, then the kind.
pub fn classify(memory: &Memory) -> MemoryClass {
    for tag in &memory.tags {
        let tag = tag.to_lowercase();
        for (class, keywords) in CLASS_RULES {
            if keywords.contains(&tag.as_str()) {
                return *class;
            }
        }
    }

    let content = memory.content.to_lowercase();
    for (class, keywords) in CLASS_RULES {
        if keywords.iter().any(|k| content.contains(k)) {
            return *class;
        }
    }

    match memory.kind {
        MemoryKind::Photo | MemoryKind::Video => MemoryClass::Media,
        MemoryKind::Voice | MemoryKind::Text => MemoryClass::Notes,
        MemoryKind::Location => MemoryClass::Places,
        MemoryKind::Document => MemoryClass::Documents,
        MemoryKind::Other => MemoryClass::General,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Date,
    Person,
    Class,
    Importance,
    Tags,
    Type,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Date,
        Dimension::Person,
        Dimension::Class,
        Dimension::Importance,
        Dimension::Tags,
        Dimension::Type,
    ];
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Date => write!(f, "date"),
            Dimension::Person => write!(f, "person"),
            Dimension::Class => write!(f, "class"),
            Dimension::Importance => write!(f, "importance"),
            Dimension::Tags => write!(f, "tags"),
            Dimension::Type => write!(f, "type"),
        }
    }
}

impl FromStr for Dimension {
    type Err = crate::error::RecallError;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.to_lowercase().as_str() {
            "date" => Ok(Dimension::Date),
            "person" => Ok(Dimension::Person),
            "class" => Ok(Dimension::Class),
            "importance" => Ok(Dimension::Importance),
            "tag" | "tags" => Ok(Dimension::Tags),
            "type" => Ok(Dimension::Type),
            _ => Err(crate::error::RecallError::Parse(format!(
                "Unknown index dimension: {}",
                s
            ))),
        }
    }
}

/// Extra narrowing for [`ClassificationIndex::search`].
#[derive(Debug, Clone, Default)]
pub struct ClassificationFilter {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub min_importance: Option<u8>,
    pub kind: Option<MemoryKind>,
    /// Keep memories carrying any of these tags.
    pub tags: Vec<String>,
    pub sort_by: SortBy,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveGroup {
    pub key: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostActive {
    pub date: Option<ActiveGroup>,
    pub person: Option<ActiveGroup>,
    pub class: Option<ActiveGroup>,
    pub tag: Option<ActiveGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexReport {
    pub total_memories: usize,
    pub groups: BTreeMap<Dimension, usize>,
    pub most_active: MostActive,
}

type Groups = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default)]
pub struct ClassificationIndex {
    total: usize,
    by_date: Groups,
    by_person: Groups,
    by_class: Groups,
    by_importance: Groups,
    by_tags: Groups,
    by_type: Groups,
}

fn push(groups: &mut Groups, key: String, id: &str) {
    groups.entry(key).or_default().push(id.to_string());
}

impl ClassificationIndex {
    pub fn build(memories: &[Memory]) -> Self {
        let mut index = Self::default();
        for memory in memories {
            index.insert(memory);
        }
        tracing::debug!(
            total = index.total,
            date_groups = index.by_date.len(),
            person_groups = index.by_person.len(),
            class_groups = index.by_class.len(),
            importance_groups = index.by_importance.len(),
            "Built classification index"
        );
        index
    }

    fn groups(&self, dimension: Dimension) -> &Groups {
        match dimension {
            Dimension::Date => &self.by_date,
            Dimension::Person => &self.by_person,
            Dimension::Class => &self.by_class,
            Dimension::Importance => &self.by_importance,
            Dimension::Tags => &self.by_tags,
            Dimension::Type => &self.by_type,
        }
    }

    fn all_groups_mut(&mut self) -> [&mut Groups; 6] {
        [
            &mut self.by_date,
            &mut self.by_person,
            &mut self.by_class,
            &mut self.by_importance,
            &mut self.by_tags,
            &mut self.by_type,
        ]
    }

    pub fn insert(&mut self, memory: &Memory) {
        let id = memory.id.as_str();
        let day = memory.day_key();
        push(&mut self.by_date, format!("{}{}", MONTH_PREFIX, &day[..7]), id);
        push(&mut self.by_date, format!("{}{}", YEAR_PREFIX, &day[..4]), id);
        push(&mut self.by_date, day, id);
        push(&mut self.by_person, memory.owner().to_string(), id);
        push(&mut self.by_class, classify(memory).to_string(), id);
        push(
            &mut self.by_importance,
            memory.importance_level().to_string(),
            id,
        );
        for tag in &memory.tags {
            push(&mut self.by_tags, tag.clone(), id);
        }
        push(&mut self.by_type, memory.kind.to_string(), id);
        self.total += 1;
    }

    /// Drop a memory from every group; empty groups disappear.
    pub fn remove(&mut self, id: &str) {
        let mut found = false;
        for groups in self.all_groups_mut() {
            groups.retain(|_, ids| {
                let before = ids.len();
                ids.retain(|i| i != id);
                found |= ids.len() != before;
                !ids.is_empty()
            });
        }
        if found {
            self.total = self.total.saturating_sub(1);
        }
    }

    pub fn update(&mut self, memory: &Memory) {
        self.remove(&memory.id);
        self.insert(memory);
    }

    /// Rebuild from scratch and report.
    pub fn optimize(&mut self, memories: &[Memory]) -> IndexReport {
        *self = Self::build(memories);
        tracing::info!(total = self.total, "Optimized classification index");
        self.report()
    }

    pub fn keys(&self, dimension: Dimension) -> Vec<&str> {
        self.groups(dimension).keys().map(String::as_str).collect()
    }

    pub fn ids(&self, dimension: Dimension, value: &str) -> &[String] {
        self.groups(dimension)
            .get(value)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Memories in one group, narrowed, sorted and truncated per `filter`.
    pub fn search<'a>(
        &self,
        dimension: Dimension,
        value: &str,
        filter: &ClassificationFilter,
        memories: &'a [Memory],
    ) -> Vec<&'a Memory> {
        let ids = self.ids(dimension, value);
        if ids.is_empty() {
            return Vec::new();
        }

        let by_id: HashMap<&str, &'a Memory> =
            memories.iter().map(|m| (m.id.as_str(), m)).collect();
        let mut results: Vec<&'a Memory> = ids
            .iter()
            .filter_map(|id| by_id.get(id.as_str()).copied())
            .collect();

        if filter.start.is_some() || filter.end.is_some() {
            results = search::filter_by_date_range(results, filter.start, filter.end);
        }
        if let Some(min) = filter.min_importance {
            results.retain(|m| m.importance >= min);
        }
        if let Some(kind) = filter.kind {
            results.retain(|m| m.kind == kind);
        }
        if !filter.tags.is_empty() {
            results.retain(|m| filter.tags.iter().any(|t| m.has_tag(t)));
        }

        search::sort_memories(&mut results, filter.sort_by);

        if let Some(limit) = filter.limit {
            results.truncate(limit);
        }
        results
    }

    /// Group sizes of one dimension.
    pub fn counts(&self, dimension: Dimension) -> BTreeMap<String, usize> {
        self.groups(dimension)
            .iter()
            .map(|(k, ids)| (k.clone(), ids.len()))
            .collect()
    }

    /// Largest group; ties go to the first key in order. Date only
    /// considers day keys.
    pub fn most_active(&self, dimension: Dimension) -> Option<ActiveGroup> {
        let mut best: Option<ActiveGroup> = None;
        for (key, ids) in self.groups(dimension) {
            if dimension == Dimension::Date
                && (key.starts_with(MONTH_PREFIX) || key.starts_with(YEAR_PREFIX))
            {
                continue;
            }
            if best.as_ref().is_none_or(|b| ids.len() > b.count) {
                best = Some(ActiveGroup {
                    key: key.clone(),
                    count: ids.len(),
                });
            }
        }
        best
    }

    pub fn report(&self) -> IndexReport {
        IndexReport {
            total_memories: self.total,
            groups: Dimension::ALL
                .iter()
                .map(|d| (*d, self.groups(*d).len()))
                .collect(),
            most_active: MostActive {
                date: self.most_active(Dimension::Date),
                person: self.most_active(Dimension::Person),
                class: self.most_active(Dimension::Class),
                tag: self.most_active(Dimension::Tags),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn memory(id: &str, kind: MemoryKind, content: &str, tags: &[&str], importance: u8) -> Memory {
        Memory::new(id.to_string(), kind, content.to_string())
            .with_tags(tags.iter().map(|t| t.to_string()).collect())
            .with_importance(importance)
            .with_timestamp(Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap())
    }

    fn sample() -> Vec<Memory> {
        vec![
            memory("m1", MemoryKind::Text, "Weekly project meeting", &["team"], 8),
            memory("m2", MemoryKind::Photo, "Sunset at the beach", &["sea", "team"], 4),
            memory("m3", MemoryKind::Voice, "Grocery list", &[], 5)
                .with_person(Some("mina".to_string())),
            memory("m4", MemoryKind::Location, "Parked on level 3", &[], 2)
                .with_timestamp(Utc.with_ymd_and_hms(2024, 4, 2, 18, 0, 0).unwrap()),
        ]
    }

    #[test]
    fn test_classify_prefers_tags_then_content_then_kind() {
        let tagged = memory("a", MemoryKind::Photo, "nothing special", &["recipe"], 5);
        assert_eq!(classify(&tagged), MemoryClass::Food);

        let content = memory("b", MemoryKind::Photo, "Flight to Jeju confirmed", &[], 5);
        assert_eq!(classify(&content), MemoryClass::Travel);

        let korean = memory("c", MemoryKind::Text, "오늘 회의 정리", &[], 5);
        assert_eq!(classify(&korean), MemoryClass::Work);

        let fallback = memory("d", MemoryKind::Photo, "Sunset", &[], 5);
        assert_eq!(classify(&fallback), MemoryClass::Media);
        let doc = memory("e", MemoryKind::Document, "Lease", &[], 5);
        assert_eq!(classify(&doc), MemoryClass::Documents);
    }

    #[test]
    fn test_date_index_has_day_month_year_keys() {
        let index = ClassificationIndex::build(&sample());
        assert_eq!(index.ids(Dimension::Date, "2024-03-15").len(), 3);
        assert_eq!(index.ids(Dimension::Date, "month_2024-03").len(), 3);
        assert_eq!(index.ids(Dimension::Date, "month_2024-04").len(), 1);
        assert_eq!(index.ids(Dimension::Date, "year_2024").len(), 4);
    }

    #[test]
    fn test_person_importance_tags_type_groups() {
        let index = ClassificationIndex::build(&sample());
        assert_eq!(index.ids(Dimension::Person, "unknown").len(), 3);
        assert_eq!(index.ids(Dimension::Person, "mina"), ["m3".to_string()]);
        assert_eq!(index.ids(Dimension::Importance, "high"), ["m1".to_string()]);
        assert_eq!(index.ids(Dimension::Importance, "minimal"), ["m4".to_string()]);
        assert_eq!(index.ids(Dimension::Tags, "team").len(), 2);
        assert_eq!(index.keys(Dimension::Tags), vec!["sea", "team"]);
        assert_eq!(index.ids(Dimension::Type, "photo"), ["m2".to_string()]);
    }

    #[test]
    fn test_remove_drops_empty_groups() {
        let mut index = ClassificationIndex::build(&sample());
        index.remove("m4");
        assert!(index.ids(Dimension::Date, "month_2024-04").is_empty());
        assert!(!index.keys(Dimension::Type).contains(&"location"));
        assert_eq!(index.report().total_memories, 3);

        index.remove("ghost");
        assert_eq!(index.report().total_memories, 3);
    }

    #[test]
    fn test_update_moves_between_groups() {
        let memories = sample();
        let mut index = ClassificationIndex::build(&memories);
        let mut changed = memories[1].clone();
        changed.importance = 10;
        index.update(&changed);
        assert_eq!(index.ids(Dimension::Importance, "critical"), ["m2".to_string()]);
        assert!(index.ids(Dimension::Importance, "low").is_empty());
    }

    #[test]
    fn test_search_with_filter() {
        let memories = sample();
        let index = ClassificationIndex::build(&memories);

        let filter = ClassificationFilter {
            min_importance: Some(5),
            sort_by: SortBy::Importance,
            ..Default::default()
        };
        let results = index.search(Dimension::Date, "year_2024", &filter, &memories);
        let ids: Vec<&str> = results.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m3"]);

        let filter = ClassificationFilter {
            tags: vec!["sea".to_string()],
            ..Default::default()
        };
        let results = index.search(Dimension::Tags, "team", &filter, &memories);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "m2");

        let limited = ClassificationFilter {
            limit: Some(1),
            ..Default::default()
        };
        assert_eq!(
            index.search(Dimension::Date, "year_2024", &limited, &memories).len(),
            1
        );
        assert!(index
            .search(Dimension::Class, "nope", &ClassificationFilter::default(), &memories)
            .is_empty());
    }

    #[test]
    fn test_report_and_most_active() {
        let index = ClassificationIndex::build(&sample());
        let report = index.report();
        assert_eq!(report.total_memories, 4);
        assert_eq!(report.groups[&Dimension::Type], 4);
        assert_eq!(
            report.most_active.date,
            Some(ActiveGroup {
                key: "2024-03-15".to_string(),
                count: 3
            })
        );
        assert_eq!(report.most_active.tag.unwrap().key, "team");
        assert_eq!(report.most_active.person.unwrap().key, "unknown");
    }

    #[test]
    fn test_counts() {
        let index = ClassificationIndex::build(&sample());
        let counts = index.counts(Dimension::Class);
        assert_eq!(counts.get("work"), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), 4);
    }

    #[test]
    fn test_empty_index_report() {
        let index = ClassificationIndex::build(&[]);
        let report = index.report();
        assert_eq!(report.total_memories, 0);
        assert!(report.most_active.date.is_none());
    }
}
