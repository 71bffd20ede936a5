use super::kv_store::{KEY_MEMORIES, KvStore};
use crate::{
    error::{RecallError, Result},
    model::{GeoPoint, Memory, MemoryKind, generate_id},
    validation,
};
use chrono::{Duration, Utc};
use std::collections::HashSet;

/// Field changes applied by [`Journal::update`]. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct MemoryPatch {
    pub content: Option<String>,
    pub kind: Option<MemoryKind>,
    pub importance: Option<u8>,
    pub add_tags: Vec<String>,
    pub remove_tags: Vec<String>,
    /// `Some("")` clears the person.
    pub person: Option<String>,
    pub location: Option<GeoPoint>,
}

impl MemoryPatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.kind.is_none()
            && self.importance.is_none()
            && self.add_tags.is_empty()
            && self.remove_tags.is_empty()
            && self.person.is_none()
            && self.location.is_none()
    }

    fn apply(self, memory: &mut Memory) {
        if let Some(content) = self.content {
            memory.content = content;
        }
        if let Some(kind) = self.kind {
            memory.kind = kind;
        }
        if let Some(importance) = self.importance {
            memory.importance = importance;
        }
        for tag in self.add_tags {
            if !memory.has_tag(&tag) {
                memory.tags.push(tag);
            }
        }
        for tag in &self.remove_tags {
            memory.tags.retain(|t| t != tag);
        }
        if let Some(person) = self.person {
            memory.person = if person.is_empty() { None } else { Some(person) };
        }
        if let Some(location) = self.location {
            memory.location = Some(location);
        }
    }
}

/// Result of merging imported memories into the journal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MergeOutcome {
    pub added: usize,
    pub skipped: usize,
}

/// The memory array, newest first, mirrored to the `memories` store entry.
///
/// Every mutation serializes the whole candidate array first and only
/// replaces the in-memory array once the write succeeded, so the two never
/// diverge.
pub struct Journal {
    store: KvStore,
    memories: Vec<Memory>,
    max_memories: usize,
    id_suffix_length: usize,
}

impl Journal {
    pub fn open(store: KvStore) -> Result<Self> {
        let memories: Vec<Memory> = store.get(KEY_MEMORIES)?.unwrap_or_default();
        tracing::debug!(count = memories.len(), "Loaded memories");
        Ok(Self {
            store,
            memories,
            max_memories: usize::MAX,
            id_suffix_length: 9,
        })
    }

    pub fn with_max_memories(mut self, max_memories: usize) -> Self {
        self.max_memories = max_memories;
        self
    }

    pub fn with_id_suffix_length(mut self, length: usize) -> Self {
        self.id_suffix_length = length;
        self
    }

    pub fn store(&self) -> &KvStore {
        &self.store
    }

    pub fn generate_id(&self) -> String {
        loop {
            let id = generate_id(self.id_suffix_length);
            if !self.contains(&id) {
                return id;
            }
        }
    }

    pub fn list(&self) -> &[Memory] {
        &self.memories
    }

    pub fn len(&self) -> usize {
        self.memories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.memories.iter().any(|m| m.id == id)
    }

    pub fn get(&self, id: &str) -> Result<&Memory> {
        self.memories
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| RecallError::NotFound(id.to_string()))
    }

    fn validate(memory: &Memory) -> Result<()> {
        validation::validate_id(&memory.id)?;
        validation::validate_content(&memory.content)?;
        validation::validate_importance(memory.importance)?;
        if let Some(location) = &memory.location {
            validation::validate_location(location)?;
        }
        for tag in &memory.tags {
            validation::validate_tag(tag)?;
        }
        Ok(())
    }

    fn commit(&mut self, candidate: Vec<Memory>) -> Result<()> {
        self.store.set(KEY_MEMORIES, &candidate)?;
        self.memories = candidate;
        Ok(())
    }

    pub fn add(&mut self, memory: Memory) -> Result<&Memory> {
        tracing::info!(id = %memory.id, kind = %memory.kind, "Adding memory");

        Self::validate(&memory)?;
        if self.contains(&memory.id) {
            return Err(RecallError::Storage(format!(
                "Memory with id '{}' already exists",
                memory.id
            )));
        }
        if self.memories.len() >= self.max_memories {
            return Err(RecallError::Validation(format!(
                "Journal is full ({} memories). Raise max-memories or delete old entries.",
                self.max_memories
            )));
        }

        let mut candidate = Vec::with_capacity(self.memories.len() + 1);
        candidate.push(memory);
        candidate.extend(self.memories.iter().cloned());
        self.commit(candidate)?;

        Ok(&self.memories[0])
    }

    pub fn update(&mut self, id: &str, patch: MemoryPatch) -> Result<&Memory> {
        tracing::info!(id = %id, "Updating memory");

        let pos = self
            .memories
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| RecallError::NotFound(id.to_string()))?;

        let mut updated = self.memories[pos].clone();
        patch.apply(&mut updated);
        updated.touch();
        Self::validate(&updated)?;

        let mut candidate = self.memories.clone();
        candidate[pos] = updated;
        self.commit(candidate)?;

        Ok(&self.memories[pos])
    }

    pub fn delete(&mut self, id: &str) -> Result<Memory> {
        tracing::info!(id = %id, "Deleting memory");

        let removed = self.get(id)?.clone();
        let candidate: Vec<Memory> = self
            .memories
            .iter()
            .filter(|m| m.id != id)
            .cloned()
            .collect();
        self.commit(candidate)?;
        Ok(removed)
    }

    /// Delete every listed id that exists; returns how many were removed.
    pub fn delete_many(&mut self, ids: &[String]) -> Result<usize> {
        let targets: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let candidate: Vec<Memory> = self
            .memories
            .iter()
            .filter(|m| !targets.contains(m.id.as_str()))
            .cloned()
            .collect();
        let removed = self.memories.len() - candidate.len();
        if removed > 0 {
            tracing::info!(count = removed, "Deleting memories");
            self.commit(candidate)?;
        }
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<usize> {
        let count = self.memories.len();
        tracing::warn!(count, "Clearing all memories");
        self.commit(Vec::new())?;
        Ok(count)
    }

    /// Replace the whole array, newest first.
    pub fn replace_all(&mut self, memories: Vec<Memory>) -> Result<()> {
        let candidate = self.prepare_replace(memories)?;
        self.commit(candidate)
    }

    /// Validate, dedup and order a replacement array without writing it.
    /// Duplicate ids keep their first occurrence.
    pub fn prepare_replace(&self, mut memories: Vec<Memory>) -> Result<Vec<Memory>> {
        for memory in &memories {
            Self::validate(memory)?;
        }
        let mut seen = HashSet::new();
        memories.retain(|m| seen.insert(m.id.clone()));
        if memories.len() > self.max_memories {
            return Err(RecallError::Validation(format!(
                "Import would exceed max-memories ({})",
                self.max_memories
            )));
        }
        memories.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(memories)
    }

    /// Add memories whose ids are not present yet.
    pub fn merge(&mut self, incoming: Vec<Memory>) -> Result<MergeOutcome> {
        let mut outcome = MergeOutcome::default();
        let mut seen: HashSet<String> = self.memories.iter().map(|m| m.id.clone()).collect();
        let mut candidate = self.memories.clone();

        for memory in incoming {
            if seen.contains(&memory.id) {
                outcome.skipped += 1;
                continue;
            }
            Self::validate(&memory)?;
            seen.insert(memory.id.clone());
            candidate.push(memory);
            outcome.added += 1;
        }

        if candidate.len() > self.max_memories {
            return Err(RecallError::Validation(format!(
                "Import would exceed max-memories ({})",
                self.max_memories
            )));
        }

        candidate.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.commit(candidate)?;
        Ok(outcome)
    }

    /// Populate an empty journal with two starter entries.
    pub fn seed_samples(&mut self) -> Result<usize> {
        if !self.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let welcome = Memory::new(
            self.generate_id(),
            MemoryKind::Text,
            "Started keeping memories with recall!".to_string(),
        )
        .with_timestamp(now)
        .with_tags(vec!["start".to_string(), "app".to_string()]);

        let info = Memory::new(
            self.generate_id(),
            MemoryKind::Text,
            "Everything stays on this machine, in the local store.".to_string(),
        )
        .with_timestamp(now - Duration::minutes(1))
        .with_tags(vec!["info".to_string(), "feature".to_string()])
        .with_importance(7);

        self.commit(vec![welcome, info])?;
        Ok(2)
    }
}
