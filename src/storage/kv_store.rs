use crate::{
    error::{RecallError, Result},
    validation,
};
use serde::{Serialize, de::DeserializeOwned};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const KEY_MEMORIES: &str = "memories";
pub const KEY_SETTINGS: &str = "settings";
pub const KEY_CHAT_HISTORY: &str = "chat_history";
pub const KEY_LAST_BACKUP: &str = "last_backup";
pub const KEY_LAST_IMPORT: &str = "last_import";

const VALUE_EXTENSION: &str = "json";

/// Space taken by the store's values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct StoreUsage {
    pub keys: usize,
    pub bytes: u64,
}

/// String-keyed store of JSON values, one file per key.
#[derive(Debug, Clone)]
pub struct KvStore {
    root: PathBuf,
}

impl KvStore {
    pub fn open(root: &Path) -> Result<Self> {
        std::fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn value_path(&self, key: &str) -> Result<PathBuf> {
        validation::validate_id(key)
            .map_err(|e| RecallError::Storage(format!("Invalid store key '{}': {}", key, e)))?;
        Ok(self.root.join(format!("{}.{}", key, VALUE_EXTENSION)))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.value_path(key).map(|p| p.exists()).unwrap_or(false)
    }

    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key)?;
        self.atomic_write(&path, value)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, &raw)
    }

    pub fn remove(&self, key: &str) -> Result<bool> {
        let path = self.value_path(key)?;
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)?;
        tracing::debug!(key = %key, "Removed store entry");
        Ok(true)
    }

    /// All keys currently present, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|e| e == VALUE_EXTENSION) {
                if let Some(stem) = path.file_stem() {
                    keys.push(stem.to_string_lossy().to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    pub fn usage(&self) -> Result<StoreUsage> {
        let mut usage = StoreUsage::default();
        for key in self.keys()? {
            let path = self.value_path(&key)?;
            usage.keys += 1;
            usage.bytes += std::fs::metadata(&path)?.len();
        }
        Ok(usage)
    }

    fn atomic_write(&self, target_path: &Path, content: &str) -> Result<()> {
        let target_dir = target_path
            .parent()
            .ok_or_else(|| RecallError::Storage("Target path has no parent directory".to_string()))?;

        let mut temp_file = NamedTempFile::new_in(target_dir)
            .map_err(|e| RecallError::Storage(format!("Failed to create temp file: {}", e)))?;

        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| RecallError::Storage(format!("Failed to write to temp file: {}", e)))?;

        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| RecallError::Storage(format!("Failed to sync temp file: {}", e)))?;

        temp_file.persist(target_path).map_err(|e| {
            RecallError::Storage(format!(
                "Failed to persist {}: {}",
                target_path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, KvStore) {
        let temp = TempDir::new().unwrap();
        let store = KvStore::open(temp.path()).unwrap();
        (temp, store)
    }

    #[test]
    fn test_set_get_remove() {
        let (_temp, store) = store();
        assert_eq!(store.get::<Vec<u32>>("numbers").unwrap(), None);

        store.set("numbers", &vec![1, 2, 3]).unwrap();
        assert!(store.contains("numbers"));
        assert_eq!(store.get::<Vec<u32>>("numbers").unwrap(), Some(vec![1, 2, 3]));

        assert!(store.remove("numbers").unwrap());
        assert!(!store.remove("numbers").unwrap());
        assert!(!store.contains("numbers"));
    }

    #[test]
    fn test_raw_values_are_json_strings() {
        let (temp, store) = store();
        store.set(KEY_LAST_BACKUP, "2024-05-01T10:00:00Z").unwrap();
        let on_disk = std::fs::read_to_string(temp.path().join("last_backup.json")).unwrap();
        assert_eq!(on_disk, "\"2024-05-01T10:00:00Z\"");
    }

    #[test]
    fn test_keys_and_usage() {
        let (_temp, store) = store();
        store.set_raw("b", "[]").unwrap();
        store.set_raw("a", "{}").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);

        let usage = store.usage().unwrap();
        assert_eq!(usage.keys, 2);
        assert_eq!(usage.bytes, 4);
    }

    #[test]
    fn test_rejects_traversal_keys() {
        let (_temp, store) = store();
        assert!(store.set_raw("../escape", "1").is_err());
        assert!(store.get_raw("a/b").is_err());
        assert!(!store.contains("../escape"));
    }

    #[test]
    fn test_corrupt_value_is_parse_failure() {
        let (_temp, store) = store();
        store.set_raw(KEY_MEMORIES, "not json").unwrap();
        assert!(store.get::<Vec<String>>(KEY_MEMORIES).is_err());
    }
}
