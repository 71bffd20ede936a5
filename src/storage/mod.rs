//! Persistence for recall.
//!
//! Everything lives in a key-value store: a directory with one file per key,
//! each holding a JSON value.
//!
//! ```text
//! store/
//!   memories.json      [ {id, type, content, timestamp, tags, importance, ...}, ... ]
//!   settings.json      {language, personality, autoBackup, maxMemories, ...}
//!   chat_history.json  [ {user, assistant, timestamp}, ... ]
//!   last_backup.json   "2024-05-01T10:00:00Z"
//! ```
//!
//! ## Components
//!
//! - [`KvStore`]: string keys to JSON values, atomic writes
//! - [`Journal`]: the memory array mirrored to the `memories` key
//! - [`Settings`]: user preferences under the `settings` key

mod journal;
mod kv_store;
mod settings;

pub use journal::{Journal, MemoryPatch, MergeOutcome};
pub use kv_store::{
    KEY_CHAT_HISTORY, KEY_LAST_BACKUP, KEY_LAST_IMPORT, KEY_MEMORIES, KEY_SETTINGS, KvStore,
    StoreUsage,
};
pub use settings::{BackupInterval, Personality, Settings};
