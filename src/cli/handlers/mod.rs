mod add;
mod assistant;
mod delete;
mod edit;
mod group;
mod index;
mod init;
mod list;
mod search;
mod settings;
mod show;
mod stats;
mod transfer;
mod utils;

pub use add::{AddParams, handle_add};
pub use assistant::{handle_analyze, handle_chat, handle_history};
pub use delete::{handle_clear, handle_delete};
pub use edit::{EditParams, handle_edit};
pub use group::{GroupParams, handle_group};
pub use index::handle_index;
pub use init::handle_init;
pub use list::{ListParams, handle_list};
pub use search::{FindParams, handle_find, handle_search};
pub use settings::handle_settings;
pub use show::handle_show;
pub use stats::handle_stats;
pub use transfer::{handle_backup, handle_export, handle_import, run_auto_backup};

use crate::config::{self, RecallConfig};
use crate::error::RecallError;
use crate::index::ClassificationIndex;
use crate::storage::{Journal, KvStore, Settings};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: RecallConfig,
    pub data_dir: PathBuf,
    pub journal: Journal,
    pub settings: Settings,
    pub index: ClassificationIndex,
}

impl CommandContext {
    /// Open an initialized journal in `data_dir`.
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        if !config::is_initialized(&data_dir) {
            return Err(RecallError::NotInitialized.into());
        }
        let config =
            RecallConfig::load(&data_dir).context("Failed to load recall configuration")?;
        let store = KvStore::open(&config.store_path(&data_dir))
            .with_context(|| format!("Failed to open store in {}", data_dir.display()))?;
        let settings = Settings::load(&store).context("Failed to load settings")?;
        let journal = Journal::open(store)
            .context("Failed to load memories")?
            .with_max_memories(settings.max_memories)
            .with_id_suffix_length(config.journal.id_suffix_length);
        let index = ClassificationIndex::build(journal.list());

        Ok(Self {
            config,
            data_dir,
            journal,
            settings,
            index,
        })
    }

    pub fn store(&self) -> &KvStore {
        self.journal.store()
    }
}
