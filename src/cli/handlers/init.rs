use crate::cli::handlers::utils::print_json;
use crate::config::{self, CONFIG_FILE, RecallConfig};
use crate::storage::{Journal, KvStore, Settings};
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

pub fn handle_init(data_dir: PathBuf, samples: bool, json: bool) -> Result<()> {
    if config::is_initialized(&data_dir) {
        anyhow::bail!(
            "Journal already initialized at {}",
            data_dir.join(CONFIG_FILE).display()
        );
    }

    std::fs::create_dir_all(&data_dir)?;
    let config = RecallConfig::default();
    config.save(&data_dir)?;

    let store_path = config.store_path(&data_dir);
    let store = KvStore::open(&store_path)?;
    let settings = Settings::load(&store)?;
    settings.save(&store)?;

    let mut journal = Journal::open(store)?
        .with_max_memories(settings.max_memories)
        .with_id_suffix_length(config.journal.id_suffix_length);
    let seeded = if samples { journal.seed_samples()? } else { 0 };

    tracing::info!(path = %data_dir.display(), seeded, "Initialized journal");

    if json {
        print_json(&serde_json::json!({
            "action": "initialized",
            "data_dir": data_dir,
            "store": store_path,
            "samples": seeded
        }))?;
    } else {
        println!(
            "{} recall journal in {}",
            "Initialized".green(),
            data_dir.display()
        );
        println!("  Config: {}", data_dir.join(CONFIG_FILE).display());
        println!("  Store:  {}", store_path.display());
        if seeded > 0 {
            println!("  Added {} sample memories", seeded);
        }
    }
    Ok(())
}
