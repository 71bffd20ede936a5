use crate::cli::commands::FormatArg;
use crate::index::ClassificationIndex;
use crate::storage::{KEY_CHAT_HISTORY, Settings};
use crate::transfer::{
    self, ExportBundle, ExportFormat, ImportMode, export_bundle, export_memories, import_bundle,
    parse_import,
};
use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use std::path::PathBuf;

use super::CommandContext;
use super::utils::print_json;

const BACKUP_DIR: &str = "backups";

pub fn handle_export(
    ctx: &CommandContext,
    output: Option<PathBuf>,
    format: FormatArg,
    bundle: bool,
) -> Result<()> {
    let format: ExportFormat = format.into();
    let content = if bundle {
        let history = ctx.store().get(KEY_CHAT_HISTORY)?.unwrap_or_default();
        let bundle = ExportBundle::new(ctx.journal.list().to_vec(), Utc::now())
            .with_settings(ctx.settings.clone())
            .with_chat_history(history);
        export_bundle(&bundle, format)?
    } else {
        export_memories(ctx.journal.list(), format)?
    };

    if let Some(path) = output {
        std::fs::write(&path, &content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!(
            "{} {} memories to {}",
            "Exported".green(),
            ctx.journal.len(),
            path.display()
        );
    } else {
        print!("{}", content);
        if !content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

pub fn handle_import(ctx: &mut CommandContext, file: PathBuf, replace: bool, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let bundle = parse_import(&content)?;
    let mode = if replace {
        ImportMode::Replace
    } else {
        ImportMode::Merge
    };

    let summary = import_bundle(&mut ctx.journal, bundle, mode, Utc::now())?;
    ctx.index = ClassificationIndex::build(ctx.journal.list());
    if summary.settings_restored {
        ctx.settings = Settings::load(ctx.store())?;
    }

    if json {
        print_json(&summary)?;
    } else {
        println!(
            "{} {} memories from {}",
            "Imported".green(),
            summary.imported,
            file.display()
        );
        if summary.skipped > 0 {
            println!("  Skipped {} already present", summary.skipped);
        }
        if summary.settings_restored {
            println!("  Restored settings");
        }
        if summary.history_restored {
            println!("  Restored chat history");
        }
    }
    Ok(())
}

pub fn handle_backup(ctx: &CommandContext, output: Option<PathBuf>, json: bool) -> Result<()> {
    let dir = output.unwrap_or_else(|| ctx.data_dir.join(BACKUP_DIR));
    let path = transfer::write_backup(&ctx.journal, &ctx.settings, &dir, Utc::now())?;

    if json {
        print_json(&serde_json::json!({
            "action": "backup",
            "path": path,
            "memories": ctx.journal.len()
        }))?;
    } else {
        println!(
            "{} {} memories to {}",
            "Backed up".green(),
            ctx.journal.len(),
            path.display()
        );
    }
    Ok(())
}

/// Write a backup after a change when the configured interval has passed.
pub fn run_auto_backup(ctx: &CommandContext) {
    let now = Utc::now();
    match transfer::backup_due(&ctx.journal, ctx.settings.auto_backup, now) {
        Ok(false) => {}
        Ok(true) => {
            let dir = ctx.data_dir.join(BACKUP_DIR);
            if let Err(e) = transfer::write_backup(&ctx.journal, &ctx.settings, &dir, now) {
                tracing::warn!(error = %e, "Automatic backup failed");
            }
        }
        Err(e) => tracing::warn!(error = %e, "Could not check backup schedule"),
    }
}
