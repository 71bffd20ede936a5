use crate::error::RecallError;
use anyhow::Result;
use colored::Colorize;
use std::collections::HashSet;

use super::CommandContext;
use super::utils::{confirm, print_json};

pub fn handle_delete(
    ctx: &mut CommandContext,
    mut ids: Vec<String>,
    force: bool,
    json: bool,
) -> Result<()> {
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));

    if let Some(missing) = ids.iter().find(|id| !ctx.journal.contains(id)) {
        return Err(RecallError::NotFound(missing.clone()).into());
    }

    if !force && !json {
        let question = if ids.len() == 1 {
            format!("Delete {} permanently?", ids[0].cyan())
        } else {
            format!("Delete {} memories permanently?", ids.len())
        };
        if !confirm(&question)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let removed = if let [id] = ids.as_slice() {
        ctx.journal.delete(id)?;
        1
    } else {
        ctx.journal.delete_many(&ids)?
    };
    for id in &ids {
        ctx.index.remove(id);
    }

    if json {
        print_json(&serde_json::json!({
            "action": "deleted",
            "ids": ids,
            "count": removed
        }))?;
    } else {
        for id in &ids {
            println!("{} {}", "Deleted".red(), id.cyan());
        }
    }
    Ok(())
}

pub fn handle_clear(ctx: &mut CommandContext, force: bool, json: bool) -> Result<()> {
    if !force {
        anyhow::bail!(
            "This deletes all {} memories. Re-run with --force to confirm.",
            ctx.journal.len()
        );
    }

    let removed = ctx.journal.clear()?;
    ctx.index = crate::index::ClassificationIndex::build(ctx.journal.list());

    if json {
        print_json(&serde_json::json!({
            "action": "cleared",
            "count": removed
        }))?;
    } else {
        println!("{} {} memories", "Cleared".red(), removed);
    }
    Ok(())
}
