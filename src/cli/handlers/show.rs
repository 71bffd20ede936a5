use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::{print_json, print_memory};

pub fn handle_show(ctx: &CommandContext, id: String, json: bool) -> Result<()> {
    let memory = ctx.journal.get(&id)?;

    if json {
        print_json(memory)?;
    } else {
        print_memory(memory);
        println!();
        println!(
            "{} {}",
            "Class:".dimmed(),
            crate::index::classify(memory).to_string().dimmed()
        );
    }
    Ok(())
}
