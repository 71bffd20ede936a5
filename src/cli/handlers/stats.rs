use crate::stats::{DataStatistics, type_breakdown};
use crate::transfer;
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;

use super::CommandContext;
use super::utils::{print_json, print_memory_list};

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

pub fn handle_stats(ctx: &CommandContext, json: bool) -> Result<()> {
    let now = Utc::now();
    let memories = ctx.journal.list();
    let stats = DataStatistics::compute(memories, &ctx.index, ctx.store(), now)?;
    let backup_due = transfer::backup_due(&ctx.journal, ctx.settings.auto_backup, now)?;

    if json {
        let mut value = serde_json::to_value(&stats)?;
        value["backup_due"] = serde_json::Value::Bool(backup_due);
        print_json(&value)?;
        return Ok(());
    }

    println!("{}", "Journal".bold());
    println!("  Total:      {}", stats.total);
    println!("  Today:      {}", stats.dates.today);
    println!("  This week:  {}", stats.dates.this_week);
    println!("  This month: {}", stats.dates.this_month);

    let breakdown = type_breakdown(memories);
    if !breakdown.is_empty() {
        println!();
        println!("{}", "By type".bold());
        for (kind, count) in breakdown {
            println!("  {} {:<9} {}", kind.emoji(), kind.to_string(), count);
        }
    }

    if !stats.by_class.is_empty() {
        println!();
        println!("{}", "By class".bold());
        for (class, count) in &stats.by_class {
            println!("  {:<14} {}", class, count);
        }
    }

    if !stats.top_tags.is_empty() {
        println!();
        println!("{}", "Top tags".bold());
        for tag in &stats.top_tags {
            println!("  {:<14} {}", tag.tag.magenta(), tag.count);
        }
    }

    println!();
    println!("{}", "Storage".bold());
    println!("  Used:       {}", format_bytes(stats.storage.bytes_used));
    println!("  Per memory: {}", format_bytes(stats.storage.average_bytes));
    match stats.storage.last_backup {
        Some(at) => println!(
            "  Last backup: {}",
            at.format("%Y-%m-%d %H:%M").to_string().dimmed()
        ),
        None => println!("  Last backup: {}", "never".dimmed()),
    }
    if backup_due {
        println!("  {}", "A backup is due. Run 'recall backup'.".yellow());
    }

    if !stats.recent_activity.is_empty() {
        println!();
        println!("{}", "Last 24 hours".bold());
        print_memory_list(&stats.recent_activity);
    }
    Ok(())
}
