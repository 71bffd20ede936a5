use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::print_json;

pub fn handle_index(ctx: &mut CommandContext, optimize: bool, json: bool) -> Result<()> {
    let report = if optimize {
        ctx.index.optimize(ctx.journal.list())
    } else {
        ctx.index.report()
    };

    if json {
        print_json(&report)?;
        return Ok(());
    }

    if optimize {
        println!("{} classification index", "Rebuilt".green());
    }
    println!("Indexed memories: {}", report.total_memories);
    println!();
    println!("{}", "Groups".bold());
    for (dimension, count) in &report.groups {
        println!("  {:<11} {}", dimension.to_string(), count);
    }

    println!();
    println!("{}", "Most active".bold());
    let rows = [
        ("day", &report.most_active.date),
        ("person", &report.most_active.person),
        ("class", &report.most_active.class),
        ("tag", &report.most_active.tag),
    ];
    for (label, group) in rows {
        match group {
            Some(g) => println!("  {:<7} {} ({})", label, g.key.cyan(), g.count),
            None => println!("  {:<7} {}", label, "-".dimmed()),
        }
    }
    Ok(())
}
