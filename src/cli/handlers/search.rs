use crate::assistant::Assistant;
use crate::cli::commands::{KindArg, SortArg};
use crate::search::{SearchFilters, SearchQuery, SmartSearchOptions, smart_search};
use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;

use super::CommandContext;
use super::utils::{print_json, print_memory_list};

pub fn handle_search(ctx: &CommandContext, query: String, ai: bool, json: bool) -> Result<()> {
    let parsed = SearchQuery::parse(&query).map_err(|e| anyhow::anyhow!(e))?;
    let results = parsed.run(ctx.journal.list());

    let reply = if ai {
        let mut assistant =
            Assistant::from_env(ctx.store().clone(), ctx.config.assistant.clone())
                .context("Failed to set up the assistant")?;
        Some(assistant.search(&query, &results)?)
    } else {
        None
    };

    if json {
        print_json(&serde_json::json!({
            "query": query,
            "count": results.len(),
            "memories": results,
            "assistant": reply
        }))?;
    } else {
        println!("Found {} results for '{}':\n", results.len(), query);
        print_memory_list(results.iter().copied());
        if let Some(reply) = reply {
            println!();
            if reply.offline {
                println!("{}", reply.text.dimmed());
            } else {
                println!("{}", reply.text);
            }
        }
    }
    Ok(())
}

/// Parameters for find operation
pub struct FindParams {
    pub query: String,
    pub sort: SortArg,
    pub r#type: Option<KindArg>,
    pub min_importance: Option<u8>,
    pub limit: Option<usize>,
    pub json: bool,
}

pub fn handle_find(ctx: &CommandContext, params: FindParams) -> Result<()> {
    let options = SmartSearchOptions {
        filters: SearchFilters {
            kind: params.r#type.map(Into::into),
            min_importance: params.min_importance,
            ..Default::default()
        },
        sort_by: params.sort.into(),
        limit: params.limit,
    };
    let results = smart_search(
        &params.query,
        &options,
        ctx.journal.list(),
        &ctx.index,
        Utc::now(),
    );

    if params.json {
        print_json(&results)?;
    } else {
        println!(
            "Found {} memories for '{}':\n",
            results.len(),
            params.query
        );
        print_memory_list(results.iter().copied());
    }
    Ok(())
}
