use crate::cli::commands::{DimensionArg, KindArg, SortArg};
use crate::index::{ClassificationFilter, Dimension};
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::{print_json, print_memory_list};

/// Parameters for group operation
pub struct GroupParams {
    pub dimension: DimensionArg,
    pub value: Option<String>,
    pub sort: SortArg,
    pub r#type: Option<KindArg>,
    pub min_importance: Option<u8>,
    pub limit: Option<usize>,
    pub json: bool,
}

pub fn handle_group(ctx: &CommandContext, params: GroupParams) -> Result<()> {
    let dimension: Dimension = params.dimension.into();

    let Some(value) = params.value else {
        let counts = ctx.index.counts(dimension);
        if params.json {
            print_json(&counts)?;
        } else if counts.is_empty() {
            println!("No {} groups yet.", dimension);
        } else {
            let width = counts.keys().map(|k| k.chars().count()).max().unwrap_or(0);
            for (key, count) in &counts {
                println!("{:<width$}  {}", key.cyan(), count, width = width);
            }
        }
        return Ok(());
    };

    let filter = ClassificationFilter {
        min_importance: params.min_importance,
        kind: params.r#type.map(Into::into),
        sort_by: params.sort.into(),
        limit: params.limit,
        ..Default::default()
    };
    let results = ctx
        .index
        .search(dimension, &value, &filter, ctx.journal.list());

    if params.json {
        print_json(&results)?;
    } else {
        println!(
            "{} {} = {} ({})\n",
            "Group".bold(),
            dimension,
            value.cyan(),
            results.len()
        );
        print_memory_list(results.iter().copied());
    }
    Ok(())
}
