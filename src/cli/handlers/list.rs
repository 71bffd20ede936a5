use crate::cli::commands::KindArg;
use crate::search::{SearchFilters, filter_memories, paginate};
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::{print_json, print_memory_list};

/// Parameters for list operation
pub struct ListParams {
    pub r#type: Option<KindArg>,
    pub tag: Option<String>,
    pub query: Option<String>,
    pub date: Option<String>,
    pub min_importance: Option<u8>,
    pub page: usize,
    pub per_page: Option<usize>,
    pub json: bool,
}

pub fn handle_list(ctx: &CommandContext, params: ListParams) -> Result<()> {
    let filters = SearchFilters {
        query: params.query,
        kind: params.r#type.map(Into::into),
        date_prefix: params.date,
        min_importance: params.min_importance,
        tag: params.tag,
    };
    let memories = filter_memories(&filters, ctx.journal.list());
    let per_page = params.per_page.unwrap_or(ctx.config.journal.page_size);
    let page = paginate(&memories, params.page, per_page);

    if params.json {
        print_json(&serde_json::json!({
            "page": page.number,
            "total_pages": page.total_pages,
            "total": page.total_items,
            "memories": page.items
        }))?;
    } else {
        print_memory_list(page.items.iter().copied());
        if page.total_pages > 1 {
            println!(
                "{}",
                format!(
                    "\nPage {} of {} ({} memories)",
                    page.number, page.total_pages, page.total_items
                )
                .dimmed()
            );
        }
    }
    Ok(())
}
