use crate::cli::commands::KindArg;
use crate::model::GeoPoint;
use crate::storage::MemoryPatch;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::print_json;

/// Parameters for edit operation
pub struct EditParams {
    pub id: String,
    pub content: Option<String>,
    pub r#type: Option<KindArg>,
    pub importance: Option<u8>,
    pub add_tag: Vec<String>,
    pub remove_tag: Vec<String>,
    pub person: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub address: Option<String>,
    pub json: bool,
}

pub fn handle_edit(ctx: &mut CommandContext, params: EditParams) -> Result<()> {
    let location = match (params.lat, params.lon) {
        (Some(latitude), Some(longitude)) => Some(GeoPoint {
            latitude,
            longitude,
            accuracy: None,
            address: params.address,
        }),
        _ => None,
    };
    let patch = MemoryPatch {
        content: params.content,
        kind: params.r#type.map(Into::into),
        importance: params.importance,
        add_tags: params.add_tag,
        remove_tags: params.remove_tag,
        person: params.person,
        location,
    };
    if patch.is_empty() {
        anyhow::bail!("Nothing to change. Pass at least one field to edit.");
    }

    let memory = ctx.journal.update(&params.id, patch)?;
    ctx.index.update(memory);

    if params.json {
        print_json(memory)?;
    } else {
        println!("{} {}", "Updated".green(), memory.id.cyan());
    }
    Ok(())
}
