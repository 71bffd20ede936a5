use crate::cli::commands::KindArg;
use crate::model::{GeoPoint, MediaRef, Memory};
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::{guess_mime, print_json, resolve_content};

/// Parameters for add operation
pub struct AddParams {
    pub content: Option<String>,
    pub r#type: KindArg,
    pub tag: Vec<String>,
    pub importance: Option<u8>,
    pub person: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub address: Option<String>,
    pub media: Option<String>,
    pub body_file: Option<String>,
    pub json: bool,
}

pub fn handle_add(ctx: &mut CommandContext, params: AddParams) -> Result<()> {
    let Some(content) = resolve_content(params.content, params.body_file)? else {
        anyhow::bail!("Nothing to remember: pass content or --body-file");
    };

    let mut tags: Vec<String> = Vec::new();
    for t in params.tag {
        if !tags.contains(&t) {
            tags.push(t);
        }
    }

    let location = match (params.lat, params.lon) {
        (Some(latitude), Some(longitude)) => Some(GeoPoint {
            latitude,
            longitude,
            accuracy: None,
            address: params.address,
        }),
        _ => None,
    };
    let media = params.media.map(|path| MediaRef {
        mime: guess_mime(&path),
        path,
        duration_secs: None,
        transcript: None,
    });

    let memory = Memory::new(ctx.journal.generate_id(), params.r#type.into(), content)
        .with_tags(tags)
        .with_importance(
            params
                .importance
                .unwrap_or(ctx.config.journal.default_importance),
        )
        .with_person(params.person)
        .with_location(location)
        .with_media(media);

    let memory = ctx.journal.add(memory)?;
    ctx.index.insert(memory);

    if params.json {
        print_json(memory)?;
    } else {
        println!(
            "{} {} [{}] {}",
            "Remembered".green(),
            memory.id.cyan(),
            memory.kind.to_string().blue(),
            memory.preview(60)
        );
    }
    Ok(())
}
