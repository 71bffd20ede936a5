use anyhow::Result;
use clap::Parser;

use recall::cli::handlers::{self, CommandContext};
use recall::cli::{Cli, Commands};
use recall::config::resolve_data_dir;

fn main() -> Result<()> {
    let cli = Cli::parse();
    recall::logging::init(cli.verbose, cli.log_file);

    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    tracing::debug!(data_dir = %data_dir.display(), "Resolved data directory");

    // Every command except init works on an existing journal.
    let open = || CommandContext::open(data_dir.clone());

    match cli.command {
        Commands::Init { samples, json } => {
            handlers::handle_init(data_dir.clone(), samples, json)
        }
        Commands::Add {
            content,
            r#type,
            tag,
            importance,
            person,
            lat,
            lon,
            address,
            media,
            body_file,
            json,
        } => {
            let mut ctx = open()?;
            handlers::handle_add(
                &mut ctx,
                handlers::AddParams {
                    content,
                    r#type,
                    tag,
                    importance,
                    person,
                    lat,
                    lon,
                    address,
                    media,
                    body_file,
                    json,
                },
            )?;
            handlers::run_auto_backup(&ctx);
            Ok(())
        }
        Commands::Show { id, json } => handlers::handle_show(&open()?, id, json),
        Commands::List {
            r#type,
            tag,
            query,
            date,
            min_importance,
            page,
            per_page,
            json,
        } => handlers::handle_list(
            &open()?,
            handlers::ListParams {
                r#type,
                tag,
                query,
                date,
                min_importance,
                page,
                per_page,
                json,
            },
        ),
        Commands::Edit {
            id,
            content,
            r#type,
            importance,
            add_tag,
            remove_tag,
            person,
            lat,
            lon,
            address,
            json,
        } => {
            let mut ctx = open()?;
            handlers::handle_edit(
                &mut ctx,
                handlers::EditParams {
                    id,
                    content,
                    r#type,
                    importance,
                    add_tag,
                    remove_tag,
                    person,
                    lat,
                    lon,
                    address,
                    json,
                },
            )?;
            handlers::run_auto_backup(&ctx);
            Ok(())
        }
        Commands::Delete { ids, force, json } => {
            let mut ctx = open()?;
            handlers::handle_delete(&mut ctx, ids, force, json)?;
            handlers::run_auto_backup(&ctx);
            Ok(())
        }
        Commands::Clear { force, json } => handlers::handle_clear(&mut open()?, force, json),
        Commands::Search { query, ai, json } => handlers::handle_search(&open()?, query, ai, json),
        Commands::Find {
            query,
            sort,
            r#type,
            min_importance,
            limit,
            json,
        } => handlers::handle_find(
            &open()?,
            handlers::FindParams {
                query,
                sort,
                r#type,
                min_importance,
                limit,
                json,
            },
        ),
        Commands::Group {
            dimension,
            value,
            sort,
            r#type,
            min_importance,
            limit,
            json,
        } => handlers::handle_group(
            &open()?,
            handlers::GroupParams {
                dimension,
                value,
                sort,
                r#type,
                min_importance,
                limit,
                json,
            },
        ),
        Commands::Stats { json } => handlers::handle_stats(&open()?, json),
        Commands::Index { optimize, json } => handlers::handle_index(&mut open()?, optimize, json),
        Commands::Export {
            output,
            format,
            bundle,
        } => handlers::handle_export(&open()?, output, format, bundle),
        Commands::Import {
            file,
            replace,
            json,
        } => handlers::handle_import(&mut open()?, file, replace, json),
        Commands::Backup { output, json } => handlers::handle_backup(&open()?, output, json),
        Commands::Chat {
            message,
            history,
            personality,
            copy,
            json,
        } => handlers::handle_chat(&open()?, message, history, personality, copy, json),
        Commands::Analyze { id, json } => handlers::handle_analyze(&open()?, id, json),
        Commands::History { action } => handlers::handle_history(&open()?, action),
        Commands::Settings { action } => handlers::handle_settings(&mut open()?, action),
    }
}
