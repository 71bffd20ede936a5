use crate::cli::commands::SettingsAction;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;
use super::utils::print_json;

pub fn handle_settings(ctx: &mut CommandContext, action: Option<SettingsAction>) -> Result<()> {
    match action.unwrap_or(SettingsAction::Show { json: false }) {
        SettingsAction::Show { json } => {
            let settings = &ctx.settings;
            if json {
                print_json(settings)?;
            } else {
                println!("language          {}", settings.language);
                println!("personality       {}", settings.personality);
                println!("auto-backup       {}", settings.auto_backup);
                println!("max-memories      {}", settings.max_memories);
                println!("location-tracking {}", settings.location_tracking);
            }
        }
        SettingsAction::Set { key, value } => {
            let mut updated = ctx.settings.clone();
            updated.set(&key, &value)?;
            updated.save(ctx.store())?;
            ctx.settings = updated;
            tracing::info!(key = %key, value = %value, "Changed setting");
            println!("{} {} = {}", "Set".green(), key.cyan(), value);
        }
    }
    Ok(())
}
