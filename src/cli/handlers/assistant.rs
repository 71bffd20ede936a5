use crate::assistant::{AnalysisSource, Assistant, ChatOptions};
use crate::cli::commands::{HistoryAction, PersonalityArg};
use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;

use super::CommandContext;
use super::utils::print_json;

fn open_assistant(
    ctx: &CommandContext,
) -> Result<Assistant<crate::assistant::AnthropicClient>> {
    Assistant::from_env(ctx.store().clone(), ctx.config.assistant.clone())
        .context("Failed to set up the assistant")
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}

pub fn handle_chat(
    ctx: &CommandContext,
    message: String,
    history: bool,
    personality: Option<PersonalityArg>,
    copy: bool,
    json: bool,
) -> Result<()> {
    let mut assistant = open_assistant(ctx)?;
    let options = ChatOptions {
        personality: personality
            .map(Into::into)
            .unwrap_or(ctx.settings.personality),
        include_history: history,
        max_tokens: None,
    };
    let reply = assistant.chat(&message, &options, ctx.journal.list(), Utc::now())?;

    let copied = if copy {
        match copy_to_clipboard(&reply.text) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Clipboard unavailable");
                eprintln!("{} could not copy to clipboard: {}", "Warning:".yellow(), e);
                false
            }
        }
    } else {
        false
    };

    if json {
        let mut value = serde_json::to_value(&reply)?;
        value["copied"] = serde_json::Value::Bool(copied);
        print_json(&value)?;
    } else {
        if let Some(ref reason) = reply.fallback_reason {
            eprintln!("{}", format!("(offline: {})", reason).dimmed());
        }
        println!("{}", reply.text);
        if copied {
            eprintln!("{}", "Copied to clipboard".dimmed());
        }
    }
    Ok(())
}

pub fn handle_analyze(ctx: &CommandContext, id: String, json: bool) -> Result<()> {
    let memory = ctx.journal.get(&id)?;
    let mut assistant = open_assistant(ctx)?;
    let analysis = assistant.analyze(memory)?;

    if json {
        print_json(&analysis)?;
        return Ok(());
    }

    println!("{} {}", "Analysis of".bold(), memory.id.cyan());
    println!("Importance: {}", analysis.importance);
    println!("Emotion:    {}", analysis.emotion);
    if !analysis.keywords.is_empty() {
        println!("Keywords:   {}", analysis.keywords.join(", ").magenta());
    }
    println!("Summary:    {}", analysis.summary);
    if !analysis.related.is_empty() {
        println!("Related:    {}", analysis.related.join(", ").cyan());
    }
    if let Some(ref text) = analysis.analysis {
        println!();
        println!("{}", text);
    }
    if analysis.source == AnalysisSource::Offline {
        println!("{}", "\n(computed offline)".dimmed());
    }
    Ok(())
}

pub fn handle_history(ctx: &CommandContext, action: Option<HistoryAction>) -> Result<()> {
    let mut assistant = open_assistant(ctx)?;
    let action = action.unwrap_or(HistoryAction::Show {
        last: None,
        json: false,
    });

    match action {
        HistoryAction::Show { last, json } => {
            let exchanges = assistant.conversation().exchanges();
            let start = last.map_or(0, |n| exchanges.len().saturating_sub(n));
            let shown = &exchanges[start..];
            if json {
                print_json(shown)?;
            } else if shown.is_empty() {
                println!("No conversations yet.");
            } else {
                for exchange in shown {
                    println!(
                        "{}",
                        exchange
                            .timestamp
                            .format("%Y-%m-%d %H:%M")
                            .to_string()
                            .dimmed()
                    );
                    println!("{} {}", "you:".cyan().bold(), exchange.user);
                    println!("{} {}", "recall:".green().bold(), exchange.assistant);
                    println!();
                }
            }
        }
        HistoryAction::Clear => {
            let count = assistant.conversation_mut().clear()?;
            println!("{} {} exchanges", "Cleared".red(), count);
        }
        HistoryAction::Usage { json } => {
            let usage = assistant.conversation().usage(Utc::now());
            if json {
                print_json(&usage)?;
            } else {
                println!("Conversations: {}", usage.total_conversations);
                println!("Today:         {}", usage.today);
                match usage.last_used {
                    Some(at) => println!("Last used:     {}", at.format("%Y-%m-%d %H:%M")),
                    None => println!("Last used:     {}", "never".dimmed()),
                }
            }
        }
    }
    Ok(())
}
