use crate::model::{ImportanceLevel, Memory};
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Read, Write};
use std::path::Path;

const LIST_PREVIEW_CHARS: usize = 70;

/// Resolve memory content from CLI arg, file, or stdin
pub fn resolve_content(content: Option<String>, body_file: Option<String>) -> Result<Option<String>> {
    if let Some(c) = content {
        if c == "-" {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            return Ok(Some(input.trim().to_string()));
        }
        return Ok(Some(c));
    }
    if let Some(path_str) = body_file {
        validate_body_file_path(&path_str)?;

        let text = std::fs::read_to_string(&path_str)
            .with_context(|| format!("Failed to read content from {}", path_str))?;
        return Ok(Some(text.trim().to_string()));
    }
    Ok(None)
}

/// Body files must be relative paths inside the current directory tree.
fn validate_body_file_path(path_str: &str) -> Result<()> {
    use std::path::Component;

    let path = Path::new(path_str);
    if path.is_absolute() {
        anyhow::bail!(
            "Absolute paths are not allowed for --body-file. Use relative paths only.\n\
             Attempted path: {}",
            path_str
        );
    }
    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir))
    {
        anyhow::bail!(
            "Path traversal (..) is not allowed in --body-file paths.\n\
             Attempted path: {}",
            path_str
        );
    }

    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let full_path = current_dir.join(path);
    if !full_path.exists() {
        anyhow::bail!("Body file does not exist: {}", path_str);
    }

    let canonical_path = full_path
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", path_str))?;
    let canonical_current = current_dir
        .canonicalize()
        .context("Failed to canonicalize current directory")?;
    if !canonical_path.starts_with(&canonical_current) {
        anyhow::bail!(
            "Body file must be within the current directory tree.\n\
             Attempted to access: {}",
            canonical_path.display()
        );
    }
    Ok(())
}

/// MIME type from the file extension of an attachment.
pub fn guess_mime(path: &str) -> Option<String> {
    let ext = Path::new(path).extension()?.to_str()?.to_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "webm" => "video/webm",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        _ => return None,
    };
    Some(mime.to_string())
}

/// Ask a yes/no question on stdin; anything but `y` is a no.
pub fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Format importance with color coding
pub fn format_importance(importance: u8) -> colored::ColoredString {
    let label = format!("{} ({})", importance, ImportanceLevel::from_score(importance));
    match ImportanceLevel::from_score(importance) {
        ImportanceLevel::Critical => label.red().bold(),
        ImportanceLevel::High => label.red(),
        ImportanceLevel::Medium => label.white(),
        ImportanceLevel::Low => label.dimmed(),
        ImportanceLevel::Minimal => label.dimmed(),
    }
}

fn format_stars(importance: u8) -> colored::ColoredString {
    let stars = match ImportanceLevel::from_score(importance) {
        ImportanceLevel::Critical => "***",
        ImportanceLevel::High => "** ",
        ImportanceLevel::Medium => "*  ",
        _ => "   ",
    };
    stars.yellow()
}

/// Print a single memory with details
pub fn print_memory(memory: &Memory) {
    println!(
        "{} {} {}",
        memory.id.cyan().bold(),
        memory.kind.emoji(),
        memory.kind.to_string().blue()
    );
    println!("Importance: {}", format_importance(memory.importance));
    if !memory.tags.is_empty() {
        println!("Tags:       {}", memory.tags.join(", ").magenta());
    }
    if let Some(ref person) = memory.person {
        println!("Person:     {}", person);
    }
    if let Some(ref location) = memory.location {
        let mut place = format!("{:.5}, {:.5}", location.latitude, location.longitude);
        if let Some(ref address) = location.address {
            place = format!("{} ({})", address, place);
        }
        println!("Location:   {}", place);
    }
    if let Some(ref media) = memory.media {
        match media.mime {
            Some(ref mime) => println!("Media:      {} [{}]", media.path, mime.dimmed()),
            None => println!("Media:      {}", media.path),
        }
    }
    println!(
        "Created:    {}",
        memory.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed()
    );
    if let Some(updated) = memory.updated {
        println!(
            "Updated:    {}",
            updated.format("%Y-%m-%d %H:%M").to_string().dimmed()
        );
    }

    println!();
    println!("{}", memory.content);
    if let Some(transcript) = memory.media.as_ref().and_then(|m| m.transcript.as_ref()) {
        println!();
        println!("{}", transcript.italic());
    }
}

/// Print a list of memories (compact format)
pub fn print_memory_list<'a>(memories: impl IntoIterator<Item = &'a Memory>) {
    let mut printed = 0;
    for memory in memories {
        println!(
            "{} {} {} [{}] {}",
            memory.id.cyan(),
            memory.timestamp.format("%Y-%m-%d").to_string().dimmed(),
            format_stars(memory.importance),
            memory.kind.to_string().blue(),
            memory.preview(LIST_PREVIEW_CHARS).replace('\n', " ")
        );
        printed += 1;
    }
    if printed == 0 {
        println!("No memories found.");
    }
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
