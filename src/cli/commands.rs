use crate::index::Dimension;
use crate::model::MemoryKind;
use crate::search::SortBy;
use crate::storage::Personality;
use crate::transfer::ExportFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

fn parse_importance(s: &str) -> Result<u8, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number between 1 and 10", s))?;
    if crate::validation::IMPORTANCE_RANGE.contains(&value) {
        Ok(value)
    } else {
        Err(format!("importance must be between 1 and 10, got {}", value))
    }
}

#[derive(Parser)]
#[command(name = "recall")]
#[command(
    author,
    version,
    about = "A local-first personal memory journal with an optional AI assistant"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (defaults to the platform data directory)
    #[arg(long, global = true, env = "RECALL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file, rotated daily
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the journal in the data directory
    Init {
        /// Add two sample memories to the empty journal
        #[arg(long)]
        samples: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a new memory
    #[command(visible_alias = "a", visible_alias = "new")]
    Add {
        /// What to remember (use '-' to read from stdin)
        #[arg(required_unless_present = "body_file")]
        content: Option<String>,

        /// Kind of memory
        #[arg(short = 't', long, value_enum, default_value = "text")]
        r#type: KindArg,

        /// Tags to add
        #[arg(long)]
        tag: Vec<String>,

        /// Importance from 1 to 10
        #[arg(short, long, value_parser = parse_importance)]
        importance: Option<u8>,

        /// Who the memory is about or from
        #[arg(long)]
        person: Option<String>,

        /// Latitude of where it happened
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude of where it happened
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Human-readable address for the location
        #[arg(long, requires = "lat")]
        address: Option<String>,

        /// Path of an attached photo, recording, video or document
        #[arg(long)]
        media: Option<String>,

        /// Read content from file
        #[arg(long)]
        body_file: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a memory
    Show {
        /// Memory ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List memories, newest first
    #[command(visible_alias = "ls")]
    List {
        /// Filter by kind
        #[arg(short = 't', long, value_enum)]
        r#type: Option<KindArg>,

        /// Filter by tag
        #[arg(long)]
        tag: Option<String>,

        /// Only memories whose text or tags contain this
        #[arg(short, long)]
        query: Option<String>,

        /// Timestamp prefix, e.g. 2024-05 or 2024-05-01
        #[arg(long)]
        date: Option<String>,

        /// Minimum importance
        #[arg(long, value_parser = parse_importance)]
        min_importance: Option<u8>,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Memories per page (defaults to the configured page size)
        #[arg(long)]
        per_page: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a memory
    Edit {
        /// Memory ID
        id: String,

        /// New content
        #[arg(long)]
        content: Option<String>,

        /// New kind
        #[arg(short = 't', long, value_enum)]
        r#type: Option<KindArg>,

        /// New importance
        #[arg(short, long, value_parser = parse_importance)]
        importance: Option<u8>,

        /// Tags to add
        #[arg(long)]
        add_tag: Vec<String>,

        /// Tags to remove
        #[arg(long)]
        remove_tag: Vec<String>,

        /// New person (empty string clears it)
        #[arg(long)]
        person: Option<String>,

        /// New latitude
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// New longitude
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Address for the new location
        #[arg(long, requires = "lat")]
        address: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete memories
    #[command(visible_alias = "rm")]
    Delete {
        /// Memory IDs
        #[arg(required = true)]
        ids: Vec<String>,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete every memory
    Clear {
        /// Required: confirms wiping the journal
        #[arg(short, long)]
        force: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search memories by text (supports tag:, type:, person:, content:, id: and regex:)
    #[command(visible_alias = "s")]
    Search {
        /// Search query
        query: String,

        /// Ask the assistant to rank the results
        #[arg(long)]
        ai: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Natural-language search: dates, importance, kinds or keywords
    Find {
        /// Query such as "last week", "important", "photos" or "jeju beach"
        query: String,

        /// Sort order
        #[arg(long, value_enum, default_value = "date")]
        sort: SortArg,

        /// Filter by kind
        #[arg(short = 't', long, value_enum)]
        r#type: Option<KindArg>,

        /// Minimum importance
        #[arg(long, value_parser = parse_importance)]
        min_importance: Option<u8>,

        /// Maximum number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse the classification index
    Group {
        /// Dimension to group by
        #[arg(value_enum)]
        dimension: DimensionArg,

        /// Group to list; without it, all groups with their sizes
        value: Option<String>,

        /// Sort order for listed memories
        #[arg(long, value_enum, default_value = "date")]
        sort: SortArg,

        /// Filter by kind
        #[arg(short = 't', long, value_enum)]
        r#type: Option<KindArg>,

        /// Minimum importance
        #[arg(long, value_parser = parse_importance)]
        min_importance: Option<u8>,

        /// Maximum number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show journal statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report on the classification index
    Index {
        /// Rebuild the index from scratch first
        #[arg(long)]
        optimize: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export memories to stdout or a file
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: FormatArg,

        /// Include version, export date and settings
        #[arg(long)]
        bundle: bool,
    },

    /// Import memories from an export or backup file
    Import {
        /// File to import (JSON or YAML)
        file: PathBuf,

        /// Replace the whole journal instead of merging
        #[arg(long)]
        replace: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a full backup file
    Backup {
        /// Directory for the backup (defaults to <data-dir>/backups)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Talk to the assistant about your memories
    Chat {
        /// Message for the assistant
        message: String,

        /// Send recent conversation as context
        #[arg(long)]
        history: bool,

        /// Tone of the reply (defaults to the personality setting)
        #[arg(short, long, value_enum)]
        personality: Option<PersonalityArg>,

        /// Copy the reply to the clipboard
        #[arg(long)]
        copy: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Let the assistant analyze a memory
    Analyze {
        /// Memory ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or clear the chat history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Show or change preferences
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Print past exchanges
    Show {
        /// Only the last N exchanges
        #[arg(short = 'n', long)]
        last: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forget the conversation
    Clear,

    /// Usage statistics
    Usage {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print all preferences
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change one preference
    Set {
        /// language, personality, auto-backup, max-memories or location-tracking
        key: String,

        /// New value
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Text,
    Voice,
    Photo,
    Video,
    Location,
    Document,
    Other,
}

impl From<KindArg> for MemoryKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Text => MemoryKind::Text,
            KindArg::Voice => MemoryKind::Voice,
            KindArg::Photo => MemoryKind::Photo,
            KindArg::Video => MemoryKind::Video,
            KindArg::Location => MemoryKind::Location,
            KindArg::Document => MemoryKind::Document,
            KindArg::Other => MemoryKind::Other,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortArg {
    Date,
    Importance,
    Type,
    Person,
    Random,
    None,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortBy::Date,
            SortArg::Importance => SortBy::Importance,
            SortArg::Type => SortBy::Type,
            SortArg::Person => SortBy::Person,
            SortArg::Random => SortBy::Random,
            SortArg::None => SortBy::None,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DimensionArg {
    Date,
    Person,
    Class,
    Importance,
    Tags,
    Type,
}

impl From<DimensionArg> for Dimension {
    fn from(arg: DimensionArg) -> Self {
        match arg {
            DimensionArg::Date => Dimension::Date,
            DimensionArg::Person => Dimension::Person,
            DimensionArg::Class => Dimension::Class,
            DimensionArg::Importance => Dimension::Importance,
            DimensionArg::Tags => Dimension::Tags,
            DimensionArg::Type => Dimension::Type,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Yaml => ExportFormat::Yaml,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PersonalityArg {
    Casual,
    Professional,
    Detailed,
    Concise,
}

impl From<PersonalityArg> for Personality {
    fn from(arg: PersonalityArg) -> Self {
        match arg {
            PersonalityArg::Casual => Personality::Casual,
            PersonalityArg::Professional => Personality::Professional,
            PersonalityArg::Detailed => Personality::Detailed,
            PersonalityArg::Concise => Personality::Concise,
        }
    }
}
