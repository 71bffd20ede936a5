//! # Recall - a local-first personal memory journal
//!
//! Recall keeps short memories (notes, photos, voice clips, places, documents)
//! in a key-value store on disk, classifies them as they are added, and lets
//! an LLM assistant answer questions about them. Without an API key or network
//! the assistant answers from the journal itself.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create the journal
//! recall init --samples
//!
//! # Remember something
//! recall add "Lunch with Mina at the harbour" --tag food -i 7
//!
//! # Find it again
//! recall find "this week"
//! recall search tag:food
//!
//! # Ask about it
//! recall chat "what did I eat this week?"
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: `recall.toml` and data directory resolution
//! - [`error`]: Error types and result aliases
//! - [`model`]: Data models (Memory, MemoryKind, ImportanceLevel, MemoryClass)
//! - [`storage`]: Key-value store, journal and settings
//! - [`index`]: Classification index over the journal
//! - [`search`]: Simple, field, regex and natural-language search
//! - [`stats`]: Journal statistics
//! - [`transfer`]: Export, import and backups
//! - [`assistant`]: LLM client, chat history and offline fallbacks

/// LLM assistant with local fallbacks.
pub mod assistant;

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `recall.toml` and locating the data directory.
pub mod config;

/// Error types and result aliases.
///
/// Defines `RecallError`, `AssistantError` and the `Result<T>` alias.
pub mod error;

pub mod index;
pub mod logging;

/// Data models for recall.
pub mod model;

pub mod search;
pub mod stats;

/// Key-value storage layer.
///
/// One JSON file per key, written atomically.
pub mod storage;

/// Import, export and backup.
pub mod transfer;

/// Input validation utilities.
///
/// Validates content, IDs, tags and importance to prevent invalid data.
pub mod validation;
