//! Data models for recall.
//!
//! - [`Memory`]: a single journaled entry
//! - [`MemoryKind`]: text, voice, photo, video, location, document
//! - [`ImportanceLevel`]: bucket of the 1-10 importance score
//! - [`MemoryClass`]: topical class derived from tags and content

mod memory;
mod types;

pub use memory::{DEFAULT_IMPORTANCE, GeoPoint, MediaRef, Memory, generate_id};
pub use types::{ImportanceLevel, MemoryClass, MemoryKind};
