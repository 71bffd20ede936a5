//! Input validation for memory records.

use crate::error::{RecallError, Result};
use crate::model::GeoPoint;

/// Maximum allowed length for memory content.
pub const MAX_CONTENT_LENGTH: usize = 50_000;

/// Maximum allowed length for a memory ID.
pub const MAX_ID_LENGTH: usize = 64;

/// Maximum allowed length for a tag.
pub const MAX_TAG_LENGTH: usize = 50;

/// Valid importance range, inclusive.
pub const IMPORTANCE_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// Valid latitude range in degrees, inclusive.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees, inclusive.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Characters forbidden in IDs and store keys to prevent path traversal.
const FORBIDDEN_ID_CHARS: &[char] = &['/', '\\', '\0', ':'];

/// Validates memory content.
pub fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(RecallError::Validation(
            "Content cannot be empty".to_string(),
        ));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(RecallError::Validation(format!(
            "Content exceeds maximum length of {} characters",
            MAX_CONTENT_LENGTH
        )));
    }
    Ok(())
}

/// Validates a memory ID or store key.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(RecallError::Validation("ID cannot be empty".to_string()));
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(RecallError::Validation(format!(
            "ID exceeds maximum length of {} characters",
            MAX_ID_LENGTH
        )));
    }
    if id.contains("..") {
        return Err(RecallError::Validation(
            "ID cannot contain '..' (path traversal)".to_string(),
        ));
    }
    for c in FORBIDDEN_ID_CHARS {
        if id.contains(*c) {
            return Err(RecallError::Validation(format!(
                "ID cannot contain '{}'",
                c.escape_default()
            )));
        }
    }
    Ok(())
}

/// Validates a tag name.
pub fn validate_tag(tag: &str) -> Result<()> {
    if tag.trim().is_empty() {
        return Err(RecallError::Validation("Tag cannot be empty".to_string()));
    }
    if tag.chars().count() > MAX_TAG_LENGTH {
        return Err(RecallError::Validation(format!(
            "Tag exceeds maximum length of {} characters",
            MAX_TAG_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_importance(importance: u8) -> Result<()> {
    if !IMPORTANCE_RANGE.contains(&importance) {
        return Err(RecallError::Validation(format!(
            "Importance must be between {} and {}, got {}",
            IMPORTANCE_RANGE.start(),
            IMPORTANCE_RANGE.end(),
            importance
        )));
    }
    Ok(())
}

/// Coordinates must be finite and on the globe; JSON has no NaN or infinity.
pub fn validate_location(location: &GeoPoint) -> Result<()> {
    if !LATITUDE_RANGE.contains(&location.latitude) {
        return Err(RecallError::Validation(format!(
            "Latitude must be between {} and {}, got {}",
            LATITUDE_RANGE.start(),
            LATITUDE_RANGE.end(),
            location.latitude
        )));
    }
    if !LONGITUDE_RANGE.contains(&location.longitude) {
        return Err(RecallError::Validation(format!(
            "Longitude must be between {} and {}, got {}",
            LONGITUDE_RANGE.start(),
            LONGITUDE_RANGE.end(),
            location.longitude
        )));
    }
    if let Some(accuracy) = location.accuracy {
        if !accuracy.is_finite() || accuracy < 0.0 {
            return Err(RecallError::Validation(format!(
                "Location accuracy must be a non-negative number, got {}",
                accuracy
            )));
        }
    }
    Ok(())
}
