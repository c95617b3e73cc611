//! Boundary checks for request fields. Each returns `Some(message)` when the
//! value is rejected.

use crate::models::catalog;
use crate::models::selection::MAX_MEMBERS_PRESENT;

pub const TITLE_MAX_LEN: usize = 200;
pub const CONTENT_MAX_LEN: usize = 10_000;
pub const FAMILY_NAME_MAX_LEN: usize = 80;
pub const DESCRIPTION_MAX_LEN: usize = 1_000;

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    if value.trim().chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Base points arrive as a raw JSON number; anything but an integer in range is rejected.
pub fn validate_base_points(value: f64) -> Option<String> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Some("Base points must be a whole number".to_string());
    }
    if value < f64::from(catalog::CUSTOM_MIN_POINTS) || value > f64::from(catalog::CUSTOM_MAX_POINTS) {
        return Some(format!(
            "Base points must be between {} and {}",
            catalog::CUSTOM_MIN_POINTS,
            catalog::CUSTOM_MAX_POINTS
        ));
    }
    None
}

pub fn validate_members_present(value: i64) -> Option<String> {
    if value < 1 || value > i64::from(MAX_MEMBERS_PRESENT) {
        return Some(format!("Members present must be between 1 and {MAX_MEMBERS_PRESENT}"));
    }
    None
}

pub fn validate_family_size(value: i64) -> Option<String> {
    if value < 0 || value > i64::from(u32::MAX) {
        return Some("Family size must be a non-negative count".to_string());
    }
    None
}

pub fn validate_join_code(code: &str) -> Option<String> {
    let trimmed = code.trim();
    if trimmed.len() != 6 || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some("Join code must be 6 letters or digits".to_string());
    }
    None
}
