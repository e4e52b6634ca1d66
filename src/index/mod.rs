//! Series index normalization and numeric sort keys.
//!
//! Series positions arrive in many shapes: `3`, `2.5`, `1-3`, `IV`,
//! `twenty-one`, or free labels like `Prequel`. This module maps them onto
//! one display form and a float used only for ordering.
//!
//! # Example
//!
//! ```
//! use bookshelf_core::index::{normalize_index, sort_key_for_index};
//!
//! assert_eq!(normalize_index("IV"), "4");
//! assert_eq!(normalize_index("1 – 3"), "1-3");
//! assert_eq!(sort_key_for_index("1-3"), Some(1.0));
//! assert_eq!(normalize_index("Prequel"), "Prequel");
//! ```

mod roman;
mod words;

pub use roman::roman_to_int;
pub use words::word_to_int;

use std::sync::LazyLock;

use regex::Regex;

/// Two numbers joined by a hyphen, en dash, or em dash.
#[allow(clippy::expect_used)]
static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9]+(?:\.[0-9]+)?)\s*[-–—]\s*([0-9]+(?:\.[0-9]+)?)\s*$")
        .expect("index range regex is valid") // Static pattern, safe to panic
});

/// A bare integer or decimal.
#[allow(clippy::expect_used)]
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").expect("index number regex is valid") // Static pattern, safe to panic
});

/// Normalizes a raw index token into its canonical display form.
///
/// Precedence: range (`N-M`, canonical hyphen), integer/decimal as-is,
/// Roman numeral, English number word. Anything else is returned trimmed
/// but otherwise unchanged; such labels are valid indexes, not errors.
///
/// Empty or whitespace-only input yields an empty string.
#[must_use]
pub fn normalize_index(token: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Some(captures) = RANGE_PATTERN.captures(trimmed) {
        return format!("{}-{}", &captures[1], &captures[2]);
    }
    if NUMBER_PATTERN.is_match(trimmed) {
        return trimmed.to_string();
    }
    if let Some(value) = roman_to_int(trimmed) {
        return value.to_string();
    }
    if let Some(value) = word_to_int(trimmed) {
        return value.to_string();
    }
    trimmed.to_string()
}

/// Returns the numeric sort key for a display index.
///
/// Mirrors [`normalize_index`] precedence; ranges sort by their first bound.
/// Returns `None` when the value has no numeric reading.
#[must_use]
pub fn sort_key_for_index(display: &str) -> Option<f64> {
    let trimmed = display.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(captures) = RANGE_PATTERN.captures(trimmed) {
        return captures[1].parse::<f64>().ok();
    }
    if NUMBER_PATTERN.is_match(trimmed) {
        return trimmed.parse::<f64>().ok();
    }
    if let Some(value) = roman_to_int(trimmed) {
        #[allow(clippy::cast_precision_loss)]
        let key = value as f64;
        return Some(key);
    }
    word_to_int(trimmed).map(f64::from)
}

/// Returns true if a display index has a numeric reading.
#[must_use]
pub fn is_numeric_index(display: &str) -> bool {
    sort_key_for_index(display).is_some()
}
