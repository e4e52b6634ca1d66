//! Raw tag attribute maps and best-available value extraction.
//!
//! A tag reader hands over every attribute it found as a
//! [`RawAttributeMap`]. This module picks scalar text out of it:
//!
//! - [`resolve_tag`] - first non-empty value among prioritized fixed keys
//! - [`resolve_freeform`] - heuristic lookup of free-form (`----:...`) keys
//!   by suffix hint
//!
//! Neither function mutates the map or fails; missing data is `None`.
//!
//! # Example
//!
//! ```
//! use bookshelf_core::tags::{RawAttributeMap, RawValue, keys, resolve_freeform, resolve_tag};
//!
//! let mut map = RawAttributeMap::new();
//! map.insert(keys::KEY_SERIES_VENDOR, vec![RawValue::text("  ")]);
//! map.insert("----:com.apple.iTunes:SERIES", vec![RawValue::bytes(b"Mistborn")]);
//!
//! assert_eq!(resolve_tag(&map, &[keys::KEY_SERIES_VENDOR]), None);
//! assert_eq!(
//!     resolve_freeform(&map, &["series"]).as_deref(),
//!     Some("Mistborn")
//! );
//! ```

mod decode;
pub mod keys;

pub use decode::{DEFAULT_ENCODINGS, TextEncoding, decode_bytes, decode_bytes_with};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One raw attribute value as produced by a tag reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawValue {
    /// Already-decoded text.
    Text(String),
    /// Undecoded payload (free-form atoms carry these).
    Bytes(Vec<u8>),
    /// Small integer tuple such as `(track, total)`.
    Ints(Vec<i64>),
}

impl RawValue {
    /// Creates a text value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates a byte value.
    #[must_use]
    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(value.into())
    }

    /// Decodes the value to trimmed text.
    ///
    /// Integer tuples yield their first element; an empty tuple yields `None`.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.trim().to_string()),
            Self::Bytes(bytes) => Some(decode_bytes(bytes)),
            Self::Ints(values) => values.first().map(ToString::to_string),
        }
    }
}

/// Attribute key to raw values, exactly as supplied by the tag reader.
///
/// Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAttributeMap {
    entries: HashMap<String, Vec<RawValue>>,
}

impl RawAttributeMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) the values stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<RawValue>) {
        self.entries.insert(key.into(), values);
    }

    /// Returns the values stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[RawValue]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Iterates over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RawValue])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<RawValue>)> for RawAttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, Vec<RawValue>)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, values)| (key.into(), values))
                .collect(),
        }
    }
}

/// Suffix hints used to find series data in free-form keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeformHints {
    /// Hints for the series name.
    pub series: Vec<String>,
    /// Hints for the series index.
    pub index: Vec<String>,
}

impl Default for FreeformHints {
    fn default() -> Self {
        Self {
            series: keys::DEFAULT_SERIES_HINTS.map(String::from).to_vec(),
            index: keys::DEFAULT_INDEX_HINTS.map(String::from).to_vec(),
        }
    }
}

/// Returns the first non-empty value among `keys`, tried in order.
///
/// Only the first value stored under a key is considered.
#[must_use]
pub fn resolve_tag(map: &RawAttributeMap, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        map.get(key)
            .and_then(<[RawValue]>::first)
            .and_then(RawValue::to_text)
            .filter(|text| !text.is_empty())
    })
}

/// Looks up a free-form key whose suffix ends with any of `hints`.
///
/// The suffix is the text after the last `:` of a key starting with
/// [`keys::FREEFORM_PREFIX`]; matching is case-insensitive. All values of
/// the matched key are decoded and joined with `", "`, empty pieces dropped.
/// If several keys match, which one wins is unspecified.
#[must_use]
pub fn resolve_freeform<S: AsRef<str>>(map: &RawAttributeMap, hints: &[S]) -> Option<String> {
    let hints: Vec<String> = hints
        .iter()
        .map(|hint| hint.as_ref().to_lowercase())
        .filter(|hint| !hint.is_empty())
        .collect();
    if hints.is_empty() {
        return None;
    }

    for (key, values) in map.iter() {
        if !key.starts_with(keys::FREEFORM_PREFIX) {
            continue;
        }
        let suffix = key.rsplit(':').next().unwrap_or(key).to_lowercase();
        if !hints.iter().any(|hint| suffix.ends_with(hint.as_str())) {
            continue;
        }

        let joined = values
            .iter()
            .filter_map(RawValue::to_text)
            .filter(|piece| !piece.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if !joined.is_empty() {
            return Some(joined);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(entries: Vec<(&str, Vec<RawValue>)>) -> RawAttributeMap {
        entries.into_iter().collect()
    }

    #[test]
    fn test_resolve_tag_uses_first_present_key() {
        let map = map_of(vec![
            ("SRNM", vec![RawValue::text("The Expanse")]),
            ("alt", vec![RawValue::text("Other")]),
        ]);
        assert_eq!(
            resolve_tag(&map, &["missing", "SRNM", "alt"]).as_deref(),
            Some("The Expanse")
        );
    }

    #[test]
    fn test_resolve_tag_skips_empty_values() {
        let map = map_of(vec![
            ("a", vec![]),
            ("b", vec![RawValue::text("   ")]),
            ("c", vec![RawValue::text(" Dune ")]),
        ]);
        assert_eq!(resolve_tag(&map, &["a", "b", "c"]).as_deref(), Some("Dune"));
        assert_eq!(resolve_tag(&map, &["a", "b"]), None);
        assert_eq!(resolve_tag(&map, &[]), None);
    }

    #[test]
    fn test_resolve_tag_only_reads_first_value() {
        let map = map_of(vec![(
            "k",
            vec![RawValue::text("first"), RawValue::text("second")],
        )]);
        assert_eq!(resolve_tag(&map, &["k"]).as_deref(), Some("first"));
    }

    #[test]
    fn test_resolve_tag_decodes_bytes_and_ints() {
        let map = map_of(vec![
            ("bytes", vec![RawValue::bytes(b"  Hyperion ".to_vec())]),
            ("ints", vec![RawValue::Ints(vec![3, 12])]),
            ("empty_ints", vec![RawValue::Ints(vec![])]),
        ]);
        assert_eq!(resolve_tag(&map, &["bytes"]).as_deref(), Some("Hyperion"));
        assert_eq!(resolve_tag(&map, &["ints"]).as_deref(), Some("3"));
        assert_eq!(resolve_tag(&map, &["empty_ints"]), None);
    }

    #[test]
    fn test_resolve_freeform_matches_suffix_case_insensitively() {
        let map = map_of(vec![(
            "----:com.apple.iTunes:BOOK SERIES",
            vec![RawValue::bytes(b"Discworld".to_vec())],
        )]);
        assert_eq!(
            resolve_freeform(&map, &["series"]).as_deref(),
            Some("Discworld")
        );
    }

    #[test]
    fn test_resolve_freeform_joins_multiple_values() {
        let map = map_of(vec![(
            "----:com.apple.iTunes:series",
            vec![
                RawValue::bytes(b"Cosmere".to_vec()),
                RawValue::text(""),
                RawValue::text("Mistborn"),
            ],
        )]);
        assert_eq!(
            resolve_freeform(&map, &["series"]).as_deref(),
            Some("Cosmere, Mistborn")
        );
    }

    #[test]
    fn test_resolve_freeform_ignores_non_freeform_keys() {
        let map = map_of(vec![("series", vec![RawValue::text("Not free-form")])]);
        assert_eq!(resolve_freeform(&map, &["series"]), None);
    }

    #[test]
    fn test_resolve_freeform_requires_suffix_match_not_prefix() {
        let map = map_of(vec![(
            "----:com.apple.iTunes:series_index",
            vec![RawValue::text("4")],
        )]);
        assert_eq!(resolve_freeform(&map, &["series"]), None);
        assert_eq!(
            resolve_freeform(&map, &["series_index"]).as_deref(),
            Some("4")
        );
    }

    #[test]
    fn test_resolve_freeform_skips_entries_with_only_empty_values() {
        let map = map_of(vec![(
            "----:com.apple.iTunes:series",
            vec![RawValue::text(" "), RawValue::bytes(Vec::new())],
        )]);
        assert_eq!(resolve_freeform(&map, &["series"]), None);
    }

    #[test]
    fn test_resolve_freeform_empty_hints_never_match() {
        let map = map_of(vec![("----:x:series", vec![RawValue::text("S")])]);
        assert_eq!(resolve_freeform::<&str>(&map, &[]), None);
        assert_eq!(resolve_freeform(&map, &[""]), None);
    }

    #[test]
    fn test_raw_value_json_shape() {
        let map = map_of(vec![("SRSQ", vec![RawValue::text("2")])]);
        let json = serde_json::to_string(&map).unwrap_or_default();
        assert_eq!(json, r#"{"SRSQ":[{"text":"2"}]}"#);

        let parsed: RawAttributeMap =
            serde_json::from_str(r#"{"k":[{"bytes":[65,66]},{"ints":[1,2]}]}"#)
                .unwrap_or_default();
        assert_eq!(resolve_tag(&parsed, &["k"]).as_deref(), Some("AB"));
    }

    #[test]
    fn test_freeform_hints_default_lists() {
        let hints = FreeformHints::default();
        assert!(hints.series.iter().any(|h| h == "series"));
        assert!(hints.index.iter().any(|h| h == "series_index"));
    }
}
