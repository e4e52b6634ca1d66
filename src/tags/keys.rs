//! Well-known attribute keys produced by MP4/M4B tag readers.

/// Title atom.
pub const KEY_TITLE: &str = "\u{a9}nam";
/// Author(s) atom.
pub const KEY_AUTHOR: &str = "\u{a9}ART";
/// Narrator atom (the writer slot in audiobook files).
pub const KEY_NARRATOR: &str = "\u{a9}wrt";
/// Year/date atom.
pub const KEY_YEAR: &str = "\u{a9}day";
/// Genre atom.
pub const KEY_GENRE: &str = "\u{a9}gen";

/// Vendor series name atom.
pub const KEY_SERIES_VENDOR: &str = "SRNM";
/// Vendor series sequence atom (e.g. `2.1`).
pub const KEY_INDEX_VENDOR: &str = "SRSQ";

/// Prefix of free-form keys (`----:com.apple.iTunes:<name>`).
pub const FREEFORM_PREFIX: &str = "----";

/// Default suffix hints for a free-form series name.
pub const DEFAULT_SERIES_HINTS: [&str; 3] = ["series", "book series", "seriesname"];

/// Default suffix hints for a free-form series index.
pub const DEFAULT_INDEX_HINTS: [&str; 5] = [
    "series index",
    "series_index",
    "seriessequence",
    "series number",
    "series_no",
];
