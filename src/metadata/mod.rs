//! Canonical record assembly.
//!
//! Each item's series data is taken from the most trustworthy source that
//! has it:
//!
//! 1. vendor series atoms (`SRNM` / `SRSQ`)
//! 2. free-form keys matched by suffix hint
//! 3. the title parser, for whichever of series or index is still missing
//!
//! Every index, whatever its source, is normalized before the sort key is
//! derived from it.

mod catalog;
mod duration;

pub use catalog::{CatalogItem, CatalogResolution, ItemFailure, load_catalog_snapshot, resolve_catalog};
pub use duration::{duration_minutes, format_duration};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::index::{normalize_index, sort_key_for_index};
use crate::people::normalize_people_opt;
use crate::tags::{FreeformHints, RawAttributeMap, keys, resolve_freeform, resolve_tag};
use crate::title::TitleParser;

/// One resolved catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalRecord {
    /// Display title.
    pub title: String,
    /// Series name, if the item belongs to one.
    pub series: Option<String>,
    /// Normalized index display (`3`, `2.5`, `1-3`, or a label).
    pub series_index_display: Option<String>,
    /// Ordering key derived from the display value.
    pub series_index_sort: Option<f64>,
    /// Normalized author list.
    pub author: Option<String>,
    /// Normalized narrator list.
    pub narrator: Option<String>,
    /// Year or date text as tagged.
    pub year: Option<String>,
    /// Genre text as tagged.
    pub genre: Option<String>,
    /// Length as `H:MM`, empty when unknown.
    pub duration: String,
}

impl CanonicalRecord {
    /// Trimmed series name, `None` when absent or blank.
    #[must_use]
    pub fn series_name(&self) -> Option<&str> {
        self.series
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Combines tag lookup, title parsing, and normalization into records.
#[derive(Debug, Default)]
pub struct MetadataResolver {
    parser: TitleParser,
    hints: FreeformHints,
}

impl MetadataResolver {
    /// Resolver with the built-in title cascade and free-form hints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the free-form suffix hints.
    #[must_use]
    pub fn with_hints(mut self, hints: FreeformHints) -> Self {
        self.hints = hints;
        self
    }

    /// Replaces the title parser.
    #[must_use]
    pub fn with_parser(mut self, parser: TitleParser) -> Self {
        self.parser = parser;
        self
    }

    /// Builds the canonical record for one item.
    ///
    /// `title` falls back to the title atom when absent or blank.
    /// `duration_secs` is the container length in seconds.
    #[tracing::instrument(skip(self, map, title), fields(keys = map.len()))]
    #[must_use]
    pub fn resolve(
        &self,
        map: &RawAttributeMap,
        title: Option<&str>,
        duration_secs: Option<f64>,
    ) -> CanonicalRecord {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToString::to_string)
            .or_else(|| resolve_tag(map, &[keys::KEY_TITLE]))
            .unwrap_or_default();

        let mut series = resolve_tag(map, &[keys::KEY_SERIES_VENDOR])
            .or_else(|| resolve_freeform(map, &self.hints.series));
        let mut index = resolve_tag(map, &[keys::KEY_INDEX_VENDOR])
            .or_else(|| resolve_freeform(map, &self.hints.index))
            .map(|raw| normalize_index(&raw))
            .filter(|display| !display.is_empty());

        if series.is_none() || index.is_none() {
            let (parsed_series, parsed_index) = self.parser.parse(&title).into_pair();
            if series.is_none() && parsed_series.is_some() {
                debug!("series taken from title");
                series = parsed_series;
            }
            if index.is_none() && parsed_index.is_some() {
                debug!("series index taken from title");
                index = parsed_index;
            }
        }

        let series_index_sort = index.as_deref().and_then(sort_key_for_index);

        CanonicalRecord {
            title,
            series,
            series_index_display: index,
            series_index_sort,
            author: normalize_people_opt(resolve_tag(map, &[keys::KEY_AUTHOR]).as_deref()),
            narrator: normalize_people_opt(resolve_tag(map, &[keys::KEY_NARRATOR]).as_deref()),
            year: resolve_tag(map, &[keys::KEY_YEAR]),
            genre: resolve_tag(map, &[keys::KEY_GENRE]),
            duration: format_duration(duration_secs),
        }
    }
}

/// Resolves one item with the default resolver.
#[must_use]
pub fn resolve_metadata(
    map: &RawAttributeMap,
    title: Option<&str>,
    duration_secs: Option<f64>,
) -> CanonicalRecord {
    MetadataResolver::new().resolve(map, title, duration_secs)
}
