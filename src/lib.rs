//! Bookshelf Core Library
//!
//! This library resolves series, index, and contributor metadata for
//! audiobook catalogs from raw container tags and free-text titles, and
//! reports on the resulting collection.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`tags`] - Raw attribute maps, byte decoding, prioritized tag lookup
//! - [`title`] - Exclusion rules and the series/index pattern cascade
//! - [`index`] - Index token normalization and sort keys
//! - [`people`] - Author and narrator field cleanup
//! - [`metadata`] - Canonical record assembly and catalog snapshots
//! - [`series`] - Series grouping, gaps, and completion status
//! - [`stats`] - Collection-wide statistics
//! - [`changes`] - New-item detection between catalog runs
//!
//! Everything except snapshot loading is total: malformed input degrades to
//! empty values instead of failing.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod changes;
pub mod error;
pub mod index;
pub mod metadata;
pub mod people;
pub mod series;
pub mod stats;
pub mod tags;
pub mod title;

// Re-export commonly used types
pub use changes::{NewItemsReport, detect_new_records};
pub use error::CatalogError;
pub use index::{normalize_index, sort_key_for_index};
pub use metadata::{
    CanonicalRecord, CatalogItem, CatalogResolution, MetadataResolver, load_catalog_snapshot,
    resolve_catalog, resolve_metadata,
};
pub use people::normalize_people;
pub use series::{SeriesAnalysis, SeriesGap, SeriesGroup, SeriesStatus, analyze_series};
pub use stats::{CatalogStats, catalog_stats};
pub use tags::{FreeformHints, RawAttributeMap, RawValue, resolve_freeform, resolve_tag};
pub use title::{TitleParser, TitleVerdict, parse_series_and_index};
