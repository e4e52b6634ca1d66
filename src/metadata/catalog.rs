//! Batch resolution over a tag reader's catalog snapshot.

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::{CanonicalRecord, MetadataResolver};
use crate::error::CatalogError;
use crate::tags::RawAttributeMap;

/// One item as emitted by the tag reader.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogItem {
    /// Where the item came from (usually a file path).
    pub source: String,
    /// Title supplied alongside the tags, if any.
    #[serde(default)]
    pub title: Option<String>,
    /// Container length in seconds.
    #[serde(default)]
    pub duration_secs: Option<f64>,
    /// Every raw attribute the reader found.
    pub attributes: RawAttributeMap,
}

/// An item that was skipped during batch resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// Item identifier.
    pub item: String,
    /// Human-readable reason.
    pub reason: String,
}

/// Result of resolving a whole catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogResolution {
    /// Resolved records in input order.
    pub records: Vec<CanonicalRecord>,
    /// Items that could not be read.
    pub failures: Vec<ItemFailure>,
}

/// Splits a snapshot document into per-item results.
///
/// Malformed elements become [`CatalogError::UnreadableItem`] entries in
/// place; the remaining elements are still parsed.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidSnapshot`] if `json` is not valid JSON or
/// its top level is not an array.
pub fn load_catalog_snapshot(json: &str) -> Result<Vec<Result<CatalogItem, CatalogError>>, CatalogError> {
    let document: Value =
        serde_json::from_str(json).map_err(|e| CatalogError::malformed_json(&e.to_string()))?;

    let Value::Array(elements) = document else {
        return Err(CatalogError::not_an_array(json_kind(&document)));
    };

    Ok(elements
        .into_iter()
        .enumerate()
        .map(|(position, element)| {
            let item_id = element
                .get("source")
                .and_then(Value::as_str)
                .map_or_else(|| format!("#{position}"), ToString::to_string);
            serde_json::from_value::<CatalogItem>(element)
                .map_err(|e| CatalogError::bad_item(&item_id, &e.to_string()))
        })
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Resolves every readable item in order, collecting failures instead of stopping.
#[tracing::instrument(skip(resolver, items))]
pub fn resolve_catalog<I>(resolver: &MetadataResolver, items: I) -> CatalogResolution
where
    I: IntoIterator<Item = Result<CatalogItem, CatalogError>>,
{
    let mut resolution = CatalogResolution::default();

    for item in items {
        match item {
            Ok(item) => {
                let record =
                    resolver.resolve(&item.attributes, item.title.as_deref(), item.duration_secs);
                resolution.records.push(record);
            }
            Err(error) => {
                let item = match &error {
                    CatalogError::UnreadableItem { item, .. } => item.clone(),
                    CatalogError::InvalidSnapshot { .. } => "<snapshot>".to_string(),
                };
                warn!(%item, error = %error, "Skipping unreadable catalog item");
                resolution.failures.push(ItemFailure {
                    item,
                    reason: error.to_string(),
                });
            }
        }
    }

    info!(
        resolved = resolution.records.len(),
        failed = resolution.failures.len(),
        "Catalog resolved"
    );
    resolution
}
