//! Document writer
//!
//! Wraps a single feature into a FeatureCollection and persists it as
//! pretty-printed UTF-8 JSON.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::geo::types::{FeatureCollection, GeoFeature};

/// Write `feature` as a single-member FeatureCollection to `path`.
///
/// The document is 2-space indented and keeps non-ASCII characters verbatim.
/// Returns the resolved absolute path of the written file. The target file is
/// created or overwritten.
pub fn save_feature_collection(feature: &GeoFeature, path: &Path) -> Result<PathBuf> {
    let collection = FeatureCollection::single(feature.clone());
    let document = serde_json::to_string_pretty(&collection)?;

    std::fs::write(path, document)?;

    let absolute = std::path::absolute(path)?;
    tracing::info!(path = %absolute.display(), "saved GeoJSON file");

    Ok(absolute)
}
