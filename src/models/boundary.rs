use crate::utils::geometry::LatLon;
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection};
use serde::{Deserialize, Serialize};

/// Display metadata and precomputed centroid for one county boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountyShape {
    pub id: String,
    pub name: String,
    pub state: String,
    pub centroid: Option<LatLon>,
}

/// Loaded boundary geometry plus the per-county index derived from it.
#[derive(Debug, Clone)]
pub struct Boundaries {
    pub collection: FeatureCollection,
    pub counties: Vec<CountyShape>,
}

impl Boundaries {
    /// No geometry; lookups still work but counties have no names or centroids.
    pub fn empty() -> Self {
        Self {
            collection: FeatureCollection {
                bbox: None,
                features: Vec::new(),
                foreign_members: None,
            },
            counties: Vec::new(),
        }
    }
}

/// Reduce a FIPS code or Census `GEO_ID` (`0500000US01001`) to the bare
/// county FIPS.
pub fn normalize_county_id(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.rfind("US") {
        Some(pos) => trimmed[pos + 2..].to_string(),
        None => trimmed.to_string(),
    }
}

/// County id of a feature: its `id`, falling back to `properties.GEO_ID`.
/// Numeric ids are zero-padded to five digits.
pub fn feature_county_id(feature: &Feature) -> Option<String> {
    let id = match &feature.id {
        Some(Id::String(s)) if !s.trim().is_empty() => normalize_county_id(s),
        Some(Id::Number(n)) => match n.as_u64() {
            Some(v) => format!("{:05}", v),
            None => n.to_string(),
        },
        _ => feature
            .property("GEO_ID")
            .and_then(|v| v.as_str())
            .map(normalize_county_id)?,
    };

    (!id.is_empty()).then_some(id)
}
