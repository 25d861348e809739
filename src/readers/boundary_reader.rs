use crate::error::{ProcessingError, Result};
use crate::models::{feature_county_id, Boundaries, CountyShape};
use crate::utils::geometry::centroid;
use crate::utils::states::state_name;
use geojson::{Feature, GeoJson};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

const UNKNOWN: &str = "Unknown";

/// Reads county boundaries from a GeoJSON FeatureCollection (e.g. the Census
/// cartographic boundary file keyed by `GEO_ID`/`STATE`/`NAME`).
pub struct BoundaryReader;

impl BoundaryReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_boundaries(&self, path: &Path) -> Result<Boundaries> {
        let content = std::fs::read_to_string(path)?;
        self.parse_boundaries(&content)
    }

    pub async fn read_boundaries_async(&self, path: &Path) -> Result<Boundaries> {
        let content = tokio::fs::read_to_string(path).await?;
        self.parse_boundaries(&content)
    }

    pub fn parse_boundaries(&self, content: &str) -> Result<Boundaries> {
        let geojson: GeoJson = content.parse()?;
        let collection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            _ => {
                return Err(ProcessingError::InvalidFormat(
                    "Boundary file must be a GeoJSON FeatureCollection".to_string(),
                ))
            }
        };

        let mut counties = Vec::with_capacity(collection.features.len());
        let mut seen = HashSet::new();
        let mut unnamed = 0;

        for feature in &collection.features {
            let Some(shape) = self.county_shape(feature) else {
                unnamed += 1;
                continue;
            };
            if !seen.insert(shape.id.clone()) {
                warn!(county = %shape.id, "Duplicate county id in boundary file");
            }
            counties.push(shape);
        }

        if unnamed > 0 {
            warn!(count = unnamed, "Skipped boundary features without a county id");
        }
        debug!(counties = counties.len(), "Indexed county boundaries");

        Ok(Boundaries {
            collection,
            counties,
        })
    }

    fn county_shape(&self, feature: &Feature) -> Option<CountyShape> {
        let id = feature_county_id(feature)?;

        let name = feature
            .property("NAME")
            .and_then(|v| v.as_str())
            .unwrap_or(UNKNOWN)
            .to_string();

        let state_code = feature
            .property("STATE")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| id.chars().take(2).collect());
        let state = state_name(&state_code).unwrap_or(UNKNOWN).to_string();

        Some(CountyShape {
            id,
            name,
            state,
            centroid: feature.geometry.as_ref().and_then(centroid),
        })
    }
}

impl Default for BoundaryReader {
    fn default() -> Self {
        Self::new()
    }
}
