use crate::error::Result;
use crate::map::tooltip::{format_temperature, CountyProfile, Tooltip};
use crate::models::{
    feature_county_id, normalize_county_id, Boundaries, CountyShape, CountyTemperatureLookup,
    CountyTemperatureRecord, Month,
};
use crate::readers::{BoundaryReader, LookupReader};
use crate::scale::{Color, ColorScale, Legend, TemperatureRange};
use crate::utils::constants::*;
use crate::utils::geometry::{centroid, LatLon};
use crate::utils::settings::ScaleSettings;
use geojson::{Feature, FeatureCollection};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Fill and outline for one county feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureStyle {
    pub fill: Color,
    pub fill_opacity: f64,
    pub outline: Color,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountyFill {
    pub id: String,
    pub fill: Color,
}

/// Everything the view must redraw after a month change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapUpdate {
    pub month: Month,
    pub range: TemperatureRange,
    pub has_data: bool,
    pub fills: Vec<CountyFill>,
    pub legend: Legend,
}

/// State of one map view: the loaded datasets, the selected month with its
/// color scale, and the clicked county. Render and query helpers read from
/// here; only [`set_month`], [`click`] and [`clear_selection`] change it.
///
/// [`set_month`]: MapSession::set_month
/// [`click`]: MapSession::click
/// [`clear_selection`]: MapSession::clear_selection
pub struct MapSession {
    lookup: CountyTemperatureLookup,
    boundaries: Boundaries,
    index: HashMap<String, usize>,
    settings: ScaleSettings,
    scale: ColorScale,
    active: Option<String>,
}

impl MapSession {
    pub fn new(
        lookup: CountyTemperatureLookup,
        boundaries: Boundaries,
        month: Month,
        settings: ScaleSettings,
    ) -> Result<Self> {
        settings.check()?;
        let scale = ColorScale::for_month(&lookup, month, &settings)?;
        let index = boundaries
            .counties
            .iter()
            .enumerate()
            .map(|(i, shape)| (shape.id.clone(), i))
            .collect();

        Ok(Self {
            lookup,
            boundaries,
            index,
            settings,
            scale,
            active: None,
        })
    }

    /// Load boundary geometry and the temperature lookup concurrently. Both
    /// must succeed before a session exists; there is no partial map.
    pub async fn load(
        boundaries_path: &Path,
        temperatures_path: &Path,
        month: Month,
        settings: ScaleSettings,
    ) -> Result<Self> {
        let boundaries_path = boundaries_path.to_path_buf();
        let temperatures_path = temperatures_path.to_path_buf();

        let (boundaries, lookup) = tokio::try_join!(
            async move { BoundaryReader::new().read_boundaries_async(&boundaries_path).await },
            async move { LookupReader::new().read_lookup_async(&temperatures_path).await },
        )?;

        info!(
            counties = boundaries.counties.len(),
            records = lookup.len(),
            "Loaded map data"
        );
        Self::new(lookup, boundaries, month, settings)
    }

    pub fn month(&self) -> Month {
        self.scale.month()
    }

    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    pub fn lookup(&self) -> &CountyTemperatureLookup {
        &self.lookup
    }

    pub fn boundaries(&self) -> &Boundaries {
        &self.boundaries
    }

    /// Record for a FIPS code or Census `GEO_ID`.
    pub fn lookup_temperature(&self, fips_or_geo_id: &str) -> Option<&CountyTemperatureRecord> {
        self.lookup.get(&normalize_county_id(fips_or_geo_id))
    }

    pub fn county(&self, fips_or_geo_id: &str) -> Option<&CountyShape> {
        let id = normalize_county_id(fips_or_geo_id);
        self.index.get(&id).map(|&i| &self.boundaries.counties[i])
    }

    /// Precomputed centroid for indexed counties, computed on demand otherwise.
    pub fn centroid_of(&self, feature: &Feature) -> Option<LatLon> {
        feature_county_id(feature)
            .and_then(|id| self.county(&id))
            .and_then(|shape| shape.centroid)
            .or_else(|| feature.geometry.as_ref().and_then(centroid))
    }

    pub fn get_color(&self, feature: &Feature) -> Color {
        match feature_county_id(feature) {
            Some(id) => self.color_of_county(&id),
            None => self.scale.no_data_color(),
        }
    }

    pub fn color_of_county(&self, fips_or_geo_id: &str) -> Color {
        self.scale
            .color_for_county(&self.lookup, &normalize_county_id(fips_or_geo_id))
    }

    /// Effective color domain for `month` (default domain when it has no data).
    pub fn get_range(&self, month: Month) -> Result<TemperatureRange> {
        if month == self.month() {
            return Ok(self.scale.range());
        }
        Ok(ColorScale::for_month(&self.lookup, month, &self.settings)?.range())
    }

    pub fn build_legend(&self, month: Month) -> Result<Legend> {
        if month == self.month() {
            return Ok(Legend::build(&self.scale, self.settings.legend_steps));
        }
        let scale = ColorScale::for_month(&self.lookup, month, &self.settings)?;
        Ok(Legend::build(&scale, self.settings.legend_steps))
    }

    /// Switch months: rebuild the scale from the full dataset and recolor
    /// every county.
    pub fn set_month(&mut self, month: Month) -> Result<MapUpdate> {
        self.scale = ColorScale::for_month(&self.lookup, month, &self.settings)?;
        let range = self.scale.range();
        debug!(%month, %range, has_data = self.scale.has_data(), "Rebuilt color scale");

        let fills = self
            .boundaries
            .counties
            .iter()
            .map(|shape| CountyFill {
                id: shape.id.clone(),
                fill: self.scale.color_for_county(&self.lookup, &shape.id),
            })
            .collect();

        Ok(MapUpdate {
            month,
            range,
            has_data: self.scale.has_data(),
            fills,
            legend: Legend::build(&self.scale, self.settings.legend_steps),
        })
    }

    pub fn hover(&self, fips_or_geo_id: &str) -> Tooltip {
        let fips = normalize_county_id(fips_or_geo_id);
        let place = self
            .county(&fips)
            .map(|shape| format!("{}, {}", shape.name, shape.state));

        Tooltip {
            temperature: self.lookup.temperature(&fips, self.month()),
            fips,
            place,
            month: self.month(),
        }
    }

    /// Select a county. Counties without a temperature record cannot be
    /// selected and leave the current selection unchanged.
    pub fn click(&mut self, fips_or_geo_id: &str) -> Option<CountyProfile> {
        let profile = self.profile(fips_or_geo_id)?;
        self.active = Some(profile.id.clone());
        Some(profile)
    }

    pub fn clear_selection(&mut self) {
        self.active = None;
    }

    pub fn active_county(&self) -> Option<CountyProfile> {
        self.active.as_deref().and_then(|id| self.profile(id))
    }

    pub fn profile(&self, fips_or_geo_id: &str) -> Option<CountyProfile> {
        let record = self.lookup_temperature(fips_or_geo_id)?;
        let shape = self.county(&record.fips);

        Some(CountyProfile {
            id: record.fips.clone(),
            name: shape.map_or("Unknown", |s| s.name.as_str()).to_string(),
            state: shape.map_or("Unknown", |s| s.state.as_str()).to_string(),
            center: shape.and_then(|s| s.centroid),
            temperatures: record.temps,
        })
    }

    pub fn style_for(&self, fips_or_geo_id: &str) -> FeatureStyle {
        let id = normalize_county_id(fips_or_geo_id);
        let is_active = self.active.as_deref() == Some(id.as_str());
        let (outline, weight, fill_opacity) = if is_active {
            (ACTIVE_OUTLINE_COLOR, ACTIVE_OUTLINE_WEIGHT, ACTIVE_FILL_OPACITY)
        } else {
            (DEFAULT_OUTLINE_COLOR, DEFAULT_OUTLINE_WEIGHT, DEFAULT_FILL_OPACITY)
        };

        FeatureStyle {
            fill: self.color_of_county(&id),
            fill_opacity,
            outline,
            weight,
        }
    }

    /// Highlight while the pointer is over a county. Leaving it restores
    /// [`style_for`](MapSession::style_for).
    pub fn hover_style(&self, fips_or_geo_id: &str) -> FeatureStyle {
        FeatureStyle {
            fill: self.color_of_county(fips_or_geo_id),
            fill_opacity: HOVER_FILL_OPACITY,
            outline: HOVER_OUTLINE_COLOR,
            weight: HOVER_OUTLINE_WEIGHT,
        }
    }

    /// Copy of the boundary collection with styling and value properties
    /// (`fill`, `fill-opacity`, `stroke`, `stroke-width`, `temperature`,
    /// `label`, `centroid`) set on each feature for the current month.
    pub fn styled_collection(&self) -> FeatureCollection {
        let mut collection = self.boundaries.collection.clone();

        for feature in &mut collection.features {
            let Some(id) = feature_county_id(feature) else {
                feature.set_property("fill", self.scale.no_data_color().to_hex());
                continue;
            };

            let style = self.style_for(&id);
            let temperature = self.lookup.temperature(&id, self.month());
            let centroid = self.centroid_of(feature);

            feature.set_property("fill", style.fill.to_hex());
            feature.set_property("fill-opacity", style.fill_opacity);
            feature.set_property("stroke", style.outline.to_hex());
            feature.set_property("stroke-width", style.weight);
            feature.set_property("temperature", json!(temperature));
            feature.set_property("label", format_temperature(temperature));
            feature.set_property("centroid", json!(centroid.map(|c| [c.lon, c.lat])));
        }

        collection
    }
}
