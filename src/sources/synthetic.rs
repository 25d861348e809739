use crate::error::{ProcessingError, Result};
use crate::models::{Boundaries, CountyTemperatureLookup, CountyTemperatureRecord, MONTH_NAMES};
use crate::sources::TemperatureSource;
use crate::utils::constants::MONTHS_PER_YEAR;
use crate::utils::rounding::round_to_tenth;
use std::f64::consts::PI;
use tracing::warn;

/// Continental US midpoint, used when a county has no centroid.
const DEFAULT_LATITUDE: f64 = 37.0;

/// Placeholder data source: a smooth, deterministic seasonal curve per county
/// derived from its id and latitude. Not real climate data.
pub struct SyntheticProfileSource {
    counties: Vec<(String, Option<f64>)>,
}

impl SyntheticProfileSource {
    pub fn new(counties: Vec<(String, Option<f64>)>) -> Self {
        Self { counties }
    }

    pub fn from_boundaries(boundaries: &Boundaries) -> Self {
        Self::new(
            boundaries
                .counties
                .iter()
                .map(|shape| (shape.id.clone(), shape.centroid.map(|c| c.lat)))
                .collect(),
        )
    }
}

impl TemperatureSource for SyntheticProfileSource {
    fn load(&self) -> Result<CountyTemperatureLookup> {
        if self.counties.is_empty() {
            return Err(ProcessingError::MissingData(
                "No counties to generate profiles for".to_string(),
            ));
        }

        let mut lookup = CountyTemperatureLookup::new();
        for (id, latitude) in &self.counties {
            if id.len() != 5 {
                warn!(county = %id, "Skipping county with a non-FIPS id");
                continue;
            }
            lookup.insert(CountyTemperatureRecord::new(
                id.clone(),
                temperature_profile(id, *latitude),
            ));
        }
        Ok(lookup)
    }

    fn describe(&self) -> String {
        format!("synthetic profiles for {} counties", self.counties.len())
    }
}

pub fn temperature_profile(county_id: &str, latitude: Option<f64>) -> [Option<f64>; MONTHS_PER_YEAR] {
    let lat = latitude.filter(|l| l.is_finite()).unwrap_or(DEFAULT_LATITUDE);
    let baseline = 70.0 - (lat - 33.0).abs() * 1.6;
    let variability = (18.0 - (lat - 40.0).abs() * 0.35).max(9.0);
    let offset = (seeded_value(&format!("{}-offset", county_id)) - 0.5) * 8.0;
    let phase = (seeded_value(&format!("{}-phase", county_id)) - 0.5) * (PI / 6.0);

    std::array::from_fn(|index| {
        let month = MONTH_NAMES[index];
        let angle = 2.0 * PI * index as f64 / MONTHS_PER_YEAR as f64;
        let seasonal = (angle - PI / 2.0 + phase).sin();
        let local = (seeded_value(&format!("{}-{}", county_id, month)) - 0.5) * 3.0;
        let temperature = baseline + offset + variability * seasonal + local;
        Some(round_to_tenth(temperature.clamp(-20.0, 105.0)))
    })
}

/// Pseudo-random value in `[0, 1)` from a 31-multiplier string hash.
fn seeded_value(seed: &str) -> f64 {
    let hash = seed
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32));
    let x = (hash as f64).sin() * 10000.0;
    x - x.floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_value_is_deterministic_and_bounded() {
        let a = seeded_value("01001-offset");
        assert_eq!(a, seeded_value("01001-offset"));
        assert!((0.0..1.0).contains(&a));
        assert_ne!(a, seeded_value("01003-offset"));
        // empty seed hashes to 0
        assert_eq!(seeded_value(""), 0.0);
    }

    #[test]
    fn test_profile_is_seasonal_and_bounded() {
        let profile = temperature_profile("01001", Some(32.5));
        let values: Vec<f64> = profile.iter().map(|t| t.unwrap()).collect();

        assert!(values.iter().all(|t| (-20.0..=105.0).contains(t)));
        // Summer warmer than winter in the northern hemisphere
        assert!(values[6] > values[0]);
        assert_eq!(profile, temperature_profile("01001", Some(32.5)));
    }

    #[test]
    fn test_missing_latitude_uses_default() {
        assert_eq!(
            temperature_profile("01001", None),
            temperature_profile("01001", Some(DEFAULT_LATITUDE))
        );
    }

    #[test]
    fn test_source_skips_non_fips_ids() {
        let source = SyntheticProfileSource::new(vec![
            ("01001".to_string(), Some(32.5)),
            ("abc".to_string(), None),
        ]);
        let lookup = source.load().unwrap();
        assert_eq!(lookup.len(), 1);
        assert!(lookup.validate_records().is_ok());
    }

    #[test]
    fn test_empty_source_is_an_error() {
        assert!(matches!(
            SyntheticProfileSource::new(vec![]).load(),
            Err(ProcessingError::MissingData(_))
        ));
    }
}
