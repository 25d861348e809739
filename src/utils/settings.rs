use crate::error::{ProcessingError, Result};
use crate::utils::constants::*;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Layered runtime settings: built-in defaults, then an optional TOML file,
/// then `COUNTY_TEMPS__SECTION__KEY` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub aggregation: AggregationSettings,
    pub scale: ScaleSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AggregationSettings {
    pub start_year: i32,
    pub end_year: i32,

    #[validate(length(equal = 2))]
    pub element_code: String,

    #[validate(range(min = 1, max = 12))]
    pub min_valid_months: usize,

    pub missing_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ScaleSettings {
    pub default_min: f64,
    pub default_max: f64,

    #[validate(range(min = 1))]
    pub legend_steps: usize,

    #[validate(length(equal = 7))]
    pub no_data_color: String,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            start_year: START_YEAR,
            end_year: END_YEAR,
            element_code: AVERAGE_TEMPERATURE_ELEMENT.to_string(),
            min_valid_months: MIN_VALID_MONTHS,
            missing_threshold: MISSING_VALUE_THRESHOLD,
        }
    }
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self {
            default_min: DEFAULT_DOMAIN_MIN,
            default_max: DEFAULT_DOMAIN_MAX,
            legend_steps: DEFAULT_LEGEND_STEPS,
            no_data_color: NO_DATA_COLOR.to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            aggregation: AggregationSettings::default(),
            scale: ScaleSettings::default(),
        }
    }
}

impl AggregationSettings {
    pub fn contains_year(&self, year: i32) -> bool {
        (self.start_year..=self.end_year).contains(&year)
    }

    pub fn check(&self) -> Result<()> {
        self.validate()?;
        if self.start_year > self.end_year {
            return Err(ProcessingError::InvalidConfig(format!(
                "start_year {} is after end_year {}",
                self.start_year, self.end_year
            )));
        }
        Ok(())
    }
}

impl ScaleSettings {
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        if !self.default_min.is_finite()
            || !self.default_max.is_finite()
            || self.default_min >= self.default_max
        {
            return Err(ProcessingError::InvalidConfig(format!(
                "default domain [{}, {}] is empty",
                self.default_min, self.default_max
            )));
        }
        crate::scale::Color::from_hex(&self.no_data_color)?;
        Ok(())
    }
}

impl Settings {
    /// Load settings, layering `path` (if it exists) and the environment over
    /// the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("aggregation.start_year", defaults.aggregation.start_year as i64)?
            .set_default("aggregation.end_year", defaults.aggregation.end_year as i64)?
            .set_default("aggregation.element_code", defaults.aggregation.element_code)?
            .set_default(
                "aggregation.min_valid_months",
                defaults.aggregation.min_valid_months as i64,
            )?
            .set_default(
                "aggregation.missing_threshold",
                defaults.aggregation.missing_threshold,
            )?
            .set_default("scale.default_min", defaults.scale.default_min)?
            .set_default("scale.default_max", defaults.scale.default_max)?
            .set_default("scale.legend_steps", defaults.scale.legend_steps as i64)?
            .set_default("scale.no_data_color", defaults.scale.no_data_color)?;

        let file_path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        builder = builder.add_source(File::from(file_path).required(path.is_some()));

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.check()?;
        tracing::debug!(?settings, "Loaded settings");
        Ok(settings)
    }

    pub fn check(&self) -> Result<()> {
        self.aggregation.check()?;
        self.scale.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.check().is_ok());
        assert_eq!(settings.aggregation.start_year, 1991);
        assert_eq!(settings.aggregation.end_year, 2020);
        assert_eq!(settings.aggregation.min_valid_months, 6);
        assert_eq!(settings.scale.no_data_color, "#e0e0e0");
    }

    #[test]
    fn test_load_from_file_overrides_defaults() -> Result<()> {
        let mut file = NamedTempFile::with_suffix(".toml")?;
        writeln!(file, "[aggregation]")?;
        writeln!(file, "start_year = 1981")?;
        writeln!(file, "end_year = 2010")?;
        writeln!(file, "[scale]")?;
        writeln!(file, "legend_steps = 20")?;

        let settings = Settings::load(Some(file.path()))?;
        assert_eq!(settings.aggregation.start_year, 1981);
        assert_eq!(settings.aggregation.end_year, 2010);
        assert_eq!(settings.aggregation.min_valid_months, 6);
        assert_eq!(settings.scale.legend_steps, 20);
        assert_eq!(settings.scale.default_max, 100.0);
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/county-temp-map.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_inverted_year_window_rejected() {
        let mut settings = Settings::default();
        settings.aggregation.start_year = 2021;
        assert!(matches!(
            settings.check(),
            Err(ProcessingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_out_of_range_min_valid_months_rejected() {
        let mut settings = Settings::default();
        settings.aggregation.min_valid_months = 13;
        assert!(matches!(
            settings.check(),
            Err(ProcessingError::Validation(_))
        ));
    }

    #[test]
    fn test_bad_no_data_color_rejected() {
        let mut settings = Settings::default();
        settings.scale.no_data_color = "#zzzzzz".to_string();
        assert!(settings.check().is_err());
    }

    #[test]
    fn test_contains_year_is_inclusive() {
        let aggregation = AggregationSettings::default();
        assert!(aggregation.contains_year(1991));
        assert!(aggregation.contains_year(2020));
        assert!(!aggregation.contains_year(1990));
        assert!(!aggregation.contains_year(2021));
    }
}
