use crate::error::Result;
use crate::models::{CountyTemperatureLookup, Month};
use crate::scale::color::Color;
use crate::scale::interpolate::DivergingScheme;
use crate::utils::settings::ScaleSettings;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

impl TemperatureRange {
    /// True extremes of `month` across every county with a value, or `None`
    /// when no county has one.
    pub fn observed(lookup: &CountyTemperatureLookup, month: Month) -> Option<Self> {
        lookup.month_values(month).fold(None, |range, value| {
            Some(match range {
                None => Self {
                    min: value,
                    max: value,
                },
                Some(r) => Self {
                    min: r.min.min(value),
                    max: r.max.max(value),
                },
            })
        })
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

impl fmt::Display for TemperatureRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°F to {}°F", self.min, self.max)
    }
}

/// Month-specific mapping from temperature to fill color.
///
/// The diverging ramp is driven with a reversed domain `[max, min]` so that
/// the warmest county lands on the red end and the coldest on the blue end.
/// A scale is never adjusted in place; build a new one for each month.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    month: Month,
    range: TemperatureRange,
    observed: bool,
    scheme: DivergingScheme,
    no_data: Color,
}

impl ColorScale {
    pub fn for_month(
        lookup: &CountyTemperatureLookup,
        month: Month,
        settings: &ScaleSettings,
    ) -> Result<Self> {
        let no_data = Color::from_hex(&settings.no_data_color)?;
        let observed = TemperatureRange::observed(lookup, month);

        let range = observed.unwrap_or(TemperatureRange {
            min: settings.default_min,
            max: settings.default_max,
        });

        Ok(Self {
            month,
            range,
            observed: observed.is_some(),
            scheme: DivergingScheme::rd_yl_bu(),
            no_data,
        })
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// Effective domain: observed extremes, or the default domain when the
    /// month has no data.
    pub fn range(&self) -> TemperatureRange {
        self.range
    }

    pub fn has_data(&self) -> bool {
        self.observed
    }

    pub fn no_data_color(&self) -> Color {
        self.no_data
    }

    pub fn hot_color(&self) -> Color {
        self.scheme.start()
    }

    pub fn cold_color(&self) -> Color {
        self.scheme.end()
    }

    /// Fill for an optional value: neutral gray when absent or non-finite.
    pub fn color_of(&self, value: Option<f64>) -> Color {
        match value {
            Some(v) if v.is_finite() => self.interpolate(v),
            _ => self.no_data,
        }
    }

    /// Color for the value in `county`'s record for this scale's month.
    pub fn color_for_county(&self, lookup: &CountyTemperatureLookup, county: &str) -> Color {
        self.color_of(lookup.temperature(county, self.month))
    }

    fn interpolate(&self, value: f64) -> Color {
        // domain [max, min]
        let (t0, t1) = (self.range.max, self.range.min);
        if t0 == t1 {
            return self.scheme.at(0.5);
        }
        self.scheme.at((value - t0) / (t1 - t0))
    }
}
