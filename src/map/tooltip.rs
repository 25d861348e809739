use crate::models::{Month, MonthlyTemperatures};
use crate::utils::constants::NO_DATA_LABEL;
use crate::utils::geometry::LatLon;
use serde::Serialize;
use std::fmt;

/// `72.4°F`, or `No data` for absent and non-finite values.
pub fn format_temperature(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1}°F", v),
        _ => NO_DATA_LABEL.to_string(),
    }
}

/// Hover content for one county.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub fips: String,
    pub place: Option<String>,
    pub month: Month,
    pub temperature: Option<f64>,
}

impl Tooltip {
    pub fn value_text(&self) -> String {
        format_temperature(self.temperature)
    }
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(place) = &self.place {
            writeln!(f, "{}", place)?;
        }
        write!(f, "FIPS: {}\n{}", self.fips, self.value_text())?;
        if self.temperature.is_some_and(f64::is_finite) {
            write!(f, "\n{} Average", self.month)?;
        }
        Ok(())
    }
}

/// A clicked county: where it is and its full annual profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountyProfile {
    pub id: String,
    pub name: String,
    pub state: String,
    pub center: Option<LatLon>,
    pub temperatures: MonthlyTemperatures,
}

impl CountyProfile {
    pub fn title(&self) -> String {
        format!("{}, {}", self.name, self.state)
    }

    pub fn temperature(&self, month: Month) -> Option<f64> {
        self.temperatures[month.index()]
    }

    /// Popup text for `month` followed by the annual profile.
    pub fn describe(&self, month: Month) -> String {
        let mut text = format!(
            "{}\n{}: {}\n",
            self.title(),
            month,
            format_temperature(self.temperature(month))
        );
        if let Some(center) = self.center {
            text.push_str(&format!("Center: {:.4}, {:.4}\n", center.lat, center.lon));
        }
        text.push_str("\nAnnual profile:\n");
        for m in Month::all() {
            let marker = if m == month { ">" } else { " " };
            text.push_str(&format!(
                "{} {:<10} {}\n",
                marker,
                m.name(),
                format_temperature(self.temperature(m))
            ));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_temperature() {
        assert_eq!(format_temperature(Some(72.44)), "72.4°F");
        assert_eq!(format_temperature(Some(-3.0)), "-3.0°F");
        assert_eq!(format_temperature(None), "No data");
        assert_eq!(format_temperature(Some(f64::NAN)), "No data");
    }

    #[test]
    fn test_tooltip_text() {
        let july = Month::new(6).unwrap();
        let tooltip = Tooltip {
            fips: "01001".to_string(),
            place: Some("Autauga, Alabama".to_string()),
            month: july,
            temperature: Some(81.5),
        };
        assert_eq!(
            tooltip.to_string(),
            "Autauga, Alabama\nFIPS: 01001\n81.5°F\nJuly Average"
        );

        let empty = Tooltip {
            fips: "01003".to_string(),
            place: None,
            month: july,
            temperature: None,
        };
        assert_eq!(empty.to_string(), "FIPS: 01003\nNo data");
    }

    #[test]
    fn test_profile_description() {
        let mut temperatures = [None; 12];
        temperatures[6] = Some(81.5);
        let profile = CountyProfile {
            id: "01001".to_string(),
            name: "Autauga".to_string(),
            state: "Alabama".to_string(),
            center: None,
            temperatures,
        };

        let text = profile.describe(Month::new(6).unwrap());
        assert!(text.starts_with("Autauga, Alabama\nJuly: 81.5°F\n"));
        assert!(text.contains("> July       81.5°F"));
        assert!(text.contains("  January    No data"));
    }
}
