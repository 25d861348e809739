use crate::error::{ProcessingError, Result};
use crate::models::Month;
use crate::utils::constants::MONTHS_PER_YEAR;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

pub type MonthlyTemperatures = [Option<f64>; MONTHS_PER_YEAR];

/// Twelve monthly averages for one county. Serialized as
/// `{"fips": "01001", "temps": [44.1, null, ...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CountyTemperatureRecord {
    #[validate(length(equal = 5))]
    pub fips: String,

    pub temps: MonthlyTemperatures,
}

impl CountyTemperatureRecord {
    pub fn new(fips: String, temps: MonthlyTemperatures) -> Self {
        Self { fips, temps }
    }

    /// Value for `month`, treating non-finite numbers as absent.
    pub fn temperature(&self, month: Month) -> Option<f64> {
        self.temps[month.index()].filter(|t| t.is_finite())
    }

    pub fn valid_months(&self) -> usize {
        self.temps
            .iter()
            .filter(|t| t.is_some_and(|v| v.is_finite()))
            .count()
    }
}

/// FIPS code to monthly record. The map only ever reads this; a new month or
/// a reload replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountyTemperatureLookup {
    counties: BTreeMap<String, CountyTemperatureRecord>,
}

impl CountyTemperatureLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every record and that each key matches the record's own FIPS.
    pub fn validate_records(&self) -> Result<()> {
        for (key, record) in &self.counties {
            record.validate()?;
            if key != &record.fips {
                return Err(ProcessingError::InvalidFormat(format!(
                    "Lookup key '{}' does not match record FIPS '{}'",
                    key, record.fips
                )));
            }
        }
        Ok(())
    }

    pub fn insert(&mut self, record: CountyTemperatureRecord) {
        self.counties.insert(record.fips.clone(), record);
    }

    pub fn get(&self, fips: &str) -> Option<&CountyTemperatureRecord> {
        self.counties.get(fips)
    }

    pub fn temperature(&self, fips: &str, month: Month) -> Option<f64> {
        self.get(fips).and_then(|r| r.temperature(month))
    }

    /// All finite values for `month`, in FIPS order.
    pub fn month_values(&self, month: Month) -> impl Iterator<Item = f64> + '_ {
        self.counties.values().filter_map(move |r| r.temperature(month))
    }

    pub fn records(&self) -> impl Iterator<Item = &CountyTemperatureRecord> {
        self.counties.values()
    }

    pub fn len(&self) -> usize {
        self.counties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counties.is_empty()
    }
}

impl FromIterator<CountyTemperatureRecord> for CountyTemperatureLookup {
    fn from_iter<I: IntoIterator<Item = CountyTemperatureRecord>>(iter: I) -> Self {
        let mut lookup = Self::new();
        for record in iter {
            lookup.insert(record);
        }
        lookup
    }
}
