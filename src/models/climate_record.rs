use crate::utils::constants::MONTHS_PER_YEAR;
use serde::{Deserialize, Serialize};

/// One fixed-width line of the county climate-division dataset.
///
/// Monthly values are `None` when the field was blank or unparseable; the
/// missing-data sentinel check (`<= -90`) is applied by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawClimateRecord {
    pub state_fips: String,
    pub county_fips: String,
    pub element_code: String,
    pub year: i32,
    pub values: [Option<f64>; MONTHS_PER_YEAR],
}

impl RawClimateRecord {
    /// Five-character county key (`SS` + `CCC`).
    pub fn fips(&self) -> String {
        format!("{}{}", self.state_fips, self.county_fips)
    }
}
