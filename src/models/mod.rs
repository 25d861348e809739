pub mod boundary;
pub mod climate_record;
pub mod county;
pub mod month;

pub use boundary::{feature_county_id, normalize_county_id, Boundaries, CountyShape};
pub use climate_record::RawClimateRecord;
pub use county::{CountyTemperatureLookup, CountyTemperatureRecord, MonthlyTemperatures};
pub use month::{Month, MONTH_NAMES};
