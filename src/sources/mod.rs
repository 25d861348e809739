pub mod synthetic;

pub use synthetic::SyntheticProfileSource;

use crate::error::Result;
use crate::models::CountyTemperatureLookup;
use crate::readers::LookupReader;
use std::path::PathBuf;

/// Anything that can supply the county temperature lookup the map consumes.
pub trait TemperatureSource {
    fn load(&self) -> Result<CountyTemperatureLookup>;

    fn describe(&self) -> String;
}

/// An aggregated `county-temperatures.json` on disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TemperatureSource for JsonFileSource {
    fn load(&self) -> Result<CountyTemperatureLookup> {
        LookupReader::new().read_lookup(&self.path)
    }

    fn describe(&self) -> String {
        format!("temperature lookup at {}", self.path.display())
    }
}
