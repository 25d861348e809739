pub mod boundary_reader;
pub mod climate_reader;
pub mod lookup_reader;

pub use boundary_reader::BoundaryReader;
pub use climate_reader::{ClimateReader, ParsedLine};
pub use lookup_reader::LookupReader;
