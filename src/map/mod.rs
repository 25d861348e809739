pub mod session;
pub mod tooltip;

pub use session::{CountyFill, FeatureStyle, MapSession, MapUpdate};
pub use tooltip::{format_temperature, CountyProfile, Tooltip};
