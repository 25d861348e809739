pub mod constants;
pub mod geometry;
pub mod progress;
pub mod rounding;
pub mod settings;
pub mod states;

pub use constants::*;
pub use geometry::{centroid, LatLon};
pub use progress::ProgressReporter;
pub use rounding::{round_half_up, round_to_tenth};
pub use settings::{AggregationSettings, ScaleSettings, Settings};
pub use states::state_name;
