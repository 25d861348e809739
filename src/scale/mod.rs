pub mod color;
pub mod color_scale;
pub mod interpolate;
pub mod legend;

pub use color::Color;
pub use color_scale::{ColorScale, TemperatureRange};
pub use interpolate::{DivergingScheme, RD_YL_BU};
pub use legend::Legend;
