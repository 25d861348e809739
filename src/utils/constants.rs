use crate::scale::Color;

/// Climate-normal window (inclusive)
pub const START_YEAR: i32 = 1991;
pub const END_YEAR: i32 = 2020;

/// Element code for monthly average temperature
pub const AVERAGE_TEMPERATURE_ELEMENT: &str = "02";

/// Monthly values at or below this are missing-data sentinels (e.g. -99.90)
pub const MISSING_VALUE_THRESHOLD: f64 = -90.0;

/// Counties with fewer non-null monthly averages are dropped
pub const MIN_VALID_MONTHS: usize = 6;

pub const MONTHS_PER_YEAR: usize = 12;

/// Fixed-width record layout (byte offsets)
pub const STATE_FIPS_END: usize = 2;
pub const FIPS_END: usize = 5;
pub const ELEMENT_END: usize = 7;
pub const YEAR_END: usize = 11;
pub const MONTH_FIELDS_START: usize = 11;
pub const MONTH_FIELD_WIDTH: usize = 7;

/// Color scale defaults
pub const DEFAULT_DOMAIN_MIN: f64 = 0.0;
pub const DEFAULT_DOMAIN_MAX: f64 = 100.0;
pub const DEFAULT_LEGEND_STEPS: usize = 100;
pub const NO_DATA_COLOR: &str = "#e0e0e0";
pub const NO_DATA_LABEL: &str = "No data";

/// Feature styling: clicked, hovered, everything else
pub const ACTIVE_OUTLINE_COLOR: Color = Color::new(0x1f, 0x29, 0x37);
pub const ACTIVE_OUTLINE_WEIGHT: f64 = 2.0;
pub const ACTIVE_FILL_OPACITY: f64 = 0.9;
pub const HOVER_OUTLINE_COLOR: Color = Color::new(0x4b, 0x55, 0x63);
pub const HOVER_OUTLINE_WEIGHT: f64 = 2.0;
pub const HOVER_FILL_OPACITY: f64 = 0.85;
pub const DEFAULT_OUTLINE_COLOR: Color = Color::new(0xf5, 0xf5, 0xf5);
pub const DEFAULT_OUTLINE_WEIGHT: f64 = 0.4;
pub const DEFAULT_FILL_OPACITY: f64 = 0.75;

pub const DEFAULT_MONTH: &str = "July";

/// File names
pub const DEFAULT_OUTPUT_FILE: &str = "county-temperatures.json";
pub const DEFAULT_CONFIG_FILE: &str = "county-temp-map.toml";
pub const ENV_PREFIX: &str = "COUNTY_TEMPS";

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const PROGRESS_INTERVAL: u64 = 10_000;
