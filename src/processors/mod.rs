pub mod aggregation_report;
pub mod aggregator;

pub use aggregation_report::{AggregationReport, DroppedCounty};
pub use aggregator::{ClimateAggregator, CountyAccumulator};
