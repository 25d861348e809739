use crate::error::Result;
use crate::models::{
    CountyTemperatureLookup, CountyTemperatureRecord, MonthlyTemperatures, RawClimateRecord,
};
use crate::processors::aggregation_report::{AggregationReport, DroppedCounty};
use crate::readers::{ClimateReader, ParsedLine};
use crate::utils::constants::{MONTHS_PER_YEAR, PROGRESS_INTERVAL};
use crate::utils::progress::ProgressReporter;
use crate::utils::rounding::round_to_tenth;
use crate::utils::settings::AggregationSettings;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Running per-month sums and observation counts for one county.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountyAccumulator {
    sums: [f64; MONTHS_PER_YEAR],
    counts: [u32; MONTHS_PER_YEAR],
}

impl CountyAccumulator {
    pub fn add(&mut self, month: usize, value: f64) {
        self.sums[month] += value;
        self.counts[month] += 1;
    }

    pub fn count(&self, month: usize) -> u32 {
        self.counts[month]
    }

    /// Mean for `month` rounded to one decimal, or `None` with no observations.
    pub fn average(&self, month: usize) -> Option<f64> {
        match self.counts[month] {
            0 => None,
            n => Some(round_to_tenth(self.sums[month] / n as f64)),
        }
    }

    pub fn averages(&self) -> MonthlyTemperatures {
        std::array::from_fn(|month| self.average(month))
    }
}

/// Folds raw fixed-width records into per-county monthly normals.
///
/// Input is consumed in full before anything is emitted; [`finish`] turns the
/// accumulators into the final lookup and drops sparse counties.
///
/// [`finish`]: ClimateAggregator::finish
pub struct ClimateAggregator {
    settings: AggregationSettings,
    counties: BTreeMap<String, CountyAccumulator>,
    report: AggregationReport,
}

impl ClimateAggregator {
    pub fn new(settings: AggregationSettings) -> Self {
        let report = AggregationReport::new(settings.start_year, settings.end_year);
        Self {
            settings,
            counties: BTreeMap::new(),
            report,
        }
    }

    /// Stream `path` through the aggregator. Fails only if the file cannot be
    /// read; bad fields and lines are counted, never fatal.
    pub fn aggregate_file(
        &mut self,
        path: &Path,
        reader: &ClimateReader,
        progress: Option<&ProgressReporter>,
    ) -> Result<()> {
        info!(path = %path.display(), "Reading raw climate records");

        reader.visit_lines(path, |parsed| {
            self.ingest(parsed);
            let lines = self.report.lines_read as u64;
            if lines % PROGRESS_INTERVAL == 0 {
                if let Some(p) = progress {
                    p.set_message(&format!("Processed {} lines...", lines));
                }
            }
        })?;

        debug!(
            lines = self.report.lines_read,
            counties = self.counties.len(),
            "Finished reading raw climate records"
        );
        Ok(())
    }

    pub fn ingest_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        let parsed = ClimateReader::new().parse_line(line);
        self.ingest(parsed);
    }

    pub fn ingest(&mut self, parsed: ParsedLine) {
        self.report.lines_read += 1;
        match parsed {
            ParsedLine::Record(record) => self.ingest_record(&record),
            ParsedLine::Malformed => self.report.malformed_lines += 1,
        }
    }

    fn ingest_record(&mut self, record: &RawClimateRecord) {
        if record.element_code != self.settings.element_code {
            self.report.skipped_element += 1;
            return;
        }
        if !self.settings.contains_year(record.year) {
            self.report.skipped_year += 1;
            return;
        }

        self.report.records_retained += 1;
        let threshold = self.settings.missing_threshold;
        let county = self.counties.entry(record.fips()).or_default();

        for (month, value) in record.values.iter().enumerate() {
            match value {
                Some(v) if *v > threshold => {
                    county.add(month, *v);
                    self.report.observations += 1;
                }
                _ => self.report.missing_values += 1,
            }
        }
    }

    /// Compute rounded averages and keep counties with enough valid months.
    pub fn finish(self) -> (CountyTemperatureLookup, AggregationReport) {
        let mut report = self.report;
        let mut lookup = CountyTemperatureLookup::new();
        report.counties_seen = self.counties.len();

        for (fips, accumulator) in self.counties {
            let record = CountyTemperatureRecord::new(fips, accumulator.averages());
            let valid_months = record.valid_months();

            if valid_months >= self.settings.min_valid_months {
                lookup.insert(record);
            } else {
                debug!(fips = %record.fips, valid_months, "Dropping sparse county");
                report.dropped_counties.push(DroppedCounty {
                    fips: record.fips,
                    valid_months,
                });
            }
        }

        report.counties_retained = lookup.len();
        info!(
            retained = report.counties_retained,
            dropped = report.counties_dropped(),
            "Aggregation complete"
        );
        (lookup, report)
    }
}
