use crate::models::CountyTemperatureRecord;

/// Counters collected while aggregating one raw input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationReport {
    pub start_year: i32,
    pub end_year: i32,
    pub lines_read: usize,
    pub malformed_lines: usize,
    pub skipped_element: usize,
    pub skipped_year: usize,
    pub records_retained: usize,
    pub observations: usize,
    pub missing_values: usize,
    pub counties_seen: usize,
    pub counties_retained: usize,
    pub dropped_counties: Vec<DroppedCounty>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedCounty {
    pub fips: String,
    pub valid_months: usize,
}

impl AggregationReport {
    pub fn new(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year,
            ..Default::default()
        }
    }

    pub fn counties_dropped(&self) -> usize {
        self.dropped_counties.len()
    }

    /// Console summary of the run, optionally ending with a sample record.
    pub fn summary(&self, sample: Option<&CountyTemperatureRecord>) -> String {
        let mut summary = String::new();

        summary.push_str("=== Aggregation Report ===\n");
        summary.push_str(&format!("Lines Read: {}\n", self.lines_read));
        summary.push_str(&format!(
            "Records Retained: {} ({:.1}%)\n",
            self.records_retained,
            percentage(self.records_retained, self.lines_read)
        ));
        summary.push_str(&format!("Skipped (other element): {}\n", self.skipped_element));
        summary.push_str(&format!("Skipped (outside period): {}\n", self.skipped_year));
        summary.push_str(&format!("Malformed Lines: {}\n", self.malformed_lines));
        summary.push_str(&format!(
            "Monthly Observations: {} ({} missing)\n",
            self.observations, self.missing_values
        ));
        summary.push_str(&format!(
            "\nProcessed {} counties with temperature data ({} seen, {} dropped)\n",
            self.counties_retained,
            self.counties_seen,
            self.counties_dropped()
        ));
        summary.push_str(&format!(
            "Period: {}-{} ({}-year climate normals)\n",
            self.start_year,
            self.end_year,
            self.end_year - self.start_year + 1
        ));

        if !self.dropped_counties.is_empty() {
            summary.push_str("\nDropped Counties (first 10):\n");
            for (i, dropped) in self.dropped_counties.iter().take(10).enumerate() {
                summary.push_str(&format!(
                    "  {}. FIPS {}: {} valid months\n",
                    i + 1,
                    dropped.fips,
                    dropped.valid_months
                ));
            }
        }

        if let Some(record) = sample {
            summary.push_str(&format!("\nSample data for FIPS {}:\n", record.fips));
            match serde_json::to_string_pretty(record) {
                Ok(json) => summary.push_str(&json),
                Err(e) => summary.push_str(&format!("<unprintable: {}>", e)),
            }
            summary.push('\n');
        }

        summary
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_mentions_counts() {
        let mut report = AggregationReport::new(1991, 2020);
        report.lines_read = 4;
        report.records_retained = 2;
        report.counties_seen = 2;
        report.counties_retained = 1;
        report.dropped_counties.push(DroppedCounty {
            fips: "01003".to_string(),
            valid_months: 5,
        });

        let summary = report.summary(None);
        assert!(summary.contains("Records Retained: 2 (50.0%)"));
        assert!(summary.contains("Processed 1 counties"));
        assert!(summary.contains("Period: 1991-2020 (30-year climate normals)"));
        assert!(summary.contains("FIPS 01003: 5 valid months"));
    }

    #[test]
    fn test_empty_report_has_no_nan() {
        let report = AggregationReport::new(1991, 2020);
        assert!(!report.summary(None).contains("NaN"));
    }
}
