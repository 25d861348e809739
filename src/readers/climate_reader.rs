use crate::error::Result;
use crate::models::RawClimateRecord;
use crate::utils::constants::*;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Outcome of parsing one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Record(RawClimateRecord),
    /// Too short or with an unreadable year; carries nothing usable.
    Malformed,
}

/// Reader for the NOAA county climate-division fixed-width format:
///
/// ```text
/// SSCCCEEYYYY[vvvvvvv x 12]
/// 01001021991  46.30  51.90  ...
/// ```
pub struct ClimateReader {
    use_mmap: bool,
}

impl ClimateReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Parse each non-blank line of `path` and hand it to `visit`. Returns the
    /// number of non-blank lines seen. Only I/O failures are errors.
    pub fn visit_lines<F>(&self, path: &Path, visit: F) -> Result<usize>
    where
        F: FnMut(ParsedLine),
    {
        if self.use_mmap {
            self.visit_lines_mmap(path, visit)
        } else {
            self.visit_lines_buffered(path, visit)
        }
    }

    fn visit_lines_buffered<F>(&self, path: &Path, mut visit: F) -> Result<usize>
    where
        F: FnMut(ParsedLine),
    {
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut buf = Vec::new();
        let mut line_count = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            if line.trim().is_empty() {
                continue;
            }

            line_count += 1;
            visit(self.parse_line(&line));
        }

        Ok(line_count)
    }

    /// Memory-mapped variant for large inputs
    fn visit_lines_mmap<F>(&self, path: &Path, mut visit: F) -> Result<usize>
    where
        F: FnMut(ParsedLine),
    {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(0);
        }

        let mmap = unsafe { Mmap::map(&file)? };
        let content = String::from_utf8_lossy(&mmap);
        let mut line_count = 0;

        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }

            line_count += 1;
            visit(self.parse_line(line));
        }

        Ok(line_count)
    }

    /// Slice one line at the fixed offsets. Fields past the end of a short
    /// line come back empty, so their monthly values read as missing.
    pub fn parse_line(&self, line: &str) -> ParsedLine {
        let line = line.trim_end_matches(['\r', '\n']);

        let year = match field(line, ELEMENT_END, YEAR_END).trim().parse::<i32>() {
            Ok(year) => year,
            Err(_) => return ParsedLine::Malformed,
        };

        let mut values = [None; MONTHS_PER_YEAR];
        for (month, value) in values.iter_mut().enumerate() {
            let start = MONTH_FIELDS_START + month * MONTH_FIELD_WIDTH;
            *value = parse_value(field(line, start, start + MONTH_FIELD_WIDTH));
        }

        ParsedLine::Record(RawClimateRecord {
            state_fips: field(line, 0, STATE_FIPS_END).to_string(),
            county_fips: field(line, STATE_FIPS_END, FIPS_END).to_string(),
            element_code: field(line, FIPS_END, ELEMENT_END).to_string(),
            year,
            values,
        })
    }
}

impl Default for ClimateReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte range `[start, end)` clamped to the line; empty when out of range or
/// not on a character boundary.
fn field(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("")
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
