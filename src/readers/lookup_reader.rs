use crate::error::Result;
use crate::models::CountyTemperatureLookup;
use std::path::Path;
use tracing::debug;

/// Loads a `county-temperatures.json` artifact and validates every record.
pub struct LookupReader;

impl LookupReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_lookup(&self, path: &Path) -> Result<CountyTemperatureLookup> {
        let content = std::fs::read_to_string(path)?;
        self.parse_lookup(&content)
    }

    pub async fn read_lookup_async(&self, path: &Path) -> Result<CountyTemperatureLookup> {
        let content = tokio::fs::read_to_string(path).await?;
        self.parse_lookup(&content)
    }

    pub fn parse_lookup(&self, content: &str) -> Result<CountyTemperatureLookup> {
        let lookup: CountyTemperatureLookup = serde_json::from_str(content)?;
        lookup.validate_records()?;
        debug!(counties = lookup.len(), "Loaded temperature lookup");
        Ok(lookup)
    }
}

impl Default for LookupReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use crate::models::Month;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_lookup() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            r#"{{"01001": {{"fips": "01001", "temps": [46.3, 50.1, 57.9, 64.2, 72.0, 78.8, 81.5, 80.9, 76.1, 65.3, 55.0, null]}}}}"#
        )?;

        let lookup = LookupReader::new().read_lookup(file.path())?;
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.temperature("01001", Month::new(6)?), Some(81.5));
        assert_eq!(lookup.temperature("01001", Month::new(11)?), None);
        Ok(())
    }

    #[test]
    fn test_invalid_fips_rejected() {
        let json = r#"{"1001": {"fips": "1001", "temps": [1,2,3,4,5,6,7,8,9,10,11,12]}}"#;
        assert!(matches!(
            LookupReader::new().parse_lookup(json),
            Err(ProcessingError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(matches!(
            LookupReader::new().read_lookup(Path::new("/nonexistent/county-temperatures.json")),
            Err(ProcessingError::Io(_))
        ));
    }
}
