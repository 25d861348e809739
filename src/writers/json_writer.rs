use crate::error::Result;
use crate::models::CountyTemperatureLookup;
use geojson::{FeatureCollection, GeoJson};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub records: usize,
}

impl FileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Data saved to: {}\nRecords: {}\nFile size: {:.2} KB",
            self.path.display(),
            self.records,
            self.size_bytes as f64 / 1024.0
        )
    }
}

/// Writes derived JSON artifacts. Output is a pure function of the input:
/// keys are sorted and nothing time-dependent is embedded, so identical input
/// yields byte-identical files.
pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }

    pub fn write_lookup(&self, lookup: &CountyTemperatureLookup, path: &Path) -> Result<FileInfo> {
        let info = self.write_json(lookup, path, lookup.len())?;
        info!(path = %path.display(), counties = lookup.len(), "Wrote temperature lookup");
        Ok(info)
    }

    pub fn write_feature_collection(
        &self,
        collection: FeatureCollection,
        path: &Path,
    ) -> Result<FileInfo> {
        let records = collection.features.len();
        let geojson = GeoJson::from(collection);
        self.write_json(&geojson, path, records)
    }

    pub fn write_json<T: Serialize + ?Sized>(
        &self,
        value: &T,
        path: &Path,
        records: usize,
    ) -> Result<FileInfo> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_json(value)?)?;

        Ok(FileInfo {
            path: path.to_path_buf(),
            size_bytes: fs::metadata(path)?.len(),
            records,
        })
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountyTemperatureRecord;
    use crate::readers::LookupReader;
    use tempfile::TempDir;

    fn sample_lookup() -> CountyTemperatureLookup {
        let mut temps = [None; 12];
        temps[0] = Some(44.5);
        temps[6] = Some(81.0);
        vec![
            CountyTemperatureRecord::new("02020".into(), temps),
            CountyTemperatureRecord::new("01001".into(), temps),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_write_lookup_creates_dirs_and_reads_back() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("data").join("county-temperatures.json");

        let info = JsonWriter::new().write_lookup(&sample_lookup(), &path)?;
        assert_eq!(info.records, 2);
        assert!(info.size_bytes > 0);
        assert!(info.summary().contains("File size:"));

        let loaded = LookupReader::new().read_lookup(&path)?;
        assert_eq!(loaded, sample_lookup());
        Ok(())
    }

    #[test]
    fn test_keys_sorted_and_compact_mode() -> Result<()> {
        let json = JsonWriter::new().with_pretty(false).to_json(&sample_lookup())?;
        assert!(json.starts_with(r#"{"01001":{"fips":"01001","temps":[44.5,null"#));
        assert!(json.find("01001").unwrap() < json.find("02020").unwrap());
        Ok(())
    }
}
