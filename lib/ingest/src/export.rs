//! Export of the validated dataset to disk.
//!
//! The canonical records are written as a JSON array, one object per
//! retained property. An empty dataset is skipped with a warning rather
//! than producing an empty file.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use parcelmatch_core::{Dataset, Error, PropertyRecord, Result};

/// Write the canonical dataset to `path` as pretty-printed JSON
pub fn export_json<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    if dataset.is_empty() {
        warn!("Dataset is empty, nothing to export");
        return Ok(());
    }

    let records: Vec<&PropertyRecord> = dataset.iter().collect();
    let bytes = serde_json::to_vec_pretty(&records)
        .map_err(|e| Error::Serialization(e.to_string()))?;
    fs::write(path.as_ref(), bytes)?;

    info!(
        "Exported {} records to {}",
        dataset.len(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pin: &str) -> PropertyRecord {
        PropertyRecord {
            pin: pin.to_string(),
            square_footage: 1000.0,
            year_built: 1990,
            latitude: 41.9,
            longitude: -87.7,
            zoning_code: "5-93".to_string(),
        }
    }

    #[test]
    fn test_export_round_trips() {
        let (dataset, _) = Dataset::from_records(vec![record("a"), record("b")]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parcels.json");

        export_json(&dataset, &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        let parsed: Vec<PropertyRecord> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], record("a"));
    }

    #[test]
    fn test_empty_dataset_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parcels.json");

        export_json(&Dataset::new(), &path).unwrap();
        assert!(!path.exists());
    }
}
