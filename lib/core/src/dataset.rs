//! The immutable, pin-keyed parcel collection built by ingestion.

use std::collections::HashMap;

use crate::record::PropertyRecord;

/// An ordered, pin-keyed collection of validated property records.
///
/// Built once per ingestion run and never mutated afterwards; a re-ingestion
/// replaces the whole dataset rather than patching it in place. Because the
/// dataset is immutable, any number of concurrent queries may read it
/// without locking.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<PropertyRecord>,
    index: HashMap<String, usize>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from validated records, preserving input order.
    ///
    /// The pin is the primary key: the first record for a pin wins and later
    /// duplicates are discarded. Returns the dataset and the number of
    /// duplicates discarded.
    pub fn from_records(records: Vec<PropertyRecord>) -> (Self, usize) {
        let mut dataset = Self {
            records: Vec::with_capacity(records.len()),
            index: HashMap::with_capacity(records.len()),
        };
        let mut duplicates = 0;

        for record in records {
            if dataset.index.contains_key(&record.pin) {
                duplicates += 1;
                continue;
            }
            dataset.index.insert(record.pin.clone(), dataset.records.len());
            dataset.records.push(record);
        }

        (dataset, duplicates)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by pin
    pub fn get(&self, pin: &str) -> Option<&PropertyRecord> {
        self.index.get(pin).map(|&i| &self.records[i])
    }

    pub fn contains(&self, pin: &str) -> bool {
        self.index.contains_key(pin)
    }

    /// Records in ingestion order
    pub fn iter(&self) -> impl Iterator<Item = &PropertyRecord> {
        self.records.iter()
    }

    /// All retained pins, in ingestion order
    pub fn list_pins(&self) -> Vec<String> {
        self.records.iter().map(|r| r.pin.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pin: &str, square_footage: f64) -> PropertyRecord {
        PropertyRecord {
            pin: pin.to_string(),
            square_footage,
            year_built: 1990,
            latitude: 41.9,
            longitude: -87.7,
            zoning_code: "5-93".to_string(),
        }
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::new();
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
        assert!(dataset.list_pins().is_empty());
        assert!(dataset.get("anything").is_none());
    }

    #[test]
    fn test_order_preserved() {
        let (dataset, duplicates) = Dataset::from_records(vec![
            record("c", 1000.0),
            record("a", 2000.0),
            record("b", 3000.0),
        ]);
        assert_eq!(duplicates, 0);
        assert_eq!(dataset.list_pins(), vec!["c", "a", "b"]);
        assert_eq!(dataset.get("a").unwrap().square_footage, 2000.0);
    }

    #[test]
    fn test_duplicate_pin_first_wins() {
        let (dataset, duplicates) = Dataset::from_records(vec![
            record("a", 1000.0),
            record("a", 9000.0),
            record("b", 2000.0),
        ]);
        assert_eq!(duplicates, 1);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get("a").unwrap().square_footage, 1000.0);
    }
}
