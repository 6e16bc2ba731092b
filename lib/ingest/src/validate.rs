//! Validation of mapped records into a typed [`Dataset`].
//!
//! Records missing a required field, or whose required field refuses
//! numeric coercion, are dropped and counted. Square-footage outliers
//! outside the 1st-99th percentile band are flagged but retained; the
//! flag is advisory and never feeds back into scoring.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use parcelmatch_core::{Dataset, PropertyRecord};

use crate::mapper::MappedRecord;

/// Diagnostics from a validation pass. Informational only; a validation
/// pass never fails, it just retains fewer records.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Raw records received
    pub input: usize,
    /// Records surviving validation
    pub retained: usize,
    /// Records dropped for missing or uncoercible required fields,
    /// including duplicate pins
    pub dropped: usize,
    /// Outlier flag per retained pin
    pub outlier_flags: HashMap<String, bool>,
}

impl ValidationReport {
    /// Pins flagged as square-footage outliers, sorted
    pub fn flagged_pins(&self) -> Vec<String> {
        let mut pins: Vec<String> = self
            .outlier_flags
            .iter()
            .filter(|(_, &flagged)| flagged)
            .map(|(pin, _)| pin.clone())
            .collect();
        pins.sort();
        pins
    }
}

/// Coerce a JSON value to a finite f64. Accepts numbers and numeric
/// strings; everything else fails coercion, which counts as missing.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        // Some feeds serve pins and class codes as bare numbers
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Validate mapped records into a dataset plus diagnostics.
///
/// Empty input is a valid degenerate state: it yields an empty dataset,
/// not an error.
pub fn validate_records(records: Vec<MappedRecord>) -> (Dataset, ValidationReport) {
    let input = records.len();
    if input == 0 {
        warn!("No records received for validation");
        return (Dataset::new(), ValidationReport::default());
    }

    let valid: Vec<PropertyRecord> = records.iter().filter_map(coerce_record).collect();
    let (dataset, _duplicates) = Dataset::from_records(valid);

    let dropped = input - dataset.len();
    if dropped > 0 {
        warn!(
            "Dropped {} of {} records due to missing required fields",
            dropped, input
        );
    }

    let outlier_flags = flag_outliers(&dataset);
    let flagged: Vec<&String> = outlier_flags
        .iter()
        .filter(|(_, &f)| f)
        .map(|(pin, _)| pin)
        .collect();
    if !flagged.is_empty() {
        warn!(
            "Flagged {} potential outliers based on extreme square footage",
            flagged.len()
        );
        debug!("Outlier pins: {:?}", flagged);
    }

    info!(
        "Data validation complete. {} valid records remain",
        dataset.len()
    );

    let report = ValidationReport {
        input,
        retained: dataset.len(),
        dropped,
        outlier_flags,
    };
    (dataset, report)
}

fn coerce_record(record: &MappedRecord) -> Option<PropertyRecord> {
    let pin = coerce_string(record.pin.as_ref()?)?;
    let square_footage = coerce_f64(record.square_footage.as_ref()?)?;
    let year_built = coerce_f64(record.year_built.as_ref()?)?.round() as i32;
    let latitude = coerce_f64(record.latitude.as_ref()?)?;
    let longitude = coerce_f64(record.longitude.as_ref()?)?;
    let zoning_code = coerce_string(record.zoning_code.as_ref()?)?;

    Some(PropertyRecord {
        pin,
        square_footage,
        year_built,
        latitude,
        longitude,
        zoning_code,
    })
}

/// Flag records whose square_footage falls strictly outside the
/// 1st-99th percentile band of the validated set
fn flag_outliers(dataset: &Dataset) -> HashMap<String, bool> {
    if dataset.is_empty() {
        return HashMap::new();
    }

    let mut footages: Vec<f64> = dataset.iter().map(|r| r.square_footage).collect();
    footages.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let q_low = percentile(&footages, 0.01);
    let q_high = percentile(&footages, 0.99);

    dataset
        .iter()
        .map(|r| {
            let flagged = r.square_footage < q_low || r.square_footage > q_high;
            (r.pin.clone(), flagged)
        })
        .collect()
}

/// Linear-interpolation percentile over a sorted slice, matching the
/// upstream feed's pandas quantile semantics
fn percentile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
