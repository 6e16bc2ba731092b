//! Dataset lifecycle and the query surface consumed by outer layers.
//!
//! The pipeline owns the current dataset behind an `Arc` swap: queries
//! clone the `Arc` and read lock-free, while a re-ingestion replaces the
//! whole dataset atomically. Readers never observe a partially rebuilt
//! dataset.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{error, info};

use parcelmatch_core::{ComparableResult, Dataset, Error, Result, SimilarityEngine};

use crate::mapper::SchemaMapper;
use crate::provider::RawRecordProvider;
use crate::validate::{self, ValidationReport};

/// Lifecycle state of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No ingestion has run yet
    Unloaded,
    /// A dataset is installed but holds no records
    Loaded,
    /// A non-empty dataset is installed and queries can be served
    Queryable,
}

/// One ingestion run's output: the dataset and its diagnostics, always
/// installed and read together
struct Loaded {
    dataset: Arc<Dataset>,
    report: ValidationReport,
}

/// Owns the current dataset and serves comparables queries against it
pub struct Pipeline {
    provider: Box<dyn RawRecordProvider>,
    mapper: SchemaMapper,
    engine: SimilarityEngine,
    loaded: RwLock<Option<Loaded>>,
}

impl Pipeline {
    pub fn new(provider: Box<dyn RawRecordProvider>) -> Result<Self> {
        Ok(Self {
            provider,
            mapper: SchemaMapper::new()?,
            engine: SimilarityEngine::new(),
            loaded: RwLock::new(None),
        })
    }

    /// Pipeline with a custom mapper and engine, for tests that pin the
    /// calendar year or the weight table
    pub fn with_parts(
        provider: Box<dyn RawRecordProvider>,
        mapper: SchemaMapper,
        engine: SimilarityEngine,
    ) -> Self {
        Self {
            provider,
            mapper,
            engine,
            loaded: RwLock::new(None),
        }
    }

    pub fn state(&self) -> PipelineState {
        match self.loaded.read().as_ref() {
            None => PipelineState::Unloaded,
            Some(loaded) if loaded.dataset.is_empty() => PipelineState::Loaded,
            Some(_) => PipelineState::Queryable,
        }
    }

    /// Fetch, map, and validate a fresh dataset, then swap it in.
    ///
    /// A provider failure is logged, installs an empty dataset (the
    /// degraded-but-alive state), and is returned so the caller can
    /// message it; it never aborts the process.
    pub fn ingest(&self) -> Result<ValidationReport> {
        let raw = match self.provider.fetch_raw_records() {
            Ok(raw) => raw,
            Err(e) => {
                error!("Raw record provider failed: {}", e);
                *self.loaded.write() = Some(Loaded {
                    dataset: Arc::new(Dataset::new()),
                    report: ValidationReport::default(),
                });
                return Err(e);
            }
        };

        let mapped = self.mapper.map_all(&raw);
        let (dataset, report) = validate::validate_records(mapped);
        info!(
            "Ingestion complete: {} retained, {} dropped",
            report.retained, report.dropped
        );

        // Dataset and diagnostics are installed in one store so a reader
        // can never pair a fresh dataset with a stale report.
        *self.loaded.write() = Some(Loaded {
            dataset: Arc::new(dataset),
            report: report.clone(),
        });
        Ok(report)
    }

    /// The currently installed dataset, if any ingestion has run
    pub fn dataset(&self) -> Option<Arc<Dataset>> {
        self.loaded.read().as_ref().map(|l| l.dataset.clone())
    }

    /// Diagnostics from the last ingestion
    pub fn report(&self) -> Option<ValidationReport> {
        self.loaded.read().as_ref().map(|l| l.report.clone())
    }

    /// The current dataset together with its own diagnostics, taken under
    /// a single lock acquisition
    pub fn snapshot(&self) -> Option<(Arc<Dataset>, ValidationReport)> {
        self.loaded
            .read()
            .as_ref()
            .map(|l| (l.dataset.clone(), l.report.clone()))
    }

    /// Outlier flag per retained pin; empty when Unloaded
    pub fn outlier_flags(&self) -> HashMap<String, bool> {
        self.loaded
            .read()
            .as_ref()
            .map(|l| l.report.outlier_flags.clone())
            .unwrap_or_default()
    }

    /// All retained pins in ingestion order; empty when Unloaded
    pub fn list_pins(&self) -> Vec<String> {
        self.dataset().map(|d| d.list_pins()).unwrap_or_default()
    }

    /// Top-N comparables for the target pin.
    ///
    /// Fails fast with [`Error::EmptyDataset`] before any computation when
    /// Unloaded or loaded-but-empty, and with [`Error::UnknownTarget`] when
    /// the pin is absent, so callers can message "no data" and "pin not
    /// found" differently.
    pub fn find_comparables(
        &self,
        target_pin: &str,
        top_n: usize,
    ) -> Result<Vec<ComparableResult>> {
        let Some(dataset) = self.dataset() else {
            return Err(Error::EmptyDataset);
        };
        // Queries run on the Arc snapshot; a concurrent re-ingestion swaps
        // the pipeline's dataset without touching this one.
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        self.engine.find_comparables(target_pin, &dataset, top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{InMemoryProvider, RawRecord};
    use parcelmatch_core::DEFAULT_TOP_N;
    use serde_json::json;

    fn raw(pin: &str, sq_ft: f64, age: i64) -> RawRecord {
        let mut record = RawRecord::new();
        record.insert("pin".to_string(), json!(pin));
        record.insert("bld_sq_ft".to_string(), json!(sq_ft));
        record.insert("age".to_string(), json!(age));
        record.insert("latitude".to_string(), json!(41.9));
        record.insert("longitude".to_string(), json!(-87.7));
        record.insert("class".to_string(), json!("5-93"));
        record
    }

    fn pipeline(records: Vec<RawRecord>) -> Pipeline {
        Pipeline::with_parts(
            Box::new(InMemoryProvider::new(records)),
            SchemaMapper::with_current_year(2026).unwrap(),
            SimilarityEngine::new(),
        )
    }

    struct FailingProvider;

    impl RawRecordProvider for FailingProvider {
        fn fetch_raw_records(&self) -> Result<Vec<RawRecord>> {
            Err(Error::DataSourceUnavailable("feed offline".to_string()))
        }
    }

    #[test]
    fn test_query_before_ingest_fails_fast() {
        let p = pipeline(vec![raw("a", 1000.0, 30)]);
        assert_eq!(p.state(), PipelineState::Unloaded);
        assert!(p.list_pins().is_empty());
        assert!(matches!(
            p.find_comparables("a", DEFAULT_TOP_N),
            Err(Error::EmptyDataset)
        ));
    }

    #[test]
    fn test_state_transitions() {
        let p = pipeline(Vec::new());
        assert_eq!(p.state(), PipelineState::Unloaded);
        p.ingest().unwrap();
        assert_eq!(p.state(), PipelineState::Loaded);

        let p = pipeline(vec![raw("a", 1000.0, 30), raw("b", 1200.0, 40)]);
        p.ingest().unwrap();
        assert_eq!(p.state(), PipelineState::Queryable);
    }

    #[test]
    fn test_ingest_then_query() {
        let p = pipeline(vec![
            raw("a", 1000.0, 30),
            raw("b", 1200.0, 40),
            raw("c", 5000.0, 10),
        ]);
        let report = p.ingest().unwrap();
        assert_eq!(report.retained, 3);
        assert_eq!(p.list_pins(), vec!["a", "b", "c"]);

        let results = p.find_comparables("a", DEFAULT_TOP_N).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.pin != "a"));
        // b is far closer to a than c is
        assert_eq!(results[0].pin, "b");
    }

    #[test]
    fn test_empty_loaded_state_distinct_from_unknown_pin() {
        let p = pipeline(Vec::new());
        p.ingest().unwrap();
        assert!(matches!(
            p.find_comparables("a", DEFAULT_TOP_N),
            Err(Error::EmptyDataset)
        ));

        let p = pipeline(vec![raw("a", 1000.0, 30), raw("b", 1200.0, 40)]);
        p.ingest().unwrap();
        assert!(matches!(
            p.find_comparables("zzz", DEFAULT_TOP_N),
            Err(Error::UnknownTarget(_))
        ));
    }

    #[test]
    fn test_reingestion_replaces_dataset_wholesale() {
        let p = pipeline(vec![raw("a", 1000.0, 30)]);
        p.ingest().unwrap();
        let before = p.dataset().unwrap();
        assert!(before.contains("a"));

        // Old readers keep their snapshot across a reload
        p.ingest().unwrap();
        let after = p.dataset().unwrap();
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(before.contains("a"));
    }

    #[test]
    fn test_snapshot_pairs_dataset_with_its_own_report() {
        let p = Pipeline::with_parts(
            Box::new(InMemoryProvider::new(vec![
                raw("x", 1000.0, 30),
                raw("y", 1000.0, 30),
                raw("z", 5000.0, 30),
            ])),
            SchemaMapper::with_current_year(2026).unwrap(),
            SimilarityEngine::new(),
        );
        p.ingest().unwrap();
        p.ingest().unwrap();

        // Dataset and diagnostics come from one store: the report always
        // describes exactly the records the dataset holds.
        let (dataset, report) = p.snapshot().unwrap();
        assert_eq!(report.retained, dataset.len());
        let mut flagged: Vec<&String> = report.outlier_flags.keys().collect();
        flagged.sort();
        let mut pins = dataset.list_pins();
        pins.sort();
        let pins: Vec<&String> = pins.iter().collect();
        assert_eq!(flagged, pins);
    }

    #[test]
    fn test_provider_failure_degrades_to_empty_dataset() {
        let p = Pipeline::with_parts(
            Box::new(FailingProvider),
            SchemaMapper::with_current_year(2026).unwrap(),
            SimilarityEngine::new(),
        );
        let result = p.ingest();
        assert!(matches!(result, Err(Error::DataSourceUnavailable(_))));
        // Degraded, not dead: an empty dataset is installed
        assert_eq!(p.state(), PipelineState::Loaded);
        assert!(p.list_pins().is_empty());
    }

    #[test]
    fn test_outlier_flags_exposed() {
        let p = pipeline(vec![
            raw("a", 1000.0, 30),
            raw("b", 1000.0, 30),
            raw("c", 5000.0, 30),
        ]);
        p.ingest().unwrap();
        let flags = p.outlier_flags();
        assert_eq!(flags.get("c"), Some(&true));
        assert_eq!(flags.get("a"), Some(&false));
    }

    #[test]
    fn test_year_built_derived_through_pipeline() {
        let p = pipeline(vec![raw("a", 1000.0, 39), raw("b", 1200.0, 1)]);
        p.ingest().unwrap();
        let dataset = p.dataset().unwrap();
        assert_eq!(dataset.get("a").unwrap().year_built, 1987);
        assert_eq!(dataset.get("b").unwrap().year_built, 2025);
    }
}
