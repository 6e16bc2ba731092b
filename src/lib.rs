//! # parcelmatch
//!
//! A comparable-property finder: locates, for a given real-estate parcel,
//! the most similar parcels in a dataset using a weighted multi-feature
//! distance score.
//!
//! ## Quick Start
//!
//! ```rust
//! use parcelmatch::prelude::*;
//! use serde_json::json;
//!
//! // Raw records as they arrive from the source feed
//! let raw: Vec<RawRecord> = vec![
//!     json!({"pin": "10-01-100-001", "bld_sq_ft": 12000, "age": 39,
//!            "latitude": 41.88, "longitude": -87.63, "class": "5-93"}),
//!     json!({"pin": "10-01-100-002", "bld_sq_ft": 11500, "age": 36,
//!            "latitude": 41.89, "longitude": -87.64, "class": "5-93"}),
//! ]
//! .into_iter()
//! .map(|v| v.as_object().unwrap().clone())
//! .collect();
//!
//! let pipeline = Pipeline::new(Box::new(InMemoryProvider::new(raw))).unwrap();
//! let report = pipeline.ingest().unwrap();
//! assert_eq!(report.retained, 2);
//!
//! let comparables = pipeline
//!     .find_comparables("10-01-100-001", DEFAULT_TOP_N)
//!     .unwrap();
//! assert_eq!(comparables.len(), 1);
//! ```
//!
//! ## Crate Structure
//!
//! parcelmatch is composed of two internal crates:
//!
//! - `parcelmatch-core` - Dataset, min-max normalization, weighted
//!   similarity scoring, deterministic ranking
//! - `parcelmatch-ingest` - Raw-record providers, schema mapping,
//!   validation with outlier flagging, dataset lifecycle
//!
//! ## Scoring model
//!
//! Per query, the four comparison features (square footage, year built,
//! latitude, longitude) are min-max normalized over the candidate set,
//! a weighted Euclidean distance is computed against the target, and
//! ranking uses the bounded confidence score `1 / (1 + distance)`.

// Re-export core types
pub use parcelmatch_core::{
    ComparableResult, Dataset, Error, Feature, FeatureWeights, PropertyRecord, Result,
    ScalingParams, SimilarityEngine, DEFAULT_TOP_N,
};

// Re-export ingestion
pub use parcelmatch_ingest::{
    export, FieldMapping, FileProvider, InMemoryProvider, MappedField, MappedRecord, Pipeline,
    PipelineState, RawRecord, RawRecordProvider, SchemaMapper, ValidationReport,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ComparableResult, Dataset, Error, Feature, FeatureWeights, FileProvider,
        InMemoryProvider, Pipeline, PipelineState, PropertyRecord, RawRecord,
        RawRecordProvider, Result, SchemaMapper, SimilarityEngine, ValidationReport,
        DEFAULT_TOP_N,
    };
}
