//! # parcelmatch Core
//!
//! Core library for the parcelmatch comparable-property finder.
//!
//! This crate provides the query-side data structures and algorithms:
//!
//! - [`PropertyRecord`] - A validated parcel in canonical form
//! - [`Dataset`] - Immutable, pin-keyed collection of validated records
//! - [`ScalingParams`] - Per-query min-max normalization parameters
//! - [`SimilarityEngine`] - Weighted Euclidean distance and confidence scoring
//! - [`rank`] - Deterministic ordering and truncation of scored candidates
//!
//! ## Example
//!
//! ```rust
//! use parcelmatch_core::{Dataset, PropertyRecord, SimilarityEngine, DEFAULT_TOP_N};
//!
//! let records = vec![
//!     PropertyRecord {
//!         pin: "10-01-100-001".to_string(),
//!         square_footage: 12_000.0,
//!         year_built: 1987,
//!         latitude: 41.88,
//!         longitude: -87.63,
//!         zoning_code: "5-93".to_string(),
//!     },
//!     PropertyRecord {
//!         pin: "10-01-100-002".to_string(),
//!         square_footage: 11_500.0,
//!         year_built: 1990,
//!         latitude: 41.89,
//!         longitude: -87.64,
//!         zoning_code: "5-93".to_string(),
//!     },
//! ];
//! let (dataset, _duplicates) = Dataset::from_records(records);
//!
//! let engine = SimilarityEngine::new();
//! let comparables = engine
//!     .find_comparables("10-01-100-001", &dataset, DEFAULT_TOP_N)
//!     .unwrap();
//! assert_eq!(comparables.len(), 1);
//! ```

pub mod dataset;
pub mod error;
pub mod normalize;
pub mod rank;
pub mod record;
pub mod similarity;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use normalize::ScalingParams;
pub use record::{ComparableResult, Feature, FeatureWeights, PropertyRecord};
pub use similarity::{SimilarityEngine, DEFAULT_TOP_N};
