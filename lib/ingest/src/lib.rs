//! # parcelmatch Ingest
//!
//! Ingestion layer for the parcelmatch comparable-property finder.
//!
//! Raw heterogeneous records flow through three stages into an immutable
//! [`Dataset`](parcelmatch_core::Dataset):
//!
//! - [`RawRecordProvider`] - pluggable source of raw records (file-backed
//!   or in-memory)
//! - [`SchemaMapper`] - renames source fields into the canonical schema
//!   and derives `year_built` from `age`
//! - [`validate`] - drops records with missing or uncoercible required
//!   fields and flags square-footage outliers
//!
//! The [`Pipeline`] ties the stages together, owns the current dataset,
//! and serves queries; re-ingestion swaps the dataset atomically.

pub mod export;
pub mod mapper;
pub mod pipeline;
pub mod provider;
pub mod validate;

pub use mapper::{FieldMapping, MappedField, MappedRecord, SchemaMapper, DEFAULT_FIELD_MAPPINGS};
pub use pipeline::{Pipeline, PipelineState};
pub use provider::{FileProvider, InMemoryProvider, RawRecord, RawRecordProvider};
pub use validate::{validate_records, ValidationReport};
