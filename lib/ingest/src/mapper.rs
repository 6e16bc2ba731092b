//! Schema mapping from raw source fields to the canonical parcel schema.
//!
//! The mapping table is statically declared and validated once at mapper
//! construction, not looked up per record. Mapping performs no validation:
//! values come out renamed but still untyped, and anything the table does
//! not name is dropped.

use chrono::{Datelike, Utc};
use serde_json::Value;

use parcelmatch_core::{Error, Result};

use crate::provider::RawRecord;
use crate::validate::coerce_f64;

/// Canonical slot a source field feeds into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappedField {
    Pin,
    SquareFootage,
    Latitude,
    Longitude,
    /// Consumed into `year_built`; never retained itself
    Age,
    ZoningCode,
}

/// One source-key to canonical-slot mapping entry
#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    pub source: &'static str,
    pub target: MappedField,
}

/// The assessor feed's field names
pub const DEFAULT_FIELD_MAPPINGS: &[FieldMapping] = &[
    FieldMapping {
        source: "bld_sq_ft",
        target: MappedField::SquareFootage,
    },
    FieldMapping {
        source: "pin",
        target: MappedField::Pin,
    },
    FieldMapping {
        source: "latitude",
        target: MappedField::Latitude,
    },
    FieldMapping {
        source: "longitude",
        target: MappedField::Longitude,
    },
    FieldMapping {
        source: "age",
        target: MappedField::Age,
    },
    FieldMapping {
        source: "class",
        target: MappedField::ZoningCode,
    },
];

/// A raw record renamed into canonical slots; values still untyped.
/// `year_built` is already derived, `age` is gone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedRecord {
    pub pin: Option<Value>,
    pub square_footage: Option<Value>,
    pub year_built: Option<Value>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub zoning_code: Option<Value>,
}

/// Renames raw source fields into the canonical schema and derives
/// `year_built = current_year - age`.
#[derive(Debug, Clone)]
pub struct SchemaMapper {
    mappings: Vec<FieldMapping>,
    current_year: i32,
}

impl SchemaMapper {
    /// Mapper with the default table and the real calendar year
    pub fn new() -> Result<Self> {
        Self::with_current_year(Utc::now().year())
    }

    /// Mapper with the default table and an injected year, for
    /// deterministic tests
    pub fn with_current_year(current_year: i32) -> Result<Self> {
        Self::with_mappings(DEFAULT_FIELD_MAPPINGS.to_vec(), current_year)
    }

    /// Mapper with a custom table. The table is validated here, once:
    /// duplicate source keys are rejected, and every canonical slot a
    /// retained record needs must be covered.
    pub fn with_mappings(mappings: Vec<FieldMapping>, current_year: i32) -> Result<Self> {
        for (i, mapping) in mappings.iter().enumerate() {
            if mappings[..i].iter().any(|m| m.source == mapping.source) {
                return Err(Error::InvalidMapping(format!(
                    "duplicate source field: {}",
                    mapping.source
                )));
            }
        }

        for required in [
            MappedField::Pin,
            MappedField::SquareFootage,
            MappedField::Latitude,
            MappedField::Longitude,
            MappedField::Age,
            MappedField::ZoningCode,
        ] {
            if !mappings.iter().any(|m| m.target == required) {
                return Err(Error::InvalidMapping(format!(
                    "no source field mapped to {required:?}"
                )));
            }
        }

        Ok(Self {
            mappings,
            current_year,
        })
    }

    /// Rename one raw record into canonical slots
    pub fn map_record(&self, raw: &RawRecord) -> MappedRecord {
        let mut out = MappedRecord::default();
        let mut age: Option<Value> = None;

        for mapping in &self.mappings {
            let Some(value) = raw.get(mapping.source) else {
                continue;
            };
            match mapping.target {
                MappedField::Pin => out.pin = Some(value.clone()),
                MappedField::SquareFootage => out.square_footage = Some(value.clone()),
                MappedField::Latitude => out.latitude = Some(value.clone()),
                MappedField::Longitude => out.longitude = Some(value.clone()),
                MappedField::Age => age = Some(value.clone()),
                MappedField::ZoningCode => out.zoning_code = Some(value.clone()),
            }
        }

        // An uncoercible age leaves year_built missing; the validator
        // drops the record later.
        if let Some(age) = age.as_ref().and_then(coerce_f64) {
            out.year_built = Some(Value::from(f64::from(self.current_year) - age));
        }

        out
    }

    pub fn map_all(&self, raws: &[RawRecord]) -> Vec<MappedRecord> {
        raws.iter().map(|raw| self.map_record(raw)).collect()
    }
}
