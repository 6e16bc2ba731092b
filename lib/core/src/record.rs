//! Parcel record types and the feature/weight tables used for scoring.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A validated parcel in canonical form.
///
/// This is also the persisted shape: one row per retained property with
/// every required field present and typed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyRecord {
    pub pin: String,
    pub square_footage: f64,
    pub year_built: i32,
    pub latitude: f64,
    pub longitude: f64,
    /// Required for retention but not used in distance computation
    pub zoning_code: String,
}

impl PropertyRecord {
    /// Value of a comparison feature for this record
    #[inline]
    #[must_use]
    pub fn feature(&self, feature: Feature) -> f64 {
        match feature {
            Feature::SquareFootage => self.square_footage,
            Feature::YearBuilt => f64::from(self.year_built),
            Feature::Latitude => self.latitude,
            Feature::Longitude => self.longitude,
        }
    }
}

/// The four comparison features, in fixed declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    SquareFootage,
    YearBuilt,
    Latitude,
    Longitude,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::SquareFootage,
        Feature::YearBuilt,
        Feature::Latitude,
        Feature::Longitude,
    ];

    /// Canonical field name for this feature
    pub fn name(self) -> &'static str {
        match self {
            Feature::SquareFootage => "square_footage",
            Feature::YearBuilt => "year_built",
            Feature::Latitude => "latitude",
            Feature::Longitude => "longitude",
        }
    }
}

/// Per-feature weight table for the similarity score.
///
/// Weights must be non-negative and sum to 1.0; the engine validates the
/// table at construction rather than per query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureWeights {
    pub square_footage: f64,
    pub year_built: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            square_footage: 0.4,
            year_built: 0.2,
            latitude: 0.2,
            longitude: 0.2,
        }
    }
}

impl FeatureWeights {
    /// Weight of a single feature
    #[inline]
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::SquareFootage => self.square_footage,
            Feature::YearBuilt => self.year_built,
            Feature::Latitude => self.latitude,
            Feature::Longitude => self.longitude,
        }
    }

    /// Check that all weights are non-negative and sum to 1.0
    pub fn validate(&self) -> Result<()> {
        for feature in Feature::ALL {
            if self.get(feature) < 0.0 {
                return Err(Error::InvalidWeights(format!(
                    "{} has negative weight",
                    feature.name()
                )));
            }
        }

        let sum: f64 = Feature::ALL.iter().map(|&f| self.get(f)).sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(Error::InvalidWeights(format!(
                "weights sum to {sum}, expected 1.0"
            )));
        }

        Ok(())
    }
}

/// One scored row in a comparables query result.
///
/// Produced fresh per query; never stored back into the dataset.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ComparableResult {
    pub pin: String,
    pub square_footage: f64,
    pub year_built: i32,
    pub latitude: f64,
    pub longitude: f64,
    /// In (0, 1]; exactly 1.0 only for a target-identical candidate
    pub confidence_score: f64,
}
