//! Weighted similarity scoring of candidate parcels against a target.
//!
//! Per query: fit min-max parameters over the candidates, project the
//! candidates and the target, compute a weighted Euclidean distance per
//! candidate, and convert it to a bounded confidence score
//! `1 / (1 + distance)`. The dataset is never mutated; every per-query
//! structure is transient, so concurrent queries need no locking.

use tracing::debug;

use crate::dataset::Dataset;
use crate::normalize::ScalingParams;
use crate::rank;
use crate::record::{ComparableResult, Feature, FeatureWeights, PropertyRecord};
use crate::{Error, Result};

/// Default number of comparables returned per query
pub const DEFAULT_TOP_N: usize = 5;

/// Scores candidates against a target parcel using a weighted Euclidean
/// distance over min-max-normalized features.
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    weights: FeatureWeights,
}

impl SimilarityEngine {
    /// Engine with the standard weight table
    /// (square_footage 0.4, year_built 0.2, latitude 0.2, longitude 0.2)
    pub fn new() -> Self {
        Self {
            weights: FeatureWeights::default(),
        }
    }

    /// Engine with a custom weight table; rejects tables that are negative
    /// or do not sum to 1.0
    pub fn with_weights(weights: FeatureWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    /// Find the `top_n` most similar parcels to `target_pin`.
    ///
    /// # Errors
    /// - [`Error::EmptyDataset`] when the dataset holds no records
    /// - [`Error::UnknownTarget`] when `target_pin` is not in the dataset
    ///
    /// A dataset containing only the target yields an empty result, which
    /// is valid: there is simply nothing to compare against.
    pub fn find_comparables(
        &self,
        target_pin: &str,
        dataset: &Dataset,
        top_n: usize,
    ) -> Result<Vec<ComparableResult>> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let target = dataset
            .get(target_pin)
            .ok_or_else(|| Error::UnknownTarget(target_pin.to_string()))?;

        // The target never appears in its own results
        let candidates: Vec<&PropertyRecord> =
            dataset.iter().filter(|r| r.pin != target_pin).collect();
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let params = ScalingParams::fit(candidates.iter().copied());
        let target_norm = params.project(target);
        debug!(
            "Scoring {} candidates against target {}",
            candidates.len(),
            target_pin
        );

        let scored: Vec<ComparableResult> = candidates
            .into_iter()
            .map(|record| {
                let candidate_norm = params.project(record);
                let distance = self.weighted_distance(&candidate_norm, &target_norm);
                ComparableResult {
                    pin: record.pin.clone(),
                    square_footage: record.square_footage,
                    year_built: record.year_built,
                    latitude: record.latitude,
                    longitude: record.longitude,
                    confidence_score: 1.0 / (1.0 + distance),
                }
            })
            .collect();

        Ok(rank::rank(scored, top_n))
    }

    fn weighted_distance(&self, candidate: &[f64; 4], target: &[f64; 4]) -> f64 {
        Feature::ALL
            .iter()
            .map(|&feature| {
                let i = feature as usize;
                let delta = candidate[i] - target[i];
                self.weights.get(feature) * delta * delta
            })
            .sum::<f64>()
            .sqrt()
    }
}
