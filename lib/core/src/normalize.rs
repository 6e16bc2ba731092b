//! Per-query min-max normalization of comparison features.
//!
//! Scaling parameters are fitted over the candidate set only; the target is
//! projected with the candidates' parameters so it is never part of the
//! statistics it is measured against. Parameters are transient per query
//! and never cached across datasets.

use crate::record::{Feature, PropertyRecord};

/// Min-max scaling parameters for the four comparison features
#[derive(Debug, Clone)]
pub struct ScalingParams {
    min: [f64; 4],
    max: [f64; 4],
}

impl ScalingParams {
    /// Fit min/max over a candidate set.
    ///
    /// The caller excludes the target before fitting.
    pub fn fit<'a, I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = &'a PropertyRecord>,
    {
        let mut min = [f64::INFINITY; 4];
        let mut max = [f64::NEG_INFINITY; 4];

        for record in candidates {
            for feature in Feature::ALL {
                let i = feature as usize;
                let value = record.feature(feature);
                min[i] = min[i].min(value);
                max[i] = max[i].max(value);
            }
        }

        Self { min, max }
    }

    /// Scale one feature value into normalized space.
    ///
    /// A zero-variance feature (all candidates identical) maps to 0 for
    /// every record, including the target, so it contributes zero distance
    /// instead of dividing by zero.
    pub fn scale(&self, feature: Feature, value: f64) -> f64 {
        let i = feature as usize;
        let range = self.max[i] - self.min[i];
        if range <= 0.0 {
            return 0.0;
        }
        (value - self.min[i]) / range
    }

    /// Project a record's four features into normalized space
    pub fn project(&self, record: &PropertyRecord) -> [f64; 4] {
        Feature::ALL.map(|f| self.scale(f, record.feature(f)))
    }
}
