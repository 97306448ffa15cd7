use scantrack_interface::Scan2D;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RangeEstimatorConfig {
    /// Percentile (0-100) of the sector ranges reported as the target distance.
    ///
    /// Values below 50 prefer the nearer returns over background clutter.
    #[serde(default = "default_percentile")]
    pub percentile: f64,
    /// Ignore non-finite samples and samples outside `[range_min, range_max]`.
    #[serde(default = "default_true")]
    pub drop_invalid_ranges: bool,
}

impl Default for RangeEstimatorConfig {
    fn default() -> Self {
        Self {
            percentile: default_percentile(),
            drop_invalid_ranges: default_true(),
        }
    }
}

fn default_percentile() -> f64 {
    30.0
}

fn default_true() -> bool {
    true
}

impl RangeEstimatorConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..=100.0).contains(&self.percentile) {
            return Err(Error::InvalidConfig(
                "range_estimator.percentile".into(),
                format!("{} is not in [0, 100]", self.percentile),
            ));
        }
        Ok(())
    }
}

/// Summarizes the ranges of a sector into a single distance.
#[derive(Debug, Clone)]
pub struct RangeEstimator {
    config: RangeEstimatorConfig,
}

impl RangeEstimator {
    pub fn new(config: RangeEstimatorConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RangeEstimatorConfig {
        &self.config
    }

    /// Returns `None` if there are no samples.
    pub fn estimate(&self, ranges: &[f64]) -> Option<f64> {
        percentile(ranges, self.config.percentile)
    }

    /// Like [`estimate`](Self::estimate) on the scan's ranges, optionally
    /// skipping samples the sensor flags as no return.
    pub fn estimate_scan(&self, scan: &Scan2D) -> Option<f64> {
        if self.config.drop_invalid_ranges {
            let valid: Vec<f64> = scan
                .ranges
                .iter()
                .copied()
                .filter(|&r| scan.is_valid_range(r))
                .collect();
            self.estimate(&valid)
        } else {
            self.estimate(&scan.ranges)
        }
    }
}

impl Default for RangeEstimator {
    fn default() -> Self {
        Self {
            config: RangeEstimatorConfig::default(),
        }
    }
}

/// `q`-th percentile (0-100) with linear interpolation between the two
/// nearest ranks of the sorted samples.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    if lower == upper {
        Some(sorted[lower])
    } else {
        Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
    }
}
