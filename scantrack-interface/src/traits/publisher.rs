use auto_impl::auto_impl;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::Error, Scan2D};

/// Number of rows (and columns) of [`POSITION_COVARIANCE`].
pub const POSITION_COV_SIZE: usize = 4;

/// Fixed covariance attached to every outgoing position.
///
/// This is a static descriptor expected by downstream consumers, not the live
/// uncertainty of the tracker.
#[rustfmt::skip]
pub const POSITION_COVARIANCE: [f64; POSITION_COV_SIZE * POSITION_COV_SIZE] = [
    1e-2, 0.0,  0.0,  0.0,
    0.0,  1e-1, 0.0,  0.0,
    0.0,  0.0,  1e-3, 0.0,
    0.0,  0.0,  0.0,  2e-2,
];

/// Target position in polar coordinates around the scanner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PositionPolar {
    /// Distance in meters.
    pub distance: f64,
    /// Heading in degrees.
    pub heading: f64,
    pub cov_size: usize,
    /// Row-major `cov_size` x `cov_size` matrix.
    pub covariance: Vec<f64>,
}

impl PositionPolar {
    /// Creates a position carrying the fixed [`POSITION_COVARIANCE`].
    pub fn new(distance: f64, heading: f64) -> Self {
        Self {
            distance,
            heading,
            cov_size: POSITION_COV_SIZE,
            covariance: POSITION_COVARIANCE.to_vec(),
        }
    }

    pub fn from_radians(distance: f64, bearing: f64) -> Self {
        Self::new(distance, bearing.to_degrees())
    }
}

#[auto_impl(Box, Arc)]
pub trait PositionPublisher: Send + Sync {
    fn publish_position(&self, position: &PositionPolar) -> Result<(), Error>;
}

#[auto_impl(Box, Arc)]
pub trait ScanPublisher: Send + Sync {
    fn publish_scan(&self, scan: &Scan2D) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_position_covariance_is_diagonal() {
        let position = PositionPolar::from_radians(2.0, std::f64::consts::FRAC_PI_2);
        assert_approx_eq!(position.heading, 90.0);
        assert_eq!(position.cov_size, 4);
        assert_eq!(position.covariance.len(), 16);
        for row in 0..4 {
            for col in 0..4 {
                if row != col {
                    assert_eq!(position.covariance[row * 4 + col], 0.0);
                }
            }
        }
        assert_approx_eq!(position.covariance[0], 1e-2);
        assert_approx_eq!(position.covariance[5], 1e-1);
        assert_approx_eq!(position.covariance[10], 1e-3);
        assert_approx_eq!(position.covariance[15], 2e-2);
    }
}
