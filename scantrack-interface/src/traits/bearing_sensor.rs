use auto_impl::auto_impl;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Coarse direction of the target reported by an independent sensor (e.g. a camera).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BearingHint {
    /// Heading of the target in degrees, counter-clockwise from the sensor's X-axis.
    pub heading: f64,
}

impl BearingHint {
    pub fn new(heading: f64) -> Self {
        Self { heading }
    }

    pub fn from_radians(bearing: f64) -> Self {
        Self {
            heading: bearing.to_degrees(),
        }
    }

    pub fn bearing(&self) -> f64 {
        self.heading.to_radians()
    }
}

#[auto_impl(Box, Arc)]
pub trait BearingSensor: Send + Sync {
    fn current_bearing(&self) -> Result<BearingHint, Error>;
}
