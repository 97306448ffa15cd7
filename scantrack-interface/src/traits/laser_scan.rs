use auto_impl::auto_impl;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Acquisition metadata that travels with a scan unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScanHeader {
    pub seq: u32,
    /// Acquisition time in seconds.
    pub stamp: f64,
    pub frame_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Scan2D {
    #[serde(default)]
    pub header: ScanHeader,
    /// The angle (in radians) where the scan starts, typically 0 for positive X-axis.
    pub angle_min: f64,
    /// The angle (in radians) where the scan ends, typically positive for CCW scans.
    pub angle_max: f64,
    /// The angular difference (in radians) between consecutive scans.
    pub angle_increment: f64,
    /// The time difference (in seconds) between consecutive measurements.
    #[serde(default)]
    pub time_increment: f64,
    /// The time (in seconds) it takes for the laser to complete one scan.
    #[serde(default)]
    pub scan_time: f64,
    /// The minimum range (in meters) of valid distance measurements.
    pub range_min: f64,
    /// The maximum range (in meters) of valid distance measurements.
    pub range_max: f64,
    /// An array of distance measurements (in meters) for each angle.
    pub ranges: Vec<f64>,
    /// (Optional) An array of intensity values for each angle, not supported by all LIDAR sensors.
    #[serde(default)]
    pub intensities: Vec<f64>,
}

impl Scan2D {
    /// Angle (in radians) of the sample at `index`.
    pub fn angle_at(&self, index: usize) -> f64 {
        self.angle_min + index as f64 * self.angle_increment
    }

    /// Returns true if `range` is a real return inside the sensor limits.
    pub fn is_valid_range(&self, range: f64) -> bool {
        range.is_finite() && range >= self.range_min && range <= self.range_max
    }
}

#[auto_impl(Box, Arc)]
pub trait LaserScan2D: Send + Sync {
    fn current_scan(&self) -> Result<Scan2D, Error>;
}
