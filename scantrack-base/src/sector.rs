use scantrack_interface::Scan2D;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_BEARING_HALF_WIDTH: f64 = 0.2;

/// Contiguous range of scan angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AngularWindow {
    pub angle_min: f64,
    pub angle_max: f64,
}

impl AngularWindow {
    pub fn new(angle_min: f64, angle_max: f64) -> Self {
        Self {
            angle_min,
            angle_max,
        }
    }

    pub fn around(center: f64, half_width: f64) -> Self {
        Self::new(center - half_width, center + half_width)
    }
}

/// The bearing the next scans are narrowed to.
///
/// A new hint replaces the whole value; the latest one always wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BearingContext {
    /// Radians.
    pub bearing: f64,
    /// Radians.
    pub half_width: f64,
}

impl BearingContext {
    pub fn new(bearing: f64, half_width: f64) -> Self {
        Self {
            bearing,
            half_width,
        }
    }

    pub fn with_bearing(self, bearing: f64) -> Self {
        Self { bearing, ..self }
    }

    pub fn window(&self) -> AngularWindow {
        AngularWindow::around(self.bearing, self.half_width)
    }
}

impl Default for BearingContext {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_BEARING_HALF_WIDTH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClampSide {
    /// The requested angle was before the first sample (or not a number).
    BelowScan,
    /// The requested angle was after the last sample.
    AboveScan,
}

/// Which window bounds had to be moved onto the scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexClamp {
    pub min: Option<ClampSide>,
    pub max: Option<ClampSide>,
}

impl IndexClamp {
    pub fn is_clamped(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubScan {
    pub scan: Scan2D,
    pub min_index: usize,
    pub max_index: usize,
    pub clamp: IndexClamp,
}

impl SubScan {
    pub fn is_empty(&self) -> bool {
        self.scan.ranges.is_empty()
    }
}

/// Cuts the part of a scan that falls inside an angular window.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectorExtractor;

impl SectorExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Returns the samples of `scan` inside `window`.
    ///
    /// The window bounds are rounded to the nearest sample (ties to even) and
    /// clamped to `[0, len - 1]`. Clamping only logs a warning. The output
    /// covers the half-open index range `[min, max)` and its angle bounds are
    /// rebuilt from the clamped indices, so they sit on the scan's own grid.
    pub fn extract(&self, scan: &Scan2D, window: AngularWindow) -> SubScan {
        let mut sub_scan = Scan2D {
            header: scan.header.clone(),
            angle_min: scan.angle_min,
            angle_max: scan.angle_min,
            angle_increment: scan.angle_increment,
            time_increment: scan.time_increment,
            scan_time: scan.scan_time,
            range_min: scan.range_min,
            range_max: scan.range_max,
            ranges: vec![],
            intensities: vec![],
        };

        if scan.ranges.is_empty()
            || !scan.angle_increment.is_finite()
            || scan.angle_increment == 0.0
        {
            warn!(
                "Cannot narrow a scan with {} samples and angle_increment {}.",
                scan.ranges.len(),
                scan.angle_increment
            );
            return SubScan {
                scan: sub_scan,
                min_index: 0,
                max_index: 0,
                clamp: IndexClamp::default(),
            };
        }

        let (min_index, min_clamp) = index_of(scan, window.angle_min);
        match min_clamp {
            Some(ClampSide::BelowScan) => warn!(
                "angle_min {} is less than minimum scan angle {}.",
                window.angle_min, scan.angle_min
            ),
            Some(ClampSide::AboveScan) => warn!(
                "angle_min {} is greater than maximum scan angle {}.",
                window.angle_min,
                scan.angle_at(scan.ranges.len() - 1)
            ),
            None => {}
        }
        let (max_index, max_clamp) = index_of(scan, window.angle_max);
        match max_clamp {
            Some(ClampSide::BelowScan) => warn!(
                "angle_max {} is less than minimum scan angle {}.",
                window.angle_max, scan.angle_min
            ),
            Some(ClampSide::AboveScan) => warn!(
                "angle_max {} is greater than maximum scan angle {}.",
                window.angle_max,
                scan.angle_at(scan.ranges.len() - 1)
            ),
            None => {}
        }

        sub_scan.angle_min = scan.angle_at(min_index);
        sub_scan.angle_max = scan.angle_at(max_index);
        if min_index < max_index {
            sub_scan.ranges = scan.ranges[min_index..max_index].to_vec();
            if scan.intensities.len() == scan.ranges.len() {
                sub_scan.intensities = scan.intensities[min_index..max_index].to_vec();
            }
        }

        SubScan {
            scan: sub_scan,
            min_index,
            max_index,
            clamp: IndexClamp {
                min: min_clamp,
                max: max_clamp,
            },
        }
    }
}

fn index_of(scan: &Scan2D, angle: f64) -> (usize, Option<ClampSide>) {
    let last = scan.ranges.len() - 1;
    let index = ((angle - scan.angle_min) / scan.angle_increment).round_ties_even();
    if index.is_nan() || index < 0.0 {
        (0, Some(ClampSide::BelowScan))
    } else if index > last as f64 {
        (last, Some(ClampSide::AboveScan))
    } else {
        (index as usize, None)
    }
}
