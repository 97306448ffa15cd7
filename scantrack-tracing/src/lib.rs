#![warn(rust_2018_idioms)]

use scantrack_interface::{
    BearingHint, BearingSensor, Error, LaserScan2D, PositionPolar, PositionPublisher, Scan2D,
    ScanPublisher,
};
use tracing::trace;

/// Wraps an interface implementation and traces every call to it.
#[derive(Debug)]
pub struct Tracing<T>(T);

impl<T> Tracing<T> {
    pub fn new(v: T) -> Self {
        Self(v)
    }

    pub fn get_ref(&self) -> &T {
        &self.0
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Tracing<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: LaserScan2D> LaserScan2D for Tracing<T> {
    fn current_scan(&self) -> Result<Scan2D, Error> {
        let scan = self.0.current_scan()?;
        trace!(
            method = "scantrack_interface::LaserScan2D::current_scan",
            seq = scan.header.seq,
            angle_min = scan.angle_min,
            angle_max = scan.angle_max,
            num_ranges = scan.ranges.len(),
        );
        Ok(scan)
    }
}

impl<T: BearingSensor> BearingSensor for Tracing<T> {
    fn current_bearing(&self) -> Result<BearingHint, Error> {
        let hint = self.0.current_bearing()?;
        trace!(
            method = "scantrack_interface::BearingSensor::current_bearing",
            heading = hint.heading,
        );
        Ok(hint)
    }
}

impl<T: PositionPublisher> PositionPublisher for Tracing<T> {
    fn publish_position(&self, position: &PositionPolar) -> Result<(), Error> {
        trace!(
            method = "scantrack_interface::PositionPublisher::publish_position",
            distance = position.distance,
            heading = position.heading,
        );
        self.0.publish_position(position)
    }
}

impl<T: ScanPublisher> ScanPublisher for Tracing<T> {
    fn publish_scan(&self, scan: &Scan2D) -> Result<(), Error> {
        trace!(
            method = "scantrack_interface::ScanPublisher::publish_scan",
            seq = scan.header.seq,
            angle_min = scan.angle_min,
            angle_max = scan.angle_max,
            num_ranges = scan.ranges.len(),
        );
        self.0.publish_scan(scan)
    }
}
