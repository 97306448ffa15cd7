mod dummy_bearing_sensor;
mod dummy_laser_scan;
mod dummy_publisher;

pub use dummy_bearing_sensor::*;
pub use dummy_laser_scan::*;
pub use dummy_publisher::*;
