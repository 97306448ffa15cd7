mod bearing_sensor;
mod laser_scan;
mod publisher;

pub use bearing_sensor::*;
pub use laser_scan::*;
pub use publisher::*;
