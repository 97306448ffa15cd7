use std::sync::Mutex;

use crate::{Error, LaserScan2D, Scan2D};

/// Dummy LaserScan2D for debug or tests.
#[derive(Debug, Default)]
pub struct DummyLaserScan2D {
    pub scan: Mutex<Scan2D>,
}

impl DummyLaserScan2D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scan(&self, scan: Scan2D) {
        *self.scan.lock().unwrap() = scan;
    }
}

impl LaserScan2D for DummyLaserScan2D {
    fn current_scan(&self) -> Result<Scan2D, Error> {
        Ok(self.scan.lock().unwrap().clone())
    }
}
