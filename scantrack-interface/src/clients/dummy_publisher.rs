use std::sync::Mutex;

use crate::{Error, PositionPolar, PositionPublisher, Scan2D, ScanPublisher};

/// Dummy PositionPublisher that keeps every published position.
#[derive(Debug, Default)]
pub struct DummyPositionPublisher {
    pub positions: Mutex<Vec<PositionPolar>>,
}

impl DummyPositionPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<PositionPolar> {
        self.positions.lock().unwrap().clone()
    }
}

impl PositionPublisher for DummyPositionPublisher {
    fn publish_position(&self, position: &PositionPolar) -> Result<(), Error> {
        self.positions.lock().unwrap().push(position.clone());
        Ok(())
    }
}

/// Dummy ScanPublisher that keeps every published scan.
#[derive(Debug, Default)]
pub struct DummyScanPublisher {
    pub scans: Mutex<Vec<Scan2D>>,
}

impl DummyScanPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<Scan2D> {
        self.scans.lock().unwrap().clone()
    }
}

impl ScanPublisher for DummyScanPublisher {
    fn publish_scan(&self, scan: &Scan2D) -> Result<(), Error> {
        self.scans.lock().unwrap().push(scan.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_positions() {
        let publisher = DummyPositionPublisher::new();
        assert!(publisher.published().is_empty());
        publisher
            .publish_position(&PositionPolar::new(1.0, 2.0))
            .unwrap();
        publisher
            .publish_position(&PositionPolar::new(3.0, 4.0))
            .unwrap();
        let published = publisher.published();
        assert_eq!(published.len(), 2);
        assert_eq!(published[1], PositionPolar::new(3.0, 4.0));
    }

    #[test]
    fn test_record_scans() {
        let publisher = DummyScanPublisher::new();
        publisher.publish_scan(&Scan2D::default()).unwrap();
        assert_eq!(publisher.published(), vec![Scan2D::default()]);
    }
}
