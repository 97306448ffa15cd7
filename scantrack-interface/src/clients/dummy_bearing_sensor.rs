use std::sync::Mutex;

use crate::{BearingHint, BearingSensor, Error};

/// Dummy BearingSensor for debug or tests.
///
/// Returns [`Error::NoBearing`] until a hint is set.
#[derive(Debug, Default)]
pub struct DummyBearingSensor {
    pub hint: Mutex<Option<BearingHint>>,
}

impl DummyBearingSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_heading(&self, heading: f64) {
        *self.hint.lock().unwrap() = Some(BearingHint::new(heading));
    }
}

impl BearingSensor for DummyBearingSensor {
    fn current_bearing(&self) -> Result<BearingHint, Error> {
        self.hint.lock().unwrap().ok_or_else(|| Error::NoBearing {
            message: "DummyBearingSensor has no heading yet".to_owned(),
        })
    }
}
