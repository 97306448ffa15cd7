mod error;
mod gated_tracker;
mod kalman;
mod range_estimator;
mod sector;

pub use error::*;
pub use gated_tracker::*;
pub use kalman::*;
pub use range_estimator::*;
pub use sector::*;

// re-export
pub use nalgebra::{Matrix4, Vector2, Vector4};
