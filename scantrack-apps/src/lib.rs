mod error;
mod locator;
mod locator_config;
mod replay;
pub mod utils;

pub use error::*;
pub use locator::*;
pub use locator_config::*;
pub use replay::*;
