use std::path::Path;

use scantrack_base::{RangeEstimatorConfig, TrackerConfig, DEFAULT_BEARING_HALF_WIDTH};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Error;

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct LocatorConfig {
    // TOML format has a restriction that if a table itself contains tables,
    // all keys with non-table values must be emitted first.
    // Therefore, these fields must be located at the start of the struct.
    /// Half width (in radians) of the sector kept around the bearing hint.
    #[serde(default = "default_bearing_half_width")]
    pub bearing_half_width: f64,
    /// Fuse the range estimates with the gated tracker. If false, the raw
    /// estimate is published together with the latest bearing hint.
    #[serde(default = "default_true")]
    pub use_tracker: bool,
    /// Publish the narrowed scan of every cycle.
    #[serde(default = "default_true")]
    pub publish_filtered_scan: bool,

    #[serde(default)]
    pub range_estimator: RangeEstimatorConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            bearing_half_width: default_bearing_half_width(),
            use_tracker: default_true(),
            publish_filtered_scan: default_true(),
            range_estimator: Default::default(),
            tracker: Default::default(),
        }
    }
}

fn default_bearing_half_width() -> f64 {
    DEFAULT_BEARING_HALF_WIDTH
}

fn default_true() -> bool {
    true
}

impl LocatorConfig {
    pub fn try_new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_str(
            &std::fs::read_to_string(&path)
                .map_err(|e| Error::NoFile(path.as_ref().to_owned(), e))?,
            &path,
        )
    }

    pub fn from_str<P: AsRef<Path>>(s: &str, path: P) -> Result<Self, Error> {
        let config: LocatorConfig =
            toml::from_str(s).map_err(|e| Error::TomlParseFailure(path.as_ref().to_owned(), e))?;
        config.validate()?;
        debug!("{:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.bearing_half_width.is_finite() && self.bearing_half_width > 0.0) {
            return Err(Error::InvalidConfig(
                "bearing_half_width".into(),
                format!("{} must be finite and positive", self.bearing_half_width),
            ));
        }
        self.range_estimator.validate()?;
        self.tracker.validate()?;
        Ok(())
    }
}
