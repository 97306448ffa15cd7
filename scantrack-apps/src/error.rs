use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("scantrack-apps: Failed to parse {:?} as toml ({}).", .0, .1)]
    TomlParseFailure(PathBuf, #[source] toml::de::Error),
    #[error("scantrack-apps: No File {:?} is found ({}).", .0, .1)]
    NoFile(PathBuf, #[source] std::io::Error),
    #[error("scantrack-apps: Invalid config {}: {}", .0, .1)]
    InvalidConfig(String, String),
    #[error("scantrack-apps: Failed to parse event at line {} ({}).", .0, .1)]
    EventParseFailure(usize, #[source] serde_json::Error),
    #[error("scantrack-apps: io: {:?}", .0)]
    Io(#[from] std::io::Error),
    #[error("scantrack-apps: scantrack-base: {:?}", .0)]
    Base(#[from] scantrack_base::Error),
    #[error("scantrack-apps: scantrack-interface: {:?}", .0)]
    Interface(#[from] scantrack_interface::Error),
}
