use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("scantrack-interface: No scan is available : {}", message)]
    NoScan { message: String },
    #[error("scantrack-interface: No bearing hint is available : {}", message)]
    NoBearing { message: String },
    #[error("scantrack-interface: Connection error : {}", message)]
    Connection { message: String },
    #[error("scantrack-interface: Failed to publish {} : {}", topic, message)]
    Publish { topic: String, message: String },
    #[error("scantrack-interface: Other: {:?}", .0)]
    Other(#[from] anyhow::Error),
}
