use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("scantrack-base: Invalid config {}: {}", .0, .1)]
    InvalidConfig(String, String),
    #[error("scantrack-base: Innovation covariance is singular.")]
    SingularInnovation,
}
