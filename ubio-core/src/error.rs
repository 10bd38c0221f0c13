use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Session-control and infrastructure errors.
///
/// Biometric failures are not errors at this level, they resolve as
/// [`crate::outcome::Outcome::Failure`].
#[derive(Debug, Error)]
pub enum Error {
    //
    // 1st party
    //
    #[error("An authentication attempt is already pending")]
    SessionBusy,
    #[error("Authentication attempt was cancelled")]
    Cancelled,
    #[error("Authentication prompt is empty")]
    EmptyReason,
    #[error("Data directory not found")]
    DataDirNotFound,
    #[error("Config directory not found")]
    ConfigDirNotFound,

    //
    // 2d party
    //
    #[error(transparent)]
    Io(#[from] std::io::Error),

    //
    // 3rd party
    //
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    ConfigParse(#[from] toml::de::Error),
}
