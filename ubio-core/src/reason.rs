use std::fmt::Display;

use crate::platform::PlatformError;

/// Why a biometric evaluation did not succeed.
///
/// Closed set. Every variant carries the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorReason {
    AppCancel,
    AuthenticationFailed,
    InvalidContext,
    PasscodeNotSet,
    SystemCancel,
    SensorLockout,
    SensorUnavailable,
    UserCancel,
    UserFallback,
    Unknown,
}

impl ErrorReason {
    pub const ALL: [Self; 10] = [
        Self::AppCancel,
        Self::AuthenticationFailed,
        Self::InvalidContext,
        Self::PasscodeNotSet,
        Self::SystemCancel,
        Self::SensorLockout,
        Self::SensorUnavailable,
        Self::UserCancel,
        Self::UserFallback,
        Self::Unknown,
    ];

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::AppCancel => "Authentication was cancelled by application",
            Self::AuthenticationFailed => "The user failed to provide valid credentials",
            Self::InvalidContext => "The context is invalid",
            Self::PasscodeNotSet => "Passcode is not set on the device",
            Self::SystemCancel => "Authentication was cancelled by the system",
            Self::SensorLockout => "Too many failed attempts.",
            Self::SensorUnavailable => "Biometric authentication is not available on the device",
            Self::UserCancel => "You have cancelled your login attempt",
            Self::UserFallback => "The user chose to use the fallback",
            Self::Unknown => "Did not find a matching error code",
        }
    }
}

impl Display for ErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<PlatformError> for ErrorReason {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::AppCancel => Self::AppCancel,
            PlatformError::AuthenticationFailed => Self::AuthenticationFailed,
            PlatformError::InvalidContext => Self::InvalidContext,
            PlatformError::PasscodeNotSet => Self::PasscodeNotSet,
            PlatformError::SystemCancel => Self::SystemCancel,
            PlatformError::BiometryLockout => Self::SensorLockout,
            PlatformError::BiometryNotAvailable => Self::SensorUnavailable,
            PlatformError::UserCancel => Self::UserCancel,
            PlatformError::UserFallback => Self::UserFallback,
            PlatformError::BiometryNotEnrolled | PlatformError::Other(_) | PlatformError::NoCode => {
                Self::Unknown
            }
        }
    }
}
