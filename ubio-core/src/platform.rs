use derive_more::Display;

use crate::capability::CapabilityProbe;

//
// LocalAuthentication error numbering. Backends that talk to other platforms
// translate into the same codes.
//
pub const LA_AUTHENTICATION_FAILED: i64 = -1;
pub const LA_USER_CANCEL: i64 = -2;
pub const LA_USER_FALLBACK: i64 = -3;
pub const LA_SYSTEM_CANCEL: i64 = -4;
pub const LA_PASSCODE_NOT_SET: i64 = -5;
pub const LA_BIOMETRY_NOT_AVAILABLE: i64 = -6;
pub const LA_BIOMETRY_NOT_ENROLLED: i64 = -7;
pub const LA_BIOMETRY_LOCKOUT: i64 = -8;
pub const LA_APP_CANCEL: i64 = -9;
pub const LA_INVALID_CONTEXT: i64 = -10;

/// Raw failure reported by a platform evaluator.
///
/// Never leaves the session: it is folded into an
/// [`ErrorReason`](crate::reason::ErrorReason) first.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    AppCancel,
    AuthenticationFailed,
    InvalidContext,
    PasscodeNotSet,
    SystemCancel,
    BiometryLockout,
    BiometryNotAvailable,
    BiometryNotEnrolled,
    UserCancel,
    UserFallback,
    #[display("Other({_0})")]
    Other(i64),
    /// The platform said no without saying why.
    NoCode,
}

impl From<i64> for PlatformError {
    fn from(code: i64) -> Self {
        match code {
            LA_AUTHENTICATION_FAILED => Self::AuthenticationFailed,
            LA_USER_CANCEL => Self::UserCancel,
            LA_USER_FALLBACK => Self::UserFallback,
            LA_SYSTEM_CANCEL => Self::SystemCancel,
            LA_PASSCODE_NOT_SET => Self::PasscodeNotSet,
            LA_BIOMETRY_NOT_AVAILABLE => Self::BiometryNotAvailable,
            LA_BIOMETRY_NOT_ENROLLED => Self::BiometryNotEnrolled,
            LA_BIOMETRY_LOCKOUT => Self::BiometryLockout,
            LA_APP_CANCEL => Self::AppCancel,
            LA_INVALID_CONTEXT => Self::InvalidContext,
            other => Self::Other(other),
        }
    }
}

impl PlatformError {
    /// `NSError.code` of an `LAErrorDomain` error.
    #[must_use]
    pub fn from_ns_code(code: isize) -> Self {
        i64::try_from(code).map_or(Self::NoCode, Self::from)
    }
}

/// The platform side of an authentication attempt.
///
/// `evaluate` is single-shot: the session calls it at most once per attempt
/// and awaits the reply. Dropping the returned future must abandon the
/// evaluation.
pub trait PlatformEvaluator: CapabilityProbe {
    async fn evaluate<S>(&self, reason: S) -> core::result::Result<(), PlatformError>
    where
        S: AsRef<str>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_codes() {
        assert_eq!(PlatformError::from(-8), PlatformError::BiometryLockout);
        assert_eq!(PlatformError::from(-2), PlatformError::UserCancel);
        assert_eq!(PlatformError::from(-10), PlatformError::InvalidContext);
        assert_eq!(PlatformError::from(0), PlatformError::Other(0));
        assert_eq!(PlatformError::from(-1000), PlatformError::Other(-1000));
    }

    #[test]
    fn test_ns_codes() {
        assert_eq!(PlatformError::from_ns_code(-8), PlatformError::BiometryLockout);
        assert_eq!(PlatformError::from_ns_code(-3), PlatformError::UserFallback);
        assert_eq!(PlatformError::from_ns_code(-1004), PlatformError::Other(-1004));
    }

    #[test]
    fn test_display() {
        assert_eq!(PlatformError::UserFallback.to_string(), "UserFallback");
        assert_eq!(PlatformError::Other(42).to_string(), "Other(42)");
    }
}
