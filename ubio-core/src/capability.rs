use log::warn;

use crate::{platform::PlatformError, reason::ErrorReason};

/// Whether biometric evaluation can run right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    pub available: bool,
    pub diagnostic: Option<ErrorReason>,
}

impl Capability {
    #[must_use]
    pub fn available() -> Self {
        Self {
            available: true,
            diagnostic: None,
        }
    }

    #[must_use]
    pub fn unavailable(diagnostic: Option<ErrorReason>) -> Self {
        Self {
            available: false,
            diagnostic,
        }
    }

    /// Fold the result of a platform check into a capability.
    ///
    /// A failing check is never fatal, it just means the sensor can't be used.
    #[must_use]
    pub fn from_check(ret: core::result::Result<(), PlatformError>) -> Self {
        match ret {
            Ok(()) => Self::available(),
            Err(e) => {
                warn!("capability check failed ({e})");
                Self::unavailable(Some(e.into()))
            }
        }
    }
}

/// Cheap, side-effect free query of the platform's biometric state.
///
/// Implementations must not prompt the user and must tolerate concurrent
/// calls.
pub trait CapabilityProbe {
    fn check_available(&self) -> Capability;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_check() {
        assert_eq!(Capability::from_check(Ok(())), Capability::available());

        let cap = Capability::from_check(Err(PlatformError::InvalidContext));
        assert!(!cap.available);
        assert_eq!(cap.diagnostic, Some(ErrorReason::InvalidContext));

        let cap = Capability::from_check(Err(PlatformError::BiometryLockout));
        assert_eq!(cap, Capability::unavailable(Some(ErrorReason::SensorLockout)));
    }
}
