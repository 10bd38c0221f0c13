use ubio_core::{
    capability::{Capability, CapabilityProbe},
    platform::{PlatformError, PlatformEvaluator},
    reason::ErrorReason,
};

/// No sensor on this platform.
pub struct NoOpEvaluator;

impl CapabilityProbe for NoOpEvaluator {
    fn check_available(&self) -> Capability {
        Capability::unavailable(Some(ErrorReason::SensorUnavailable))
    }
}

impl PlatformEvaluator for NoOpEvaluator {
    async fn evaluate<S>(&self, _reason: S) -> core::result::Result<(), PlatformError>
    where
        S: AsRef<str>,
    {
        Err(PlatformError::BiometryNotAvailable)
    }
}
