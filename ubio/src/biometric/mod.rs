use log::{info, warn};
use ubio_core::{
    capability::{Capability, CapabilityProbe},
    config::HelperConfig,
    platform::{PlatformError, PlatformEvaluator},
};

mod helper;
#[cfg(target_os = "macos")]
mod macos;
mod no_op;

pub use helper::HelperEvaluator;
#[cfg(target_os = "macos")]
pub use macos::LocalAuthEvaluator;
pub use no_op::NoOpEvaluator;

/// The evaluator picked for this machine.
pub enum Backend {
    Helper(HelperEvaluator),
    #[cfg(target_os = "macos")]
    LocalAuth(LocalAuthEvaluator),
    NoOp(NoOpEvaluator),
}

impl Backend {
    /// An explicitly configured helper always wins, then the native API,
    /// then a helper found on PATH.
    #[must_use]
    pub fn select(config: &HelperConfig) -> Self {
        if let Some(path) = &config.path {
            info!("using helper {}", path.display());
            return Self::Helper(HelperEvaluator::new(path));
        }

        Self::native()
    }

    #[cfg(target_os = "macos")]
    fn native() -> Self {
        info!("using LocalAuthentication");
        Self::LocalAuth(LocalAuthEvaluator)
    }

    #[cfg(not(target_os = "macos"))]
    fn native() -> Self {
        let helper = HelperEvaluator::default();

        match helper.locate() {
            Ok(path) => {
                info!("using helper {}", path.display());
                Self::Helper(helper)
            }
            Err(e) => {
                warn!("no biometric backend ({e})");
                Self::NoOp(NoOpEvaluator)
            }
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Helper(_) => "helper",
            #[cfg(target_os = "macos")]
            Self::LocalAuth(_) => "localauthentication",
            Self::NoOp(_) => "no-op",
        }
    }
}

impl CapabilityProbe for Backend {
    fn check_available(&self) -> Capability {
        match self {
            Self::Helper(helper) => helper.check_available(),
            #[cfg(target_os = "macos")]
            Self::LocalAuth(local) => local.check_available(),
            Self::NoOp(no_op) => no_op.check_available(),
        }
    }
}

impl PlatformEvaluator for Backend {
    async fn evaluate<S>(&self, reason: S) -> core::result::Result<(), PlatformError>
    where
        S: AsRef<str>,
    {
        match self {
            Self::Helper(helper) => helper.evaluate(reason).await,
            #[cfg(target_os = "macos")]
            Self::LocalAuth(local) => local.evaluate(reason).await,
            Self::NoOp(no_op) => no_op.evaluate(reason).await,
        }
    }
}
