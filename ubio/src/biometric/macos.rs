use std::sync::{Mutex, PoisonError};

use block2::RcBlock;
use log::{error, info, warn};
use objc2::{rc::Retained, runtime::Bool};
use objc2_foundation::{NSError, NSString};
use objc2_local_authentication::{LAContext, LAPolicy};
use tokio::sync::oneshot;
use ubio_core::{
    capability::{Capability, CapabilityProbe},
    platform::{PlatformError, PlatformEvaluator},
};

const POLICY: LAPolicy = LAPolicy::DeviceOwnerAuthenticationWithBiometrics;

type Reply = core::result::Result<(), PlatformError>;

/// Touch ID through LocalAuthentication.
pub struct LocalAuthEvaluator;

//
// Invalidates the context when the attempt future goes away, which makes the
// system dismiss a prompt that is still up.
//
struct ContextGuard(Retained<LAContext>);

impl Drop for ContextGuard {
    fn drop(&mut self) {
        unsafe { self.0.invalidate() };
    }
}

fn platform_error(err: &NSError) -> PlatformError {
    let code = err.code();
    info!("LocalAuthentication error {code}");
    PlatformError::from_ns_code(code)
}

impl CapabilityProbe for LocalAuthEvaluator {
    fn check_available(&self) -> Capability {
        let context = unsafe { LAContext::new() };

        let ret = unsafe { context.canEvaluatePolicy_error(POLICY) };

        Capability::from_check(ret.map_err(|e| platform_error(&e)))
    }
}

impl PlatformEvaluator for LocalAuthEvaluator {
    async fn evaluate<S>(&self, reason: S) -> Reply
    where
        S: AsRef<str>,
    {
        let (tx, rx) = oneshot::channel::<Reply>();
        let tx = Mutex::new(Some(tx));

        let reply = RcBlock::new(move |success: Bool, err: *mut NSError| {
            let ret = if success.as_bool() {
                Ok(())
            } else {
                match unsafe { err.as_ref() } {
                    Some(err) => Err(platform_error(err)),
                    None => Err(PlatformError::NoCode),
                }
            };

            let tx = tx.lock().unwrap_or_else(PoisonError::into_inner).take();

            if let Some(tx) = tx
                && tx.send(ret).is_err()
            {
                warn!("LocalAuthentication replied after the attempt ended");
            }
        });

        let context = ContextGuard(unsafe { LAContext::new() });
        let localized_reason = NSString::from_str(reason.as_ref());

        unsafe {
            context
                .0
                .evaluatePolicy_localizedReason_reply(POLICY, &localized_reason, &reply);
        }

        match rx.await {
            Ok(v) => v,
            Err(e) => {
                error!("LocalAuthentication dropped the reply ({e})");
                Err(PlatformError::NoCode)
            }
        }
    }
}
