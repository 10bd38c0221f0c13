use std::{
    future::{Future, pending},
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::SystemTime,
};

use log::{debug, error, info, warn};
use tokio::{select, sync::watch::Receiver};

use crate::{
    capability::{Capability, CapabilityProbe},
    config::UnavailablePolicy,
    error::{Error, Result},
    outcome::Outcome,
    platform::PlatformEvaluator,
    reason::ErrorReason,
    store::{IS_LOGGED_IN, LoginStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    Pending,
    Completed,
}

/// One request/response cycle against the evaluator.
#[derive(Debug, Clone, Copy)]
pub struct AuthAttempt {
    pub requested_at: SystemTime,
    pub status: AttemptStatus,
    id: u64,
}

//
// Owns the attempt slot for the duration of one attempt. The slot is freed
// on completion or on drop, and only while it still holds this attempt.
//
struct PendingGuard<'a> {
    slot: &'a Mutex<Option<AuthAttempt>>,
    id: u64,
}

impl PendingGuard<'_> {
    fn complete(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(attempt) = slot.as_mut()
            && attempt.id == self.id
        {
            attempt.status = AttemptStatus::Completed;

            if let Ok(elapsed) = attempt.requested_at.elapsed() {
                debug!("attempt completed in {}ms", elapsed.as_millis());
            }

            *slot = None;
        }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(attempt) = slot.as_ref()
            && attempt.id == self.id
        {
            if attempt.status == AttemptStatus::Pending {
                warn!("attempt abandoned while pending");
            }

            *slot = None;
        }
    }
}

/// Runs biometric attempts one at a time and keeps the login flag current.
pub struct AuthenticationSession<E, S> {
    evaluator: E,
    store: S,
    policy: UnavailablePolicy,
    attempt: Mutex<Option<AuthAttempt>>,
    next_id: AtomicU64,
}

impl<E, S> AuthenticationSession<E, S>
where
    E: PlatformEvaluator,
    S: LoginStore,
{
    pub fn new(evaluator: E, store: S) -> Self {
        Self {
            evaluator,
            store,
            policy: UnavailablePolicy::default(),
            attempt: Mutex::new(None),
            next_id: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: UnavailablePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> UnavailablePolicy {
        self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn is_pending(&self) -> bool {
        let slot = self.attempt.lock().unwrap_or_else(PoisonError::into_inner);
        matches!(
            slot.as_ref(),
            Some(AuthAttempt {
                status: AttemptStatus::Pending,
                ..
            })
        )
    }

    /// Run one attempt to completion.
    ///
    /// Fails with [`Error::SessionBusy`] while another attempt is pending and
    /// with [`Error::EmptyReason`] for a blank prompt. Dropping the returned
    /// future cancels the attempt.
    pub async fn begin_attempt<R>(&self, reason: R) -> Result<Outcome>
    where
        R: AsRef<str>,
    {
        self.run_attempt(reason.as_ref(), pending()).await
    }

    /// Same as [`Self::begin_attempt`], resolving [`Error::Cancelled`] once
    /// `cancel` turns `true`.
    pub async fn begin_attempt_cancellable<R>(&self, reason: R, mut cancel: Receiver<bool>) -> Result<Outcome>
    where
        R: AsRef<str>,
    {
        let cancelled = async move {
            //
            // a dropped sender can no longer cancel us
            //
            if cancel.wait_for(|cancelled| *cancelled).await.is_err() {
                pending::<()>().await;
            }
        };

        self.run_attempt(reason.as_ref(), cancelled).await
    }

    /// Clear the login flag. Leaves any pending attempt alone.
    pub fn logout(&self) -> Result<()> {
        info!("logging out");
        self.store.set_bool(IS_LOGGED_IN, false)
    }

    fn claim(&self) -> Result<PendingGuard<'_>> {
        let mut slot = self.attempt.lock().unwrap_or_else(PoisonError::into_inner);

        if slot.is_some() {
            warn!("attempt already pending");
            return Err(Error::SessionBusy);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        *slot = Some(AuthAttempt {
            requested_at: SystemTime::now(),
            status: AttemptStatus::Pending,
            id,
        });

        Ok(PendingGuard {
            slot: &self.attempt,
            id,
        })
    }

    fn fallback(&self, capability: Capability) -> Result<Outcome> {
        match self.policy {
            UnavailablePolicy::Unsupported => {
                info!("biometrics unavailable ({:?})", capability.diagnostic);
                Ok(Outcome::Unsupported(capability.diagnostic))
            }
            UnavailablePolicy::Grant => {
                warn!("biometrics unavailable ({:?}), granting access", capability.diagnostic);
                self.store.set_bool(IS_LOGGED_IN, true)?;
                Ok(Outcome::Success)
            }
        }
    }

    async fn run_attempt<C>(&self, reason: &str, cancelled: C) -> Result<Outcome>
    where
        C: Future<Output = ()>,
    {
        if reason.trim().is_empty() {
            return Err(Error::EmptyReason);
        }

        let guard = self.claim()?;

        let capability = self.evaluator.check_available();

        if !capability.available {
            return self.fallback(capability);
        }

        info!("evaluating \"{reason}\"");

        let reply = select! {
            biased;
            () = cancelled => {
                warn!("attempt cancelled by caller");
                return Err(Error::Cancelled);
            }
            reply = self.evaluator.evaluate(reason) => reply,
        };

        //
        // the slot is free again before the flag is written
        //
        guard.complete();

        match reply {
            Ok(()) => {
                if let Err(e) = self.store.set_bool(IS_LOGGED_IN, true) {
                    error!("unable to persist login ({e})");
                    return Err(e);
                }

                info!("authenticated");
                Ok(Outcome::Success)
            }
            Err(e) => {
                let reason = ErrorReason::from(e);
                warn!("evaluation failed ({e} -> {reason:?})");
                Ok(Outcome::Failure(reason))
            }
        }
    }
}
