use anyhow::{Result, bail};
use clap::Args;
use log::{info, warn};
use tokio::{
    signal,
    sync::watch::{self, Receiver},
};
use ubio_core::{
    config::UbioConfig,
    error::Error,
    outcome::Outcome,
    platform::PlatformEvaluator,
    session::AuthenticationSession,
    store::LoginStore,
};

use crate::common::{Screen, initial_screen, new_session};

#[derive(Args)]
pub struct LoginArgs {
    /// prompt shown by the verifier
    #[arg(short, long)]
    pub reason: Option<String>,

    /// force
    #[arg(short, long)]
    pub force: bool,
}

/// One login action: returns the screen to land on, or the alert text as an
/// error.
pub async fn run_login<E, S>(
    session: &AuthenticationSession<E, S>,
    reason: &str,
    force: bool,
    cancel: Receiver<bool>,
) -> Result<Screen>
where
    E: PlatformEvaluator,
    S: LoginStore,
{
    //
    // unless force is specified, an existing login skips the prompt
    //
    if !force && initial_screen(session.store()) == Screen::Authenticated {
        info!("already authenticated");
        return Ok(Screen::Authenticated);
    }

    let outcome = match session.begin_attempt_cancellable(reason, cancel).await {
        Ok(v) => v,
        Err(Error::Cancelled) => bail!("Login cancelled"),
        Err(e) => return Err(e.into()),
    };

    if outcome.grants_access() {
        if let Outcome::Unsupported(diagnostic) = outcome {
            warn!("biometrics unsupported ({diagnostic:?})");
        }
        return Ok(Screen::Authenticated);
    }

    match outcome.message() {
        Some(message) => bail!("{message}"),
        None => bail!("{outcome}"),
    }
}

pub async fn command_login(config: &UbioConfig, args: LoginArgs) -> Result<()> {
    let session = new_session(config)?;

    let reason = args.reason.as_deref().unwrap_or(&config.auth.reason);

    let (cancel_tx, cancel_rx) = watch::channel(false);

    let interrupt = tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("interrupted");
            let _ = cancel_tx.send(true);
        }
    });

    let ret = run_login(&session, reason, args.force, cancel_rx).await;

    interrupt.abort();

    println!("{}", ret?);

    Ok(())
}
