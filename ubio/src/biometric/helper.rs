use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use anyhow::{Result, bail};
use log::{error, info, warn};
use tokio::process::Command;
use ubio_core::{
    capability::{Capability, CapabilityProbe},
    platform::{PlatformError, PlatformEvaluator},
};
use which::which;

const DEFAULT_HELPER: &str = "ubio-verify";

/// Biometric check delegated to an external verifier.
///
/// The verifier gets the prompt as its only argument and answers on stdout:
/// `1` or `ok` for a match, otherwise a LocalAuthentication error code. A
/// match only counts when the verifier also exits with success.
pub struct HelperEvaluator {
    program: PathBuf,
}

impl Default for HelperEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_HELPER)
    }
}

impl HelperEvaluator {
    pub fn new<P>(program: P) -> Self
    where
        P: AsRef<Path>,
    {
        Self {
            program: program.as_ref().to_path_buf(),
        }
    }

    pub fn locate(&self) -> Result<PathBuf> {
        if self.program.components().count() > 1 {
            if self.program.is_file() {
                return Ok(self.program.clone());
            }
            bail!("{} not found", self.program.display());
        }

        match which(&self.program) {
            Ok(v) => Ok(v),
            Err(e) => bail!("{} not found on PATH ({e})", self.program.display()),
        }
    }
}

fn parse_reply(stdout: &str) -> core::result::Result<(), PlatformError> {
    let reply = stdout.trim();

    if reply == "1" || reply.eq_ignore_ascii_case("ok") {
        return Ok(());
    }

    match reply.parse::<i64>() {
        Ok(code) => Err(PlatformError::from(code)),
        Err(_) => {
            warn!("unrecognised helper reply \"{reply}\"");
            Err(PlatformError::NoCode)
        }
    }
}

impl CapabilityProbe for HelperEvaluator {
    fn check_available(&self) -> Capability {
        let ret = self.locate().map(|_| ()).map_err(|e| {
            info!("{e}");
            PlatformError::BiometryNotAvailable
        });

        Capability::from_check(ret)
    }
}

impl PlatformEvaluator for HelperEvaluator {
    async fn evaluate<S>(&self, reason: S) -> core::result::Result<(), PlatformError>
    where
        S: AsRef<str>,
    {
        let program = match self.locate() {
            Ok(v) => v,
            Err(e) => {
                error!("{e}");
                return Err(PlatformError::BiometryNotAvailable);
            }
        };

        info!("executing {}", program.display());

        let ret = Command::new(&program)
            .arg(reason.as_ref())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await;

        let out = match ret {
            Ok(v) => v,
            Err(e) => {
                error!("{} failed with {e}", program.display());
                return Err(PlatformError::BiometryNotAvailable);
            }
        };

        let reply = match String::from_utf8(out.stdout) {
            Ok(stdout) => parse_reply(&stdout),
            Err(e) => {
                error!("invalid helper output ({e})");
                Err(PlatformError::NoCode)
            }
        };

        //
        // a failed verifier never counts as a match, its code still does
        //
        if !out.status.success() {
            warn!("{} exited with {}", program.display(), out.status);

            if reply.is_ok() {
                return Err(PlatformError::NoCode);
            }
        }

        reply
    }
}
