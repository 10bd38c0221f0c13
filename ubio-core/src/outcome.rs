use std::fmt::Display;

use crate::reason::ErrorReason;

/// Canonical result of one authentication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(ErrorReason),
    /// Biometrics can't be used on this device right now.
    Unsupported(Option<ErrorReason>),
}

impl Outcome {
    /// `Success` and `Unsupported` both lead to the authenticated screen.
    #[must_use]
    pub fn grants_access(&self) -> bool {
        matches!(self, Self::Success | Self::Unsupported(_))
    }

    /// The message to put in front of the user, if any.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Failure(reason) => Some(reason.message()),
            Self::Success | Self::Unsupported(_) => None,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Failure(reason) => write!(f, "Failure({reason:?})"),
            Self::Unsupported(Some(reason)) => write!(f, "Unsupported({reason:?})"),
            Self::Unsupported(None) => write!(f, "Unsupported"),
        }
    }
}
