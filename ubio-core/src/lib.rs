//! Single-attempt biometric login state machine.
//!
//! [`session::AuthenticationSession`] checks the platform, runs exactly one
//! biometric evaluation per user action, folds the platform reply into an
//! [`outcome::Outcome`] and keeps the durable `isLoggedIn` flag in step.

pub mod capability;
pub mod config;
pub mod error;
pub mod outcome;
pub mod platform;
pub mod reason;
pub mod session;
pub mod store;
