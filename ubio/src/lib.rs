pub mod biometric;
pub mod commands;
pub mod common;
