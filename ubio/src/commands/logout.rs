use anyhow::Result;
use ubio_core::config::UbioConfig;

use crate::common::{Screen, new_session};

pub fn command_logout(config: &UbioConfig) -> Result<()> {
    let session = new_session(config)?;

    session.logout()?;

    println!("{}", Screen::Register);

    Ok(())
}
