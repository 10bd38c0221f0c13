use anyhow::Result;
use ubio_core::config::UbioConfig;

use crate::common::{initial_screen, open_store};

pub fn command_status(config: &UbioConfig) -> Result<()> {
    let store = open_store(config)?;

    println!("{}", initial_screen(&store));

    Ok(())
}
