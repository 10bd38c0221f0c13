use std::path::PathBuf;

use clap::{Parser, Subcommand};

use anyhow::Result;
use log::LevelFilter;

use ubio::commands::{
    login::{LoginArgs, command_login},
    logout::command_logout,
    status::command_status,
};
use ubio_core::config::UbioConfig;

#[derive(Subcommand)]
pub enum Commands {
    /// Authenticate with biometrics
    Login(LoginArgs),
    /// Clear the login flag
    Logout,
    /// Show the screen selected by the login flag
    Status,
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct UserArgs {
    /// verbose
    #[arg(short, long)]
    pub verbose: bool,

    /// config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Command
    #[command(subcommand)]
    pub command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = UserArgs::parse();

    let log_level = if args.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Error
    };

    env_logger::Builder::new().filter_level(log_level).init();

    let config = UbioConfig::load(args.config.as_deref())?;

    match args.command {
        Commands::Login(login) => command_login(&config, login).await?,
        Commands::Logout => command_logout(&config)?,
        Commands::Status => command_status(&config)?,
    }

    Ok(())
}
