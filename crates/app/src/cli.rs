use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{
    check,
    config::{GeometryArgs, ServeArgs, SiteConfig},
    server, telemetry,
};

#[derive(Debug, Parser)]
#[command(
    name = "portfolio",
    version,
    about = "Personal site with an interactive map of California's House delegation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the site over HTTP.
    Serve(ServeArgs),
    /// Validate the bundled district dataset and its join with the boundaries.
    Check(GeometryArgs),
}

pub fn handle_commands(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve(args) => {
            let config = SiteConfig::try_from(args)?;
            let _telemetry = telemetry::init(&config.telemetry);
            server::run(config)
        }
        Command::Check(args) => {
            let _telemetry = telemetry::init(&Default::default());
            let report = check::run_check(args.try_into()?)?;
            print!("{report}");
            if report.is_clean() {
                Ok(())
            } else {
                anyhow::bail!("district dataset failed validation")
            }
        }
    }
}
