use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;
mod tasks;
pub mod ux_error;

use commands::{Cli, Commands, ProjectContext};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ux_error::UxError>() {
                Some(ux) => ux.display(),
                None => output::error(&format!("{err:#}"))
            }
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let ctx = ProjectContext::new(cli.project, cli.config);

    match cli.command {
        None | Some(Commands::Menu) => commands::menu::run(&ctx).await,
        Some(Commands::Run(args)) => commands::run::run(args, &ctx).await,
        Some(Commands::Open(args)) => commands::open::run(args, &ctx).await,
        Some(Commands::Config(cmd)) => commands::config::run(cmd, &ctx),
        Some(Commands::Completion(args)) => commands::completion::run(args)
    }
}
