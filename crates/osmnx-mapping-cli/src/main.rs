use std::env;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use osmnx_mapping_cli::commands::render;
use osmnx_mapping_cli::config::load_config;
use osmnx_mapping_cli::debug::{debug_info_requested, print_debug_info};
use osmnx_mapping_cli::{Cli, Commands};

fn exit_with(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    // `--debug-info` exits before the rest of the command line is validated.
    if debug_info_requested(env::args_os()) {
        return exit_with(print_debug_info());
    }

    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: could not install log subscriber: {e}");
    }

    match &cli.command {
        None => {
            println!("{cli:?}");
            ExitCode::SUCCESS
        }
        Some(Commands::Render(args)) => exit_with((|| -> anyhow::Result<()> {
            let config = load_config(cli.config.as_deref())?;
            render::handle(args, &config)?;
            info!("Render command successful!");
            Ok(())
        })()),
    }
}
