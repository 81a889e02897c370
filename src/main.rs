use anyhow::Context;
use clap::Parser;
use electroscan::cli::{Cli, Commands, ServeCommand};
use electroscan::config::AppSettings;
use electroscan::output;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let settings = AppSettings::resolve(cli.config.as_deref()).context("loading settings")?;

    let result = match &cli.command {
        Some(Commands::Scan(cmd)) => cmd.execute(&settings, cli.verbose, cli.quiet).await,
        Some(Commands::Decode(cmd)) => cmd.execute(),
        Some(Commands::Serve(cmd)) => cmd.execute(&settings).await,
        None => ServeCommand::default().execute(&settings).await,
    };

    if let Err(e) = result {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise the verbosity flags pick the level.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
