mod cli;

use clap::Parser;
use cli::Cli;
use colored::Colorize;
use std::io::IsTerminal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter_layer = if cli.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("info")
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    info!("hfsearch v{}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = cli::run(cli) {
        eprintln!("{}", format!("Error: {:#}", err).red());
        std::process::exit(1);
    }
}
