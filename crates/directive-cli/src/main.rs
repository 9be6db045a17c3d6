//! Directives CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use directive_cli::cli::Cli;
use directive_cli::commands;

fn main() {
    // Load .env.local if it exists (for DIRECTIVES_FILE etc.)
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();

    let file = cli.prompts_file();
    let result = commands::execute(cli.command, &file, cli.api.as_deref());

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
