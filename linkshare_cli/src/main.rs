mod cli;
pub mod errors;
mod handlers;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use crate::cli::{Cli, Commands};
use crate::errors::CliError;
use crate::handlers::init::handle_init;
use crate::handlers::share::handle_share;
use crate::handlers::shares::handle_shares;
use crate::handlers::track::handle_track;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Init {
            server_url,
            username,
        } => handle_init(&cli.dir, &server_url, &username),
        Commands::Track {
            remote_path,
            encrypted_path,
        } => handle_track(&cli.dir, &remote_path, encrypted_path.as_deref()),
        Commands::Share {
            remote_path,
            password,
            permissions,
        } => handle_share(&cli.dir, &remote_path, password, permissions),
        Commands::Shares { path } => handle_shares(&cli.dir, path.as_deref()),
    }
}
