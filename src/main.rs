mod case;
mod config;
mod data;
mod dictionary;
mod diff;
mod error;
mod swap;
mod text;

use clap::{Parser, Subcommand};
use config::load_config;
use std::error::Error as _;

#[derive(Parser)]
#[command(
    name = "wordswap",
    about = "Case-preserving whole-word dictionary replacement over JSON text entries"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace dictionary words in every entry and save the changed ones (default)
    Run,
    /// Show word-level differences between the input and the last output
    Diff,
}

fn report(e: &error::Error) {
    eprintln!("Error: {e}");
    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = load_config();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => swap::run(&config).map(|_| ()),
        Commands::Diff => diff::show(&config),
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }
}
