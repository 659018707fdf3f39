//! suluforge CLI - Sulu admin entity generator
//!
//! Commands:
//! - `suluforge make` - Generate an entity with repository, controller and admin surface
//! - `suluforge check` - Resolve and print the derived names without writing files

use clap::{Parser, Subcommand};
use suluforge_cli::{check, make};

#[derive(Parser)]
#[command(name = "suluforge")]
#[command(author, version, about = "Entity generator for Sulu-based projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an entity and its admin surface into a host project
    Make(make::MakeOptions),

    /// Print the names a `make` run would derive, without writing anything
    Check(make::MakeOptions),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Make(options) => make::run(&options)?,
        Commands::Check(options) => check::run(&options)?,
    }

    Ok(())
}
