mod init;
mod render;
mod search;
mod session;
mod status;
mod venues;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "matcha-finder")]
#[command(about = "Find nearby cafés serving matcha and see what reviewers say about it")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Show detailed progress
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize matcha-finder in a directory
    Init(init::InitArgs),

    /// Discover cafés around a location and filter them interactively
    Search(search::SearchArgs),

    /// List stored venues, optionally filtered
    Venues(venues::VenuesArgs),

    /// Show store status and statistics
    Status(status::StatusArgs),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let output = OutputConfig {
            json: self.json,
            quiet: self.quiet,
            verbose: self.verbose,
        };

        match self.command {
            Commands::Init(args) => init::run(args, output),
            Commands::Search(args) => search::run(args, output).await,
            Commands::Venues(args) => venues::run(args, output),
            Commands::Status(args) => status::run(args, output),
        }
    }
}

/// Output configuration passed to all commands
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    pub verbose: bool,
}
