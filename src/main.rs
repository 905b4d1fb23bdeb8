//! stackup - stacked pull requests for git
//!
//! CLI binary for submitting branch stacks as pull requests.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "stackup")]
#[command(about = "Stacked pull requests for git")]
#[command(version)]
struct Cli {
    /// Path to git repository (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with the stack containing the current branch
    Stack {
        #[command(subcommand)]
        action: StackAction,
    },
}

#[derive(Subcommand)]
enum StackAction {
    /// Create pull requests for every branch in the stack
    ///
    /// With --current, only the current branch and the branches below it
    /// are submitted.
    Submit {
        /// Remote to submit to (defaults to origin, then the first remote)
        #[arg(long)]
        remote: Option<String>,

        /// Only submit up to the current branch
        #[arg(long)]
        current: bool,

        /// Create pull requests in draft mode
        #[arg(long)]
        draft: bool,
    },

    /// Show the stack and its pull requests
    Tree,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "stackup=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let path = cli.path.unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Commands::Stack { action } => match action {
            StackAction::Submit {
                remote,
                current,
                draft,
            } => {
                cli::run_submit(&path, remote.as_deref(), current, draft).await?;
            }
            StackAction::Tree => {
                cli::run_tree(&path)?;
            }
        },
    }

    Ok(())
}
