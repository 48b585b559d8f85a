use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use codeowners_diff::{compare, render_lines, GitRepo, WORKTREE};

/// Summarize which files change ownership between two revisions.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Revision to compare from
    #[arg(default_value = "main")]
    base_ref: String,

    /// Revision to compare to; WORKTREE means the uncommitted working tree
    #[arg(default_value = WORKTREE)]
    head_ref: String,

    /// Git repository to run in (default: discovered from the current directory)
    #[clap(short = 'r', long = "repo-root")]
    repo_root: Option<PathBuf>,

    /// Maximum number of table rows to print
    #[arg(short = 'l', long)]
    limit: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let repo = match &cli.repo_root {
        Some(root) => GitRepo::at(root),
        None => GitRepo::discover()?,
    };

    let diff = compare(&repo, &cli.base_ref, &cli.head_ref)?;
    for line in render_lines(&diff, cli.limit) {
        println!("{line}");
    }

    Ok(())
}
