use std::path::PathBuf;

use clap::Parser;

/// Runs the money-muling detection pipeline over a batch of transaction
/// rows and prints the result document as JSON.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Path to a JSON file containing an array of transaction rows.
    /// Reads from stdin when omitted.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Pretty-print the result JSON.
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
