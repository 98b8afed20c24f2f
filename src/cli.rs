use clap::Parser;
use std::path::PathBuf;

/// Flappy Bird in the terminal.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// RON file overriding the built-in tuning.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Seed for pipe placement. Random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write logs here. The terminal belongs to the game, so nothing is logged without it.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
    /// Run without sound.
    #[arg(long)]
    pub mute: bool,
}
