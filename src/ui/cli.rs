use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "static-tv",
    version,
    about = "A haunted television set for the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Override the data directory (defaults to the platform data dir)
    #[arg(long, env = "STATIC_TV_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the log directory (defaults to `{data_dir}/logs`)
    #[arg(long, env = "STATIC_TV_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Override the log filter (equivalent to setting RUST_LOG)
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,

    /// Override the audio asset directory (defaults to `{data_dir}/audio`)
    #[arg(long, env = "STATIC_TV_ASSETS_DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Run without opening an audio device
    #[arg(long)]
    pub no_audio: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the TUI (default)
    Tui,

    /// Non-interactive check: list the audio assets the set expects
    CheckAssets,
}
