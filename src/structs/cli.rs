use std::path::PathBuf;
use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser, Debug)]
#[clap(name = "codilla")]
#[clap(about = "Streaming chat client for the Codilla.ai gateway", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/codilla/config.toml
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}
