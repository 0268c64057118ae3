use std::path::PathBuf;
use clap::Subcommand;
use crate::config::constants::DEFAULT_REPLAY_CHUNK_SIZE;
use crate::enums::chat_purpose::ChatPurpose;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a sample configuration file
    Init,
    /// Check the configuration for problems
    Validate,
    /// Stream a reply from the gateway
    Chat {
        #[clap(short, long, value_enum, default_value_t = ChatPurpose::ProjectChat)]
        purpose: ChatPurpose,
        #[clap(short, long)]
        model: Option<String>,
        /// Omit to start an interactive session
        prompt: Option<String>,
    },
    /// Replay a captured SSE transcript through the decoder
    Decode {
        file: PathBuf,
        #[clap(short, long, default_value_t = DEFAULT_REPLAY_CHUNK_SIZE)]
        chunk_size: usize,
    },
}
