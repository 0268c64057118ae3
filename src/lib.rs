//! Incremental decoder for OpenAI-style Server-Sent-Events completion
//! streams, plus the gateway client and chat session built on it.
//!
//! ```no_run
//! use codilla_stream::services::stream_reader::{replay_stream, StreamReader};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn demo() -> codilla_stream::errors::CodillaResult<()> {
//! let body = b"data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n\ndata: [DONE]\n\n";
//! let mut fragments: Vec<String> = Vec::new();
//! let result = StreamReader::default()
//!     .read(replay_stream(body, 8), &CancellationToken::new(), &mut fragments)
//!     .await?;
//! assert_eq!(result.text, "Hi");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod enums;
pub mod errors;
pub mod helpers;
pub mod logger;
pub mod prompts;
pub mod services;
pub mod structs;
pub mod traits;
pub mod ui;
pub mod workers;
