pub mod ai_providers;
pub mod stream_decoder;
pub mod stream_reader;
