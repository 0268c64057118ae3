pub mod ai_provider;
pub mod stream_sink;
