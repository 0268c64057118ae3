pub mod config;
pub mod gateway_config;
pub mod stream_config;
