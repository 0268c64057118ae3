pub mod ai;
pub mod cli;
pub mod config;
pub mod finish_report;
pub mod stream_item;
pub mod stream_result;
pub mod stream_session;
