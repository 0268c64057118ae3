pub mod commands;
pub mod chat_purpose;
pub mod flush_policy;
pub mod gateway_error;
pub mod line_outcome;
pub mod stream_end;
