pub mod chat_session;
pub mod command_runner;
