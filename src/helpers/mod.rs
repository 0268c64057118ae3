pub mod config_helper;
pub mod utf8_decoder;
