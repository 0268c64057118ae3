pub mod terminal_sink;
