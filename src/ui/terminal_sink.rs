use std::io::{self, Write};
use crate::enums::stream_end::StreamEnd;
use crate::logger::animated_logger::AnimatedLogger;
use crate::structs::stream_result::StreamResult;
use crate::traits::stream_sink::StreamSink;

/// Prints fragments to stdout as they arrive.
pub struct TerminalSink {
    spinner: Option<AnimatedLogger>,
    wrote_any: bool,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self { spinner: None, wrote_any: false }
    }

    pub fn with_spinner(message: &str) -> Self {
        let mut spinner = AnimatedLogger::new(message.to_string());
        spinner.start();
        Self { spinner: Some(spinner), wrote_any: false }
    }

    fn stop_spinner(&mut self) {
        if let Some(mut spinner) = self.spinner.take() {
            spinner.stop();
        }
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamSink for TerminalSink {
    fn on_fragment(&mut self, fragment: &str) {
        self.stop_spinner();
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(fragment.as_bytes());
        let _ = stdout.flush();
        self.wrote_any = true;
    }

    fn on_complete(&mut self, result: &StreamResult) {
        self.stop_spinner();
        if self.wrote_any {
            println!();
        }
        match result.end {
            StreamEnd::Cancelled => eprintln!("🛑 Cancelled"),
            StreamEnd::EndOfStream if result.discarded_bytes > 0 => {
                eprintln!("⚠️ Stream closed early, {} bytes were incomplete", result.discarded_bytes);
            }
            _ => {}
        }
    }
}
