use std::io::Write;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use crate::config::constants::SPINNER_FRAME_MS;

/// Spinner on stderr shown while waiting for the first fragment.
pub struct AnimatedLogger {
    message: String,
    animation_chars: Vec<&'static str>,
    active: Arc<Mutex<bool>>,
    stop_token: CancellationToken,
    task_handle: Option<JoinHandle<()>>,
}

impl AnimatedLogger {
    pub fn new(message: String) -> Self {
        let animation_chars = vec!["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

        Self {
            message,
            animation_chars,
            active: Arc::new(Mutex::new(false)),
            stop_token: CancellationToken::new(),
            task_handle: None,
        }
    }

    pub fn start(&mut self) {
        if let Ok(mut active) = self.active.lock() {
            *active = true;
        }

        let message = self.message.clone();
        let animation_chars = self.animation_chars.clone();
        let active = Arc::clone(&self.active);
        let stop_token = self.stop_token.clone();

        let handle = tokio::spawn(async move {
            let mut frame = 0;
            let mut interval = tokio::time::interval(tokio::time::Duration::from_millis(SPINNER_FRAME_MS));

            loop {
                tokio::select! {
                    _ = stop_token.cancelled() => break,
                    _ = interval.tick() => {
                        // The lock keeps a frame from landing after stop() cleared the line.
                        let Ok(guard) = active.lock() else { break };
                        if !*guard {
                            break;
                        }
                        eprint!("\r{} {} ", message, animation_chars[frame]);
                        let _ = std::io::stderr().flush();
                        frame = (frame + 1) % animation_chars.len();
                    }
                }
            }
        });

        self.task_handle = Some(handle);
    }

    pub fn is_running(&self) -> bool {
        self.active.lock().map(|active| *active).unwrap_or(false)
    }

    /// Clears the spinner line. Safe to call more than once.
    pub fn stop(&mut self) {
        if let Ok(mut active) = self.active.lock() {
            if *active {
                *active = false;
                eprint!("\r\x1b[K");
                let _ = std::io::stderr().flush();
            }
        }
        self.stop_token.cancel();
        self.task_handle.take();
    }

    pub fn error(&mut self, error_message: &str) {
        self.stop();
        eprintln!("❌ {}", error_message);
    }
}

impl Drop for AnimatedLogger {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stop_is_idempotent() {
        let mut spinner = AnimatedLogger::new("Waiting".to_string());
        spinner.start();
        assert!(spinner.is_running());

        spinner.stop();
        spinner.stop();
        assert!(!spinner.is_running());
    }
}
