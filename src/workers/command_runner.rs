use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use crate::config::config_manager::ConfigManager;
use crate::enums::chat_purpose::ChatPurpose;
use crate::enums::commands::Commands;
use crate::errors::{CodillaError, CodillaResult, ResultExt};
use crate::services::ai_providers::gateway::GatewayProvider;
use crate::services::stream_reader::{replay_stream, StreamReader};
use crate::structs::config::config::Config;
use crate::structs::stream_result::StreamResult;
use crate::traits::ai_provider::AiProvider;
use crate::ui::terminal_sink::TerminalSink;
use crate::workers::chat_session::ChatSession;

pub struct CommandRunner {
    config_path: Option<PathBuf>,
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            start_time: None,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> CodillaResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command(),
            Commands::Validate => self.validate_command(),
            Commands::Chat { purpose, model, prompt } => self.chat_command(purpose, model, prompt).await,
            Commands::Decode { file, chunk_size } => self.decode_command(&file, chunk_size).await.map(|_| ()),
        };

        if let Some(start) = self.start_time {
            log::debug!("⏱️  Command completed in {:.2}s", start.elapsed().as_secs_f64());
        }

        result
    }

    fn init_command(&self) -> CodillaResult<()> {
        log::info!("🚀 Initializing codilla configuration...");

        let path = ConfigManager::create_sample_config(self.config_path.as_deref())?;
        log::info!("📝 Set ${} and edit {} if needed.", crate::config::constants::CODILLA_API_KEY_ENV, path.display());
        log::info!("🔧 Run 'codilla validate' to check your configuration.");
        Ok(())
    }

    fn validate_command(&self) -> CodillaResult<()> {
        let config = self.load_config()?;

        match ConfigManager::validate_config(&config) {
            Ok(()) => {
                log::info!("✅ Configuration is valid");
                if ConfigManager::resolve_api_key(&config).is_err() {
                    log::warn!("⚠️ ${} is not set; chat will fail until it is", config.gateway.api_key_env);
                }
                Ok(())
            }
            Err(problems) => {
                for problem in &problems {
                    log::error!("❌ {}", problem);
                }
                Err(CodillaError::MultipleErrors {
                    errors: problems
                        .iter()
                        .map(|p| CodillaError::config_error(p, None, None))
                        .collect(),
                    context: "configuration validation".to_string(),
                })
            }
        }
    }

    async fn chat_command(&self, purpose: ChatPurpose, model: Option<String>, prompt: Option<String>) -> CodillaResult<()> {
        let config = self.load_config()?;
        ConfigManager::validate_config(&config).map_err(|problems| {
            CodillaError::config_error(&problems.join("; "), None, Some("Run 'codilla validate' for details"))
        })?;

        let api_key = ConfigManager::resolve_api_key(&config)?;
        let mut provider = GatewayProvider::new(api_key, &config.gateway)?;
        if let Some(model) = model {
            provider = provider.with_model(model);
        }

        let mut session = ChatSession::new(provider, purpose, config.stream.clone())
            .with_temperature(config.gateway.temperature);

        let (mut interrupts, watcher) = spawn_interrupt_watcher();
        let result = match prompt {
            Some(prompt) => Self::interruptible_turn(&mut session, &prompt, &mut interrupts)
                .await
                .map(|_| ()),
            None => {
                log::info!(
                    "🗨️  {} session started. Empty line, Ctrl-D or Ctrl-C at the prompt quits; Ctrl-C during a reply cancels it.",
                    session.purpose().label()
                );
                let mut lines = BufReader::new(tokio::io::stdin()).lines();
                Self::prompt_loop(&mut session, &mut lines, &mut interrupts).await
            }
        };
        watcher.abort();
        result
    }

    async fn prompt_loop<P, R>(
        session: &mut ChatSession<P>,
        lines: &mut Lines<R>,
        interrupts: &mut UnboundedReceiver<()>,
    ) -> CodillaResult<()>
    where
        P: AiProvider,
        R: AsyncBufRead + Unpin,
    {
        loop {
            eprint!("> ");
            let line = tokio::select! {
                line = lines.next_line() => line.with_operation("read prompt")?,
                Some(()) = interrupts.recv() => {
                    eprintln!();
                    log::info!("👋 Interrupted at the prompt, leaving chat");
                    break;
                }
            };
            let Some(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                break;
            }

            // One failed turn should not end the conversation.
            if let Err(e) = Self::interruptible_turn(session, &line, interrupts).await {
                crate::errors::ErrorHandler::handle_error(&e);
            }
        }

        Ok(())
    }

    /// Streams one reply; an interrupt cancels it and waits for the reader to wind down.
    async fn interruptible_turn<P: AiProvider>(
        session: &mut ChatSession<P>,
        prompt: &str,
        interrupts: &mut UnboundedReceiver<()>,
    ) -> CodillaResult<StreamResult> {
        let cancel = CancellationToken::new();
        let mut sink = TerminalSink::with_spinner("Thinking");
        let turn = session.send(prompt, &cancel, &mut sink);
        tokio::pin!(turn);

        tokio::select! {
            result = &mut turn => result,
            Some(()) = interrupts.recv() => {
                cancel.cancel();
                turn.await
            }
        }
    }

    /// Replays a captured response body through the decoder.
    pub async fn decode_command(&self, file: &Path, chunk_size: usize) -> CodillaResult<StreamResult> {
        if chunk_size == 0 {
            return Err(CodillaError::user_input_error("0", "a chunk size of at least 1", "Pass --chunk-size 64"));
        }

        let config = self.load_config()?;
        let bytes = tokio::fs::read(file).await.with_operation(&format!("read {}", file.display()))?;
        log::info!("🔍 Replaying {} bytes from {} in {}-byte chunks", bytes.len(), file.display(), chunk_size);

        let reader = StreamReader::new(config.stream.clone());
        let mut sink = TerminalSink::new();
        let result = reader
            .read(replay_stream(&bytes, chunk_size), &CancellationToken::new(), &mut sink)
            .await?;

        log::info!(
            "📊 {} fragments, {} chars, ended by {}{}",
            result.fragments,
            result.text.chars().count(),
            result.end.label(),
            result.finish_reason.as_deref().map(|r| format!(", finish reason '{}'", r)).unwrap_or_default()
        );
        if result.discarded_bytes > 0 {
            log::warn!("⚠️ {} trailing bytes were not delivered", result.discarded_bytes);
        }

        Ok(result)
    }

    fn load_config(&self) -> CodillaResult<Config> {
        ConfigManager::load(self.config_path.as_deref())
    }
}

/// Forwards every Ctrl-C to the chat loop. The handler stays installed for
/// the rest of the process, so the loop must also act on interrupts while idle.
fn spawn_interrupt_watcher() -> (UnboundedReceiver<()>, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if tx.send(()).is_err() {
                break;
            }
        }
    });
    (rx, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures::{stream, StreamExt};
    use std::time::Duration;
    use crate::enums::gateway_error::GatewayError;
    use crate::enums::stream_end::StreamEnd;
    use crate::structs::config::stream_config::StreamConfig;
    use crate::traits::ai_provider::{ByteStream, MockAiProvider};
    use tempfile::TempDir;

    const ONE_DELTA: &[u8] = b"data: {\"choices\":[{\"delta\":{\"content\":\"one\"}}]}\n";

    fn provider() -> MockAiProvider {
        let mut provider = MockAiProvider::new();
        provider.expect_default_model().return_const("test-model".to_string());
        provider
    }

    fn never_ending_body() -> ByteStream {
        let first: Vec<Result<Bytes, GatewayError>> = vec![Ok(Bytes::from_static(ONE_DELTA))];
        Box::pin(stream::iter(first).chain(stream::pending()))
    }

    #[tokio::test]
    async fn interrupt_cancels_the_reply_in_flight() {
        let mut provider = provider();
        provider.expect_open_stream().returning(|_| Ok(never_ending_body()));
        let mut session = ChatSession::new(provider, ChatPurpose::ProjectChat, StreamConfig::default());
        let (tx, mut interrupts) = mpsc::unbounded_channel();
        tx.send(()).unwrap();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            CommandRunner::interruptible_turn(&mut session, "hello", &mut interrupts),
        )
        .await
        .expect("interrupt should end the turn")
        .unwrap();

        assert!(result.was_cancelled());
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn turn_without_interrupt_completes_normally() {
        let mut provider = provider();
        provider.expect_open_stream().returning(|_| {
            let chunks: Vec<Result<Bytes, GatewayError>> = vec![
                Ok(Bytes::from_static(ONE_DELTA)),
                Ok(Bytes::from_static(b"data: [DONE]\n")),
            ];
            Ok(Box::pin(stream::iter(chunks)))
        });
        let mut session = ChatSession::new(provider, ChatPurpose::ProjectChat, StreamConfig::default());
        let (_tx, mut interrupts) = mpsc::unbounded_channel();

        let result = CommandRunner::interruptible_turn(&mut session, "hello", &mut interrupts)
            .await
            .unwrap();

        assert_eq!(result.end, StreamEnd::Sentinel);
        assert_eq!(result.text, "one");
        assert_eq!(session.history().len(), 2);
    }

    #[tokio::test]
    async fn interrupt_at_idle_prompt_leaves_chat() {
        let mut session = ChatSession::new(provider(), ChatPurpose::ProjectChat, StreamConfig::default());
        // The writer stays open so reading the next line never completes.
        let (_writer, reader) = tokio::io::duplex(64);
        let mut lines = BufReader::new(reader).lines();
        let (tx, mut interrupts) = mpsc::unbounded_channel();
        tx.send(()).unwrap();

        tokio::time::timeout(
            Duration::from_secs(5),
            CommandRunner::prompt_loop(&mut session, &mut lines, &mut interrupts),
        )
        .await
        .expect("interrupt should leave the prompt loop")
        .unwrap();

        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn decode_replays_a_captured_transcript() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();
        let transcript = dir.path().join("capture.sse");
        std::fs::write(
            &transcript,
            "data: {\"choices\":[{\"delta\":{\"content\":\"é\"}}]}\n\ndata: [DONE]\n\n",
        )
        .unwrap();

        let runner = CommandRunner::new(Some(config_path));
        let result = runner.decode_command(&transcript, 1).await.unwrap();

        assert_eq!(result.text, "é");
        assert_eq!(result.end, StreamEnd::Sentinel);
    }

    #[tokio::test]
    async fn decode_rejects_zero_chunk_size() {
        let runner = CommandRunner::new(None);
        let err = runner.decode_command(Path::new("unused.sse"), 0).await.unwrap_err();
        assert!(matches!(err, CodillaError::UserInputError { .. }));
    }

    #[test]
    fn validate_reports_each_problem() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "[gateway]\nbase_url = \"\"\nmodel = \"\"\n").unwrap();

        let runner = CommandRunner::new(Some(config_path));
        match runner.validate_command() {
            Err(CodillaError::MultipleErrors { errors, .. }) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }
}
