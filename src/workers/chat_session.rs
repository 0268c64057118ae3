use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use crate::enums::chat_purpose::ChatPurpose;
use crate::enums::stream_end::StreamEnd;
use crate::errors::{CodillaError, CodillaResult};
use crate::services::stream_reader::StreamReader;
use crate::structs::ai::chat_message::ChatMessage;
use crate::structs::ai::chat_request::ChatRequest;
use crate::structs::config::stream_config::StreamConfig;
use crate::structs::stream_result::StreamResult;
use crate::traits::ai_provider::AiProvider;
use crate::traits::stream_sink::StreamSink;

/// A conversation with the gateway for one of the app's chat surfaces.
pub struct ChatSession<P: AiProvider> {
    provider: P,
    purpose: ChatPurpose,
    model: String,
    temperature: Option<f32>,
    history: Vec<ChatMessage>,
    reader: StreamReader,
}

impl<P: AiProvider> ChatSession<P> {
    pub fn new(provider: P, purpose: ChatPurpose, stream_config: StreamConfig) -> Self {
        let model = provider.default_model();
        Self {
            provider,
            purpose,
            model,
            temperature: None,
            history: Vec::new(),
            reader: StreamReader::new(stream_config),
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn purpose(&self) -> ChatPurpose {
        self.purpose
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn build_request(&self, prompt: &str) -> ChatRequest {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(ChatMessage::system(self.purpose.system_prompt().trim()));
        messages.extend(self.history.iter().cloned());
        messages.push(ChatMessage::user(prompt));

        let mut request = ChatRequest::streaming(&self.model, messages);
        request.temperature = self.temperature;
        request
    }

    /// Streams one reply into `sink`. The exchange is added to the history
    /// only when the reply was not cancelled.
    pub async fn send<K>(&mut self, prompt: &str, cancel: &CancellationToken, sink: &mut K) -> CodillaResult<StreamResult>
    where
        K: StreamSink + ?Sized,
    {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(CodillaError::user_input_error("", "a non-empty prompt", "Type a message and press enter"));
        }

        let request = self.build_request(prompt);
        log::info!("💬 Sending {} request to {}", self.purpose.label(), self.model);

        let stream = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::info!("🛑 Request cancelled before the gateway answered");
                let result = cancelled_before_start();
                sink.on_complete(&result);
                return Ok(result);
            }
            opened = self.provider.open_stream(&request) => opened?,
        };

        let result = self.reader.read(stream, cancel, sink).await?;

        if !result.was_cancelled() {
            self.history.push(ChatMessage::user(prompt));
            self.history.push(ChatMessage::assistant(&result.text));
        }

        Ok(result)
    }
}

fn cancelled_before_start() -> StreamResult {
    StreamResult {
        session_id: Uuid::new_v4().to_string(),
        text: String::new(),
        fragments: 0,
        end: StreamEnd::Cancelled,
        finish_reason: None,
        discarded_bytes: 0,
        elapsed_ms: 0,
    }
}
