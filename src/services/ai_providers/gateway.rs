use async_trait::async_trait;
use futures::StreamExt;
use std::time::Duration;
use reqwest::Client;
use crate::config::constants::timeout_duration;
use crate::enums::gateway_error::GatewayError;
use crate::structs::ai::chat_request::ChatRequest;
use crate::structs::config::gateway_config::GatewayConfig;
use crate::traits::ai_provider::{AiProvider, ByteStream};

/// OpenAI-compatible chat completion gateway.
#[derive(Clone)]
pub struct GatewayProvider {
    api_key: String,
    base_url: String,
    client: Client,
    model: String,
    header_timeout: Duration,
}

impl GatewayProvider {
    pub fn new(api_key: String, config: &GatewayConfig) -> Result<Self, GatewayError> {
        // Only connecting and the response headers are bounded; a streaming
        // body may legitimately run for a long time.
        let header_timeout = timeout_duration(config.request_timeout_secs);
        let client = Client::builder()
            .connect_timeout(header_timeout)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            model: config.model.clone(),
            header_timeout,
        })
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn make_request(&self, url: &str, request_body: &ChatRequest) -> Result<reqwest::Response, GatewayError> {
        log::debug!("📦 Request model: {}", request_body.model);

        let pending = self.client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("Accept", if request_body.stream { "text/event-stream" } else { "application/json" })
            .json(request_body)
            .send();

        // send() resolves once the headers arrive, so the body stays unbounded.
        match tokio::time::timeout(self.header_timeout, pending).await {
            Ok(response) => response.map_err(|e| GatewayError::Network(e.to_string())),
            Err(_) => {
                log::warn!("⏰ No response headers from {} within {}s", url, self.header_timeout.as_secs());
                Err(GatewayError::Network(format!(
                    "no response headers within {}s",
                    self.header_timeout.as_secs()
                )))
            }
        }
    }
}

#[async_trait]
impl AiProvider for GatewayProvider {

    async fn open_stream(&self, request: &ChatRequest) -> Result<ByteStream, GatewayError> {
        let url = self.completions_url();
        let response = self.make_request(&url, request).await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            log::warn!("❌ Gateway error response ({}): {}", status, error_text);
            return Err(GatewayError::from_status(status.as_u16(), error_text));
        }

        if response.content_length() == Some(0) {
            return Err(GatewayError::MissingBody { url });
        }

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| GatewayError::Network(format!("Stream error: {}", e))));

        Ok(Box::pin(stream))
    }

    fn default_model(&self) -> String {
        self.model.clone()
    }
}
