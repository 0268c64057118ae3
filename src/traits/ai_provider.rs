use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use crate::enums::gateway_error::GatewayError;
use crate::structs::ai::chat_request::ChatRequest;

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, GatewayError>> + Send>>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiProvider: Send + Sync {

    /// Sends a streaming completion request and hands back the raw response body.
    async fn open_stream(&self, request: &ChatRequest) -> Result<ByteStream, GatewayError>;

    fn default_model(&self) -> String;
}
