//! Chat Gateway port
//!
//! Defines the interface for communicating with the chat-completion
//! backend. Implementations (adapters) live in the infrastructure layer:
//! the live Gemini transport and the credential-less mock.

use async_trait::async_trait;
use chatzia_domain::{CompiledKnowledge, Model, StreamEvent, Turn};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for chat backend communication
///
/// A session is bound to exactly one compiled knowledge context; the
/// supplied history seeds the conversation so the caller never has to
/// re-submit prior turns on later sends.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Open a new session grounded in the compiled knowledge, seeded with
    /// the given prior history.
    async fn create_session(
        &self,
        model: &Model,
        knowledge: &CompiledKnowledge,
        history: &[Turn],
    ) -> Result<Box<dyn ChatSession>, GatewayError>;
}

/// An active chat session
#[async_trait]
pub trait ChatSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Send a message and receive a streaming response.
    ///
    /// The stream is finite and not restartable: it ends with a single
    /// terminal event (`Completed` or `Error`).
    async fn send_streaming(&self, text: &str) -> Result<StreamHandle, GatewayError>;
}

/// Handle for receiving streaming events from a chat session.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`. Events are consumed serially,
/// which is what guarantees chunk ordering within one turn.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Consume the stream and collect all text into a single string.
    ///
    /// Useful when streaming display is not needed (e.g. tests).
    pub async fn collect_text(mut self) -> Result<String, GatewayError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed(text) => {
                    if full_text.is_empty() {
                        return Ok(text);
                    }
                    return Ok(full_text);
                }
                StreamEvent::Error(e) => {
                    return Err(GatewayError::RequestFailed(e));
                }
            }
        }
        // Channel closed without Completed — return what we have
        Ok(full_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn collect_text_concatenates_deltas() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(StreamEvent::Delta("ho".to_string())).await.unwrap();
        tx.send(StreamEvent::Delta("la".to_string())).await.unwrap();
        tx.send(StreamEvent::Completed("hola".to_string()))
            .await
            .unwrap();
        drop(tx);

        let text = StreamHandle::new(rx).collect_text().await.unwrap();
        assert_eq!(text, "hola");
    }

    #[tokio::test]
    async fn collect_text_uses_completed_when_no_deltas() {
        let (tx, rx) = mpsc::channel(1);
        tx.send(StreamEvent::Completed("todo de una vez".to_string()))
            .await
            .unwrap();
        drop(tx);

        let text = StreamHandle::new(rx).collect_text().await.unwrap();
        assert_eq!(text, "todo de una vez");
    }

    #[tokio::test]
    async fn collect_text_surfaces_stream_error() {
        let (tx, rx) = mpsc::channel(2);
        tx.send(StreamEvent::Delta("parcial".to_string()))
            .await
            .unwrap();
        tx.send(StreamEvent::Error("timeout".to_string()))
            .await
            .unwrap();
        drop(tx);

        let result = StreamHandle::new(rx).collect_text().await;
        assert!(matches!(result, Err(GatewayError::RequestFailed(_))));
    }
}
