//! Deterministic mock streamer.
//!
//! Synthesizes a canned response character by character on a fixed cadence,
//! so the streaming UI can be exercised without a live backend. The mock
//! never fails.

use async_trait::async_trait;
use chatzia_application::{ChatGateway, ChatSession, GatewayError, StreamHandle};
use chatzia_domain::{CompiledKnowledge, Model, StreamEvent, Turn};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

/// Delay between emitted characters.
const CHAR_CADENCE: Duration = Duration::from_millis(20);

/// Gateway that always hands out [`MockChatSession`]s.
pub struct MockChatGateway;

#[async_trait]
impl ChatGateway for MockChatGateway {
    async fn create_session(
        &self,
        model: &Model,
        _knowledge: &CompiledKnowledge,
        history: &[Turn],
    ) -> Result<Box<dyn ChatSession>, GatewayError> {
        debug!(
            "Creating mock session (model={}, seeded_turns={})",
            model,
            history.len()
        );
        Ok(Box::new(MockChatSession {
            model: model.clone(),
        }))
    }
}

/// Session that streams the canned message for every send.
pub struct MockChatSession {
    model: Model,
}

impl MockChatSession {
    /// The deterministic response for a given user message.
    pub fn canned_response(user_text: &str) -> String {
        format!(
            "Respuesta simulada para \"{}\". La API key no está configurada.",
            user_text
        )
    }
}

#[async_trait]
impl ChatSession for MockChatSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send_streaming(&self, text: &str) -> Result<StreamHandle, GatewayError> {
        let message = Self::canned_response(text);
        let (tx, rx) = mpsc::channel(8);

        tokio::spawn(async move {
            for ch in message.chars() {
                if tx.send(StreamEvent::Delta(ch.to_string())).await.is_err() {
                    return;
                }
                tokio::time::sleep(CHAR_CADENCE).await;
            }
            let _ = tx.send(StreamEvent::Completed(message)).await;
        });

        Ok(StreamHandle::new(rx))
    }
}
