//! Gemini session management.
//!
//! Provides [`GeminiChatSession`], which implements the application layer's
//! [`ChatSession`] port for one grounded conversation. The session owns the
//! accumulated conversation contents; the caller never re-submits prior
//! turns.

use crate::gemini::error::{GeminiError, Result};
use crate::gemini::protocol::{ApiError, Content, GenerateContentChunk, GenerateContentRequest};
use async_trait::async_trait;
use chatzia_application::{ChatSession, GatewayError, StreamHandle};
use chatzia_domain::{CompiledKnowledge, Model, StreamEvent, Turn};
use eventsource_stream::Eventsource;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, warn};

/// An active grounded conversation with a Gemini model.
pub struct GeminiChatSession {
    client: reqwest::Client,
    stream_url: String,
    model: Model,
    system_instruction: String,
    history: Arc<Mutex<Vec<Content>>>,
}

impl GeminiChatSession {
    /// Create a session bound to one compiled knowledge context, seeded
    /// with the supplied prior history.
    pub fn new(
        client: reqwest::Client,
        stream_url: String,
        model: Model,
        knowledge: &CompiledKnowledge,
        history: &[Turn],
    ) -> Self {
        let seeded: Vec<Content> = history.iter().map(Content::from_turn).collect();
        debug!(
            "Gemini session created: model={}, seeded_turns={}",
            model,
            seeded.len()
        );

        Self {
            client,
            stream_url,
            model,
            system_instruction: knowledge.system_instruction.clone(),
            history: Arc::new(Mutex::new(seeded)),
        }
    }

    /// POST the full conversation and return the raw SSE response.
    async fn open_stream(&self, contents: Vec<Content>) -> Result<reqwest::Response> {
        let request = GenerateContentRequest {
            system_instruction: Content::system(self.system_instruction.clone()),
            contents,
        };

        let response = self.client.post(&self.stream_url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: ApiError,
}

#[async_trait]
impl ChatSession for GeminiChatSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send_streaming(&self, text: &str) -> std::result::Result<StreamHandle, GatewayError> {
        let contents = {
            let mut history = self.history.lock().await;
            history.push(Content::user(text));
            history.clone()
        };

        let response = self.open_stream(contents).await.map_err(GatewayError::from)?;

        let (tx, rx) = mpsc::channel(32);
        let history = Arc::clone(&self.history);

        tokio::spawn(async move {
            let mut events = response.bytes_stream().eventsource();
            let mut full_text = String::new();

            while let Some(event) = events.next().await {
                let event = match event {
                    Ok(event) => event,
                    Err(e) => {
                        let _ = tx
                            .send(StreamEvent::Error(
                                GeminiError::Stream(e.to_string()).to_string(),
                            ))
                            .await;
                        return;
                    }
                };

                let chunk: GenerateContentChunk = match serde_json::from_str(&event.data) {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        let _ = tx
                            .send(StreamEvent::Error(
                                GeminiError::MalformedChunk(e).to_string(),
                            ))
                            .await;
                        return;
                    }
                };

                if let Some(api_error) = chunk.error {
                    let _ = tx.send(StreamEvent::Error(api_error.message)).await;
                    return;
                }

                if let Some(text) = chunk.text() {
                    full_text.push_str(&text);
                    if tx.send(StreamEvent::Delta(text)).await.is_err() {
                        // Receiver dropped; nothing left to deliver to.
                        warn!("Stream receiver dropped mid-turn");
                        return;
                    }
                }
            }

            // Natural exhaustion: record the reply so the next send replays it.
            history.lock().await.push(Content::model(full_text.clone()));
            let _ = tx.send(StreamEvent::Completed(full_text)).await;
        });

        Ok(StreamHandle::new(rx))
    }
}
