//! Gemini chat gateway implementation

use crate::gemini::session::GeminiChatSession;
use async_trait::async_trait;
use chatzia_application::{ChatGateway, ChatSession, GatewayError};
use chatzia_domain::{CompiledKnowledge, Model, Turn};
use tracing::info;

/// Production endpoint for the Gemini generative language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Chat gateway backed by the Gemini streaming REST API.
///
/// Holds the credential and a shared HTTP client; each created session is
/// an independent conversation.
pub struct GeminiChatGateway {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiChatGateway {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the endpoint base URL (for tests against a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn stream_url(&self, model: &Model) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse&key={}",
            self.base_url, model, self.api_key
        )
    }
}

#[async_trait]
impl ChatGateway for GeminiChatGateway {
    async fn create_session(
        &self,
        model: &Model,
        knowledge: &CompiledKnowledge,
        history: &[Turn],
    ) -> Result<Box<dyn ChatSession>, GatewayError> {
        info!("Creating Gemini session with model: {}", model);

        let session = GeminiChatSession::new(
            self.client.clone(),
            self.stream_url(model),
            model.clone(),
            knowledge,
            history,
        );

        Ok(Box::new(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_url_shape() {
        let gateway = GeminiChatGateway::new("secret").with_base_url("http://localhost:9999/v1beta");
        let url = gateway.stream_url(&Model::Gemini25Flash);
        assert_eq!(
            url,
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:streamGenerateContent?alt=sse&key=secret"
        );
    }
}
