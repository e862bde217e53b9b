//! Gemini adapter — live streaming transport.
//!
//! Implements the application layer's [`ChatGateway`] and [`ChatSession`]
//! ports over the Gemini `streamGenerateContent` REST endpoint (SSE).
//!
//! The REST API is stateless, so the "server-side session" the application
//! layer sees is emulated here: each [`GeminiChatSession`] accumulates the
//! conversation contents client-side and replays them on every send.
//!
//! [`ChatGateway`]: chatzia_application::ChatGateway
//! [`ChatSession`]: chatzia_application::ChatSession
//! [`GeminiChatSession`]: session::GeminiChatSession

pub mod error;
pub mod gateway;
pub mod protocol;
pub mod session;

pub use error::{GeminiError, Result};
pub use gateway::GeminiChatGateway;
pub use session::GeminiChatSession;
