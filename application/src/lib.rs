//! Application layer for chatzia
//!
//! This crate contains the streaming conversation controller, the session
//! cache, and the port definitions the infrastructure adapters implement.
//! It depends only on the domain layer.

pub mod ports;
pub mod session_cache;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    chat_gateway::{ChatGateway, ChatSession, GatewayError, StreamHandle},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    turn_sink::{NoTurnSink, TurnSink},
};
pub use session_cache::SessionCache;
pub use use_cases::submit_turn::{SubmitTurnUseCase, TurnOutcome, TRANSPORT_ERROR_MESSAGE};
