//! Mock transport — credential-less fallback.
//!
//! Activated when no API key is configured. Satisfies the same sink
//! contract as the live path so everything downstream is agnostic to
//! which transport is active.

mod streamer;

pub use streamer::{MockChatGateway, MockChatSession};
