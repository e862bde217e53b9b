//! Interactive agent-testing chat

pub mod repl;

pub use repl::ChatRepl;
