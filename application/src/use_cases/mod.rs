//! Use cases — orchestration of one conversation turn

pub mod submit_turn;
