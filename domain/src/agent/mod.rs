//! Agent profile entities

pub mod entities;
