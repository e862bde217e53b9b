//! Console output

pub mod console;
