//! Knowledge compilation — agent profile to grounding prompt

pub mod compiler;
