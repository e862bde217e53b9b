//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown model: {0}")]
    UnknownModel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_model_display() {
        let error = DomainError::UnknownModel("gpt-9".to_string());
        assert_eq!(error.to_string(), "Unknown model: gpt-9");
    }
}
