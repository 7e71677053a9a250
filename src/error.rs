//! Prediction errors
//!
//! Every failure of the fill-mask contract is one of two kinds: the input was
//! rejected before the model ran, or the model call itself failed.

use thiserror::Error;

/// Error returned by [`Predictor`](crate::engine::Predictor)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    /// The sentence does not carry exactly one mask marker
    #[error("{0}")]
    Validation(String),

    /// The model call failed or produced nothing usable
    #[error("Inference failed: {0}")]
    Inference(String),
}

impl PredictError {
    pub fn is_validation(&self) -> bool {
        matches!(self, PredictError::Validation(_))
    }

    /// Wrap any model-side failure, keeping the full context chain.
    pub fn inference(err: impl std::fmt::Display) -> Self {
        PredictError::Inference(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = PredictError::Validation("Please include [MASK] in your sentence".into());
        assert_eq!(err.to_string(), "Please include [MASK] in your sentence");
        assert!(err.is_validation());
    }

    #[test]
    fn test_inference_keeps_context_chain() {
        let err = anyhow::anyhow!("out of memory").context("forward pass");
        let err = PredictError::inference(err);
        assert_eq!(err.to_string(), "Inference failed: forward pass: out of memory");
        assert!(!err.is_validation());
    }
}
