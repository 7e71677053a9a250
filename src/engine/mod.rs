//! Core inference engine
//!
//! - Predictor: validates input, calls the model, shapes the result
//! - Types: masked sentences, predictions and completions

mod predictor;
mod types;

pub use predictor::{Predictor, DEFAULT_TOP_K};
pub use types::{highlight, CompletionResult, MaskedSentence, Prediction, MASK_TOKEN};
