//! Gapfill - masked language model gap filling
//!
//! Give gapfill a sentence with one `[MASK]` and it asks a pretrained
//! fill-mask model for the most likely words in that position.
//!
//! # Architecture
//!
//! Gapfill is a thin layer over an external model:
//! - **candle / tokenizers / hf-hub**: weights, forward pass, tokenization, downloads
//! - **gapfill**: input validation, result shaping, CLI menu, HTTP server
//!
//! The [`model::FillMaskModel`] trait is the seam; any backend that can rank
//! candidates for a masked position can sit behind the same [`Predictor`].
//!
//! # Example
//!
//! ```bash
//! # Interactive menu
//! gapfill run
//!
//! # One sentence
//! gapfill predict "The capital of France is [MASK]."
//!
//! # Web form on http://localhost:5000
//! gapfill serve --port 5000
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod model;
pub mod server;
pub mod tokenizer;

// Re-export key types
pub use config::{GapfillConfig, InferenceConfig, ModelConfig, ServerConfig};
pub use engine::{CompletionResult, MaskedSentence, Prediction, Predictor, MASK_TOKEN};
pub use error::PredictError;
pub use loader::load_predictor;
pub use model::FillMaskModel;
