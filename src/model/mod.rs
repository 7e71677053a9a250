//! Fill-mask model backends.
//!
//! [`FillMaskModel`] is the seam between the predictor and whatever actually
//! runs the network. The shipped backend is BERT on candle.

mod bert;
mod config;

pub use bert::{top_candidates, BertFillMask};
pub use config::ArchitectureSummary;

use anyhow::Result;

use crate::engine::Prediction;

/// A pretrained model that can rank candidates for a masked position.
///
/// Implementations must be safe to call from several threads at once; the
/// server shares one instance across all requests.
pub trait FillMaskModel: Send + Sync {
    /// Identifier reported to clients (repo id or path)
    fn name(&self) -> &str;

    /// Rank candidates for the `[MASK]` in `sentence`.
    ///
    /// Returns at most `top_k` predictions. The sentence has already been
    /// validated to contain exactly one marker.
    fn fill_mask(&self, sentence: &str, top_k: usize) -> Result<Vec<Prediction>>;
}
