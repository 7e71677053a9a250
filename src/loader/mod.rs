//! Model loading utilities
//!
//! Resolves the files a fill-mask model needs (`config.json`,
//! `tokenizer.json`, weights) from a local directory or the Hugging Face Hub,
//! then builds a [`Predictor`] around the loaded model.

mod detect;
mod hub;

pub use detect::{
    detect_model_source, resolve_local, ModelFiles, ModelSource, WeightsFormat, WEIGHT_FILES,
};
pub use hub::{download_to, resolve_hub};

use std::time::Instant;

use anyhow::Result;

use crate::config::GapfillConfig;
use crate::engine::Predictor;
use crate::model::BertFillMask;

/// Resolve model files for the configured model
pub fn resolve_model_files(config: &GapfillConfig) -> Result<ModelFiles> {
    let source = detect_model_source(
        &config.model.id,
        &config.model.revision,
        &config.model.model_dir,
    );
    tracing::debug!(?source, "resolved model source");

    match source {
        ModelSource::Local(dir) => resolve_local(&dir),
        ModelSource::Hub { repo_id, revision } => resolve_hub(&repo_id, &revision),
    }
}

/// Load the configured model and wrap it in a predictor.
///
/// This is the slow, memory-heavy step; call it once at startup.
pub fn load_predictor(config: &GapfillConfig) -> Result<Predictor> {
    let start = Instant::now();
    let files = resolve_model_files(config)?;
    let device = config.inference.device.to_device()?;
    let dtype = config.dtype()?;

    let model = BertFillMask::load(&config.model.id, &files, &device, dtype)?;
    tracing::info!(
        "Model {} loaded in {:.2}s ({} weights, mask token {})",
        config.model.id,
        start.elapsed().as_secs_f64(),
        files.format,
        model.mask_token()
    );

    Ok(Predictor::new(model, config.top_k()))
}
