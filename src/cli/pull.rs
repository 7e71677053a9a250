//! Pull model from HuggingFace Hub

use std::path::PathBuf;

use anyhow::Result;

use crate::config::GapfillConfig;
use crate::loader;

/// Download a model so later runs can load it offline
pub async fn pull(config: GapfillConfig, repo: String, output: Option<PathBuf>) -> Result<()> {
    let output_dir = output.unwrap_or_else(|| config.model.model_dir.clone());
    let revision = config.model.revision.clone();

    println!("Downloading from: {} ({})", repo, revision);

    let model_dir =
        tokio::task::spawn_blocking(move || loader::download_to(&repo, &revision, &output_dir))
            .await??;

    println!("\nModel downloaded to: {}", model_dir.display());
    println!("Use it with: gapfill --model {} run", model_dir.display());
    Ok(())
}
