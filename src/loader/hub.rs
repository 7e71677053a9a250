//! Hugging Face Hub downloads

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use hf_hub::api::sync::{Api, ApiRepo};
use hf_hub::{Repo, RepoType};

use super::detect::{ModelFiles, WeightsFormat, WEIGHT_FILES};

/// Files worth copying besides the weights; absent ones are skipped
const EXTRA_FILES: &[&str] = &[
    "tokenizer_config.json",
    "special_tokens_map.json",
    "vocab.txt",
];

fn open_repo(repo_id: &str, revision: &str) -> Result<ApiRepo> {
    let api = Api::new().context("Failed to initialise the Hugging Face Hub client")?;
    Ok(api.repo(Repo::with_revision(
        repo_id.to_string(),
        RepoType::Model,
        revision.to_string(),
    )))
}

fn fetch_weights(repo: &ApiRepo, repo_id: &str) -> Result<PathBuf> {
    WEIGHT_FILES
        .iter()
        .find_map(|name| repo.get(name).ok())
        .ok_or_else(|| {
            anyhow!(
                "No weights in {} (looked for {})",
                repo_id,
                WEIGHT_FILES.join(", ")
            )
        })
}

/// Resolve model files from the Hub cache, downloading what is missing.
pub fn resolve_hub(repo_id: &str, revision: &str) -> Result<ModelFiles> {
    let repo = open_repo(repo_id, revision)?;

    let config = repo
        .get("config.json")
        .with_context(|| format!("Failed to fetch config.json from {}", repo_id))?;
    let tokenizer = repo
        .get("tokenizer.json")
        .with_context(|| format!("Failed to fetch tokenizer.json from {}", repo_id))?;
    let weights = fetch_weights(&repo, repo_id)?;

    Ok(ModelFiles {
        format: WeightsFormat::from_path(&weights),
        config,
        tokenizer,
        weights,
    })
}

/// Copy a repo's model files into `output_dir/<repo name>`.
///
/// Returns the directory the files landed in.
pub fn download_to(repo_id: &str, revision: &str, output_dir: &Path) -> Result<PathBuf> {
    let repo = open_repo(repo_id, revision)?;

    let model_name = repo_id.rsplit('/').next().unwrap_or(repo_id);
    let model_dir = output_dir.join(model_name);
    std::fs::create_dir_all(&model_dir)
        .with_context(|| format!("Failed to create {}", model_dir.display()))?;

    let files = resolve_hub(repo_id, revision)?;
    for path in [&files.config, &files.tokenizer, &files.weights] {
        copy_into(path, &model_dir)?;
    }

    for name in EXTRA_FILES {
        match repo.get(name) {
            Ok(cached) => copy_into(&cached, &model_dir)?,
            Err(e) => tracing::debug!("Skipping {}: {}", name, e),
        }
    }

    Ok(model_dir)
}

fn copy_into(cached: &Path, dir: &Path) -> Result<()> {
    let name = cached
        .file_name()
        .ok_or_else(|| anyhow!("Cached path has no file name: {}", cached.display()))?;
    let dest = dir.join(name);
    std::fs::copy(cached, &dest)
        .with_context(|| format!("Failed to copy {} to {}", cached.display(), dest.display()))?;
    tracing::info!("Downloaded: {}", dest.display());
    Ok(())
}
