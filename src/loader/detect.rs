//! Model source detection and local file resolution

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

/// Detected weights format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightsFormat {
    /// SafeTensors format (HuggingFace standard)
    SafeTensors,
    /// PyTorch pickle (`pytorch_model.bin`)
    Pth,
}

impl WeightsFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("safetensors") => WeightsFormat::SafeTensors,
            _ => WeightsFormat::Pth,
        }
    }
}

impl std::fmt::Display for WeightsFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightsFormat::SafeTensors => write!(f, "SafeTensors"),
            WeightsFormat::Pth => write!(f, "PyTorch"),
        }
    }
}

/// Where a model comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// A directory on disk holding the model files
    Local(PathBuf),
    /// A Hugging Face Hub repository
    Hub { repo_id: String, revision: String },
}

/// Everything needed to load a fill-mask model
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
    pub format: WeightsFormat,
}

/// Weight file names, preferred first
pub const WEIGHT_FILES: &[&str] = &["model.safetensors", "pytorch_model.bin"];

/// Decide where `id` should be loaded from.
///
/// The id can be:
/// - A path to a model directory
/// - A directory name under `model_dir` (e.g. a previous `gapfill pull`)
/// - Otherwise, a Hub repo id
pub fn detect_model_source(id: &str, revision: &str, model_dir: &Path) -> ModelSource {
    let direct = PathBuf::from(id);
    if direct.is_dir() {
        return ModelSource::Local(direct);
    }

    // `pull` stores repos under their last path segment
    let name = id.rsplit('/').next().unwrap_or(id);
    let in_dir = model_dir.join(name);
    if in_dir.join("config.json").exists() {
        return ModelSource::Local(in_dir);
    }

    ModelSource::Hub {
        repo_id: id.to_string(),
        revision: revision.to_string(),
    }
}

/// Resolve model files inside a local directory
pub fn resolve_local(dir: &Path) -> Result<ModelFiles> {
    let config = require(dir, "config.json")?;
    let tokenizer = require(dir, "tokenizer.json")?;
    let weights = WEIGHT_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
        .ok_or_else(|| {
            anyhow!(
                "No weights in {} (looked for {})",
                dir.display(),
                WEIGHT_FILES.join(", ")
            )
        })?;

    Ok(ModelFiles {
        format: WeightsFormat::from_path(&weights),
        config,
        tokenizer,
        weights,
    })
}

fn require(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    if path.exists() {
        Ok(path)
    } else {
        Err(anyhow!("Missing {} in {}", name, dir.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            std::fs::write(dir.join(name), b"{}").unwrap();
        }
    }

    #[test]
    fn test_unknown_id_goes_to_hub() {
        let dir = tempfile::tempdir().unwrap();
        let source = detect_model_source("bert-base-uncased", "main", dir.path());
        assert_eq!(
            source,
            ModelSource::Hub {
                repo_id: "bert-base-uncased".into(),
                revision: "main".into()
            }
        );
    }

    #[test]
    fn test_pulled_model_is_local() {
        let dir = tempfile::tempdir().unwrap();
        let pulled = dir.path().join("distilbert-base-uncased");
        std::fs::create_dir(&pulled).unwrap();
        touch(&pulled, &["config.json"]);

        let source = detect_model_source("distilbert/distilbert-base-uncased", "main", dir.path());
        assert_eq!(source, ModelSource::Local(pulled));
    }

    #[test]
    fn test_direct_path_is_local() {
        let dir = tempfile::tempdir().unwrap();
        let id = dir.path().to_string_lossy().to_string();
        let source = detect_model_source(&id, "main", Path::new("/nonexistent"));
        assert_eq!(source, ModelSource::Local(dir.path().to_path_buf()));
    }

    #[test]
    fn test_resolve_local_prefers_safetensors() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            &["config.json", "tokenizer.json", "pytorch_model.bin", "model.safetensors"],
        );

        let files = resolve_local(dir.path()).unwrap();
        assert_eq!(files.format, WeightsFormat::SafeTensors);
        assert!(files.weights.ends_with("model.safetensors"));
    }

    #[test]
    fn test_resolve_local_falls_back_to_pth() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["config.json", "tokenizer.json", "pytorch_model.bin"]);

        let files = resolve_local(dir.path()).unwrap();
        assert_eq!(files.format, WeightsFormat::Pth);
    }

    #[test]
    fn test_resolve_local_requires_tokenizer() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["config.json", "model.safetensors"]);

        let err = resolve_local(dir.path()).unwrap_err();
        assert!(err.to_string().contains("tokenizer.json"));
    }
}
