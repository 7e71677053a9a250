//! Model selection settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which pretrained model to load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Hugging Face repo id, a directory name under `model_dir`, or a path
    #[serde(default = "default_model_id")]
    pub id: String,

    /// Hub revision (branch, tag or commit)
    #[serde(default = "default_revision")]
    pub revision: String,

    /// Directory `gapfill pull` downloads into and local lookups search
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,
}

fn default_model_id() -> String {
    "bert-base-uncased".to_string()
}

fn default_revision() -> String {
    "main".to_string()
}

/// `GAPFILL_MODEL_DIR`, or `./models`
pub fn default_model_dir() -> PathBuf {
    std::env::var("GAPFILL_MODEL_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./models"))
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            id: default_model_id(),
            revision: default_revision(),
            model_dir: default_model_dir(),
        }
    }
}
