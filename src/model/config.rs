use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// The parts of a Hugging Face `config.json` gapfill cares about
#[derive(Debug, Clone, Deserialize)]
pub struct ArchitectureSummary {
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub architectures: Vec<String>,
    pub vocab_size: usize,
    pub hidden_size: usize,
    pub num_hidden_layers: usize,
    pub num_attention_heads: usize,
    #[serde(default = "default_max_positions")]
    pub max_position_embeddings: usize,
}

fn default_max_positions() -> usize {
    512
}

impl ArchitectureSummary {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Invalid model config {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Architecture name, e.g. "bert"
    pub fn model_type(&self) -> &str {
        self.model_type.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bert_base_config() {
        let json = r#"{
            "architectures": ["BertForMaskedLM"],
            "model_type": "bert",
            "vocab_size": 30522,
            "hidden_size": 768,
            "num_hidden_layers": 12,
            "num_attention_heads": 12,
            "intermediate_size": 3072,
            "max_position_embeddings": 512
        }"#;
        let summary = ArchitectureSummary::from_json(json).unwrap();
        assert_eq!(summary.model_type(), "bert");
        assert_eq!(summary.vocab_size, 30522);
        assert_eq!(summary.architectures, vec!["BertForMaskedLM".to_string()]);
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{"vocab_size": 10, "hidden_size": 4, "num_hidden_layers": 1, "num_attention_heads": 1}"#;
        let summary = ArchitectureSummary::from_json(json).unwrap();
        assert_eq!(summary.model_type(), "unknown");
        assert_eq!(summary.max_position_embeddings, 512);
    }
}
