//! Configuration system for gapfill
//!
//! A config file (YAML or JSON) sets the model, inference and server
//! settings; command-line flags override individual values.

mod inference;
mod model;
mod server;

pub use inference::{DeviceConfig, InferenceConfig};
pub use model::ModelConfig;
pub use server::ServerConfig;

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use candle_core::DType;
use serde::{Deserialize, Serialize};

/// Parse a dtype string into a `DType`.
///
/// Accepts short and long forms: "f32"/"float32", "f16"/"float16", "bf16"/"bfloat16".
pub fn parse_dtype(s: &str) -> Result<DType> {
    match s {
        "f32" | "float32" => Ok(DType::F32),
        "f16" | "float16" => Ok(DType::F16),
        "bf16" | "bfloat16" => Ok(DType::BF16),
        other => Err(anyhow!("unknown dtype: '{}'", other)),
    }
}

/// Gapfill configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GapfillConfig {
    /// Which pretrained model to load
    #[serde(default)]
    pub model: ModelConfig,

    /// Inference settings
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Server settings (only for `gapfill serve`)
    #[serde(default)]
    pub server: ServerConfig,
}

impl GapfillConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, picking the format from the file extension.
    ///
    /// Anything other than `.json` is read as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(path),
            _ => Self::from_yaml(path),
        }
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if self.inference.top_k == 0 {
            bail!("inference.top_k must be at least 1");
        }
        if self.model.id.trim().is_empty() {
            bail!("model.id must not be empty");
        }
        parse_dtype(&self.inference.dtype)?;
        Ok(())
    }

    /// Get the inference dtype
    pub fn dtype(&self) -> Result<DType> {
        parse_dtype(&self.inference.dtype)
    }

    pub fn top_k(&self) -> usize {
        self.inference.top_k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gapfill_config_yaml() {
        let yaml = r#"
model:
  id: distilbert-base-uncased
  revision: main
  model_dir: ./cache

inference:
  device: cuda:1
  top_k: 3
  dtype: f16

server:
  port: 8080
  host: 127.0.0.1
"#;
        let config: GapfillConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.model.id, "distilbert-base-uncased");
        assert_eq!(config.top_k(), 3);
        assert!(config.inference.device.is_cuda());
        assert_eq!(config.inference.device.device_id(), 1);
        assert_eq!(config.dtype().unwrap(), DType::F16);
        assert_eq!(config.server.addr(), "127.0.0.1:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: GapfillConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.model.id, "bert-base-uncased");
        assert_eq!(config.top_k(), 5);
        assert_eq!(config.server.port, 5000);
        assert!(!config.inference.device.is_cuda());
    }

    #[test]
    fn test_from_file_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gapfill.json");
        std::fs::write(&path, r#"{"inference": {"top_k": 10}}"#).unwrap();

        let config = GapfillConfig::from_file(&path).unwrap();
        assert_eq!(config.top_k(), 10);
    }

    #[test]
    fn test_from_file_rejects_zero_top_k() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gapfill.yaml");
        std::fs::write(&path, "inference:\n  top_k: 0\n").unwrap();

        assert!(GapfillConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_parse_dtype() {
        assert_eq!(parse_dtype("f32").unwrap(), DType::F32);
        assert_eq!(parse_dtype("float32").unwrap(), DType::F32);
        assert_eq!(parse_dtype("bfloat16").unwrap(), DType::BF16);
    }

    #[test]
    fn test_parse_dtype_unknown() {
        assert!(parse_dtype("int8").is_err());
        assert!(parse_dtype("").is_err());
        assert!(parse_dtype("F32").is_err());
    }
}
