//! Inference configuration settings

use anyhow::{Context, Result};
use candle_core::Device;
use serde::{Deserialize, Serialize};

use crate::engine::DEFAULT_TOP_K;

/// Device configuration for inference
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceConfig {
    /// Simple device string (e.g., "cuda:0", "cpu")
    Simple(String),
    /// Detailed device configuration
    Detailed {
        /// Device type: "cuda", "cpu"
        device_type: String,
        /// Device ID (for multi-GPU)
        #[serde(default)]
        device_id: usize,
    },
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig::Simple("cpu".to_string())
    }
}

impl DeviceConfig {
    /// Get device type ("cuda" or "cpu")
    pub fn device_type(&self) -> &str {
        match self {
            DeviceConfig::Simple(s) => {
                if s.starts_with("cuda") {
                    "cuda"
                } else {
                    "cpu"
                }
            }
            DeviceConfig::Detailed { device_type, .. } => device_type,
        }
    }

    /// Get device ID (for multi-GPU)
    pub fn device_id(&self) -> usize {
        match self {
            DeviceConfig::Simple(s) => s
                .strip_prefix("cuda:")
                .and_then(|id| id.parse().ok())
                .unwrap_or(0),
            DeviceConfig::Detailed { device_id, .. } => *device_id,
        }
    }

    /// Check if using CUDA
    pub fn is_cuda(&self) -> bool {
        self.device_type() == "cuda"
    }

    /// Open the configured device.
    ///
    /// CUDA fails here unless the crate was built with `--features cuda`.
    pub fn to_device(&self) -> Result<Device> {
        if self.is_cuda() {
            Device::new_cuda(self.device_id())
                .with_context(|| format!("Failed to open cuda:{}", self.device_id()))
        } else {
            Ok(Device::Cpu)
        }
    }
}

/// Inference-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Device configuration
    #[serde(default)]
    pub device: DeviceConfig,

    /// Number of candidates returned per sentence
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Data type for the weights (f32, f16, bf16)
    #[serde(default = "default_dtype")]
    pub dtype: String,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_dtype() -> String {
    "f32".to_string()
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            device: DeviceConfig::default(),
            top_k: default_top_k(),
            dtype: default_dtype(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detailed_device() {
        let device: DeviceConfig =
            serde_yaml::from_str("device_type: cuda\ndevice_id: 2\n").unwrap();
        assert!(device.is_cuda());
        assert_eq!(device.device_id(), 2);
    }

    #[test]
    fn test_cpu_device_opens() {
        let device = DeviceConfig::default().to_device().unwrap();
        assert!(matches!(device, Device::Cpu));
    }
}
