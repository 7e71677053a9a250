//! CLI commands
//!
//! Interactive menu, one-shot prediction, HTTP server and model management.

mod display;
mod info;
mod predict;
mod pull;
mod run;
mod serve;

pub use display::{confidence_bar, render_result, EXAMPLES};
pub use info::info;
pub use predict::predict;
pub use pull::pull;
pub use run::run;
pub use serve::serve;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::GapfillConfig;
use crate::engine::Predictor;
use crate::loader;

/// Gapfill - predict the missing word in a sentence
#[derive(Parser)]
#[command(name = "gapfill")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub model: ModelArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that loads a model
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Config file (YAML or JSON)
    #[arg(long, global = true, env = "GAPFILL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Model repo id or local directory (default: bert-base-uncased)
    #[arg(long, short, global = true)]
    pub model: Option<String>,

    /// Hub revision to load
    #[arg(long, global = true)]
    pub revision: Option<String>,

    /// Number of candidates to show
    #[arg(long, short = 'k', global = true)]
    pub top_k: Option<usize>,

    /// Use CPU even if the config selects a GPU
    #[arg(long, global = true)]
    pub cpu: bool,
}

impl ModelArgs {
    /// Build the effective configuration: file first, then flags.
    pub fn resolve(&self) -> Result<GapfillConfig> {
        let mut config = match &self.config {
            Some(path) => GapfillConfig::from_file(path)?,
            None => GapfillConfig::default(),
        };

        if let Some(model) = &self.model {
            config.model.id = model.clone();
        }
        if let Some(revision) = &self.revision {
            config.model.revision = revision.clone();
        }
        if let Some(top_k) = self.top_k {
            config.inference.top_k = top_k;
        }
        if self.cpu {
            config.inference.device = crate::config::DeviceConfig::Simple("cpu".to_string());
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive menu: examples, your own sentences, batch mode
    Run,

    /// Predict the masked word of one sentence
    Predict {
        /// Sentence containing [MASK]
        sentence: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on (default: 5000)
        #[arg(long)]
        port: Option<u16>,

        /// Host to bind to (default: 0.0.0.0)
        #[arg(long)]
        host: Option<String>,
    },

    /// Download a model from HuggingFace Hub
    Pull {
        /// Repository ID (e.g., "bert-base-uncased")
        repo: String,

        /// Output directory (default: $GAPFILL_MODEL_DIR or ./models)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show model information
    Info,
}

/// Load the model once, with a spinner while it happens.
pub(crate) fn load_with_spinner(config: &GapfillConfig) -> Result<Predictor> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!(
        "Loading {} (the first run downloads it)...",
        config.model.id
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = loader::load_predictor(config);
    spinner.finish_and_clear();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["gapfill", "--model", "./local-bert", "-k", "3", "run"]);
        let config = cli.model.resolve().unwrap();
        assert_eq!(config.model.id, "./local-bert");
        assert_eq!(config.top_k(), 3);
        assert!(matches!(cli.command, Commands::Run));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["gapfill", "predict", "The [MASK] sat.", "--json", "--cpu"]);
        assert!(cli.model.cpu);
        match cli.command {
            Commands::Predict { sentence, json } => {
                assert_eq!(sentence, "The [MASK] sat.");
                assert!(json);
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn test_zero_top_k_is_rejected() {
        let args = ModelArgs {
            top_k: Some(0),
            ..Default::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gapfill.yaml");
        std::fs::write(&path, "model:\n  id: bert-large-uncased\ninference:\n  top_k: 8\n")
            .unwrap();

        let args = ModelArgs {
            config: Some(path),
            top_k: Some(2),
            ..Default::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.model.id, "bert-large-uncased");
        assert_eq!(config.top_k(), 2);
    }
}
