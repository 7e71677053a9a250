//! BERT masked-LM backend on candle

use anyhow::{anyhow, bail, Context, Result};
use candle_core::{DType, Device, IndexOp, Tensor, D};
use candle_nn::{ops::softmax, VarBuilder};
use candle_transformers::models::bert::{BertForMaskedLM, Config};

use crate::engine::Prediction;
use crate::loader::{ModelFiles, WeightsFormat};
use crate::tokenizer::MaskTokenizer;

use super::config::ArchitectureSummary;
use super::FillMaskModel;

/// BERT with its masked-LM head, plus the tokenizer it was trained with
pub struct BertFillMask {
    name: String,
    model: BertForMaskedLM,
    tokenizer: MaskTokenizer,
    device: Device,
    max_positions: usize,
}

impl BertFillMask {
    /// Load weights, config and tokenizer from resolved model files
    pub fn load(name: &str, files: &ModelFiles, device: &Device, dtype: DType) -> Result<Self> {
        let summary = ArchitectureSummary::from_file(&files.config)?;
        if summary.model_type() != "bert" && summary.model_type() != "unknown" {
            bail!(
                "Unsupported architecture '{}' for {}; only BERT checkpoints can be loaded",
                summary.model_type(),
                name
            );
        }

        let config: Config = serde_json::from_str(&std::fs::read_to_string(&files.config)?)
            .with_context(|| format!("Invalid BERT config {}", files.config.display()))?;
        let tokenizer = MaskTokenizer::from_file(&files.tokenizer)?;

        let vb = match files.format {
            WeightsFormat::SafeTensors => unsafe {
                VarBuilder::from_mmaped_safetensors(&[&files.weights], dtype, device)?
            },
            WeightsFormat::Pth => VarBuilder::from_pth(&files.weights, dtype, device)?,
        };

        let model = match BertForMaskedLM::load(vb.clone(), &config) {
            Ok(model) => model,
            Err(e) => {
                tracing::debug!("Retrying with legacy LayerNorm names: {}", e);
                BertForMaskedLM::load(vb.rename_f(legacy_layer_norm_name), &config)
                    .with_context(|| format!("Failed to load weights {}", files.weights.display()))?
            }
        };

        Ok(Self::from_parts(
            name,
            model,
            tokenizer,
            device,
            summary.max_position_embeddings,
        ))
    }

    fn from_parts(
        name: &str,
        model: BertForMaskedLM,
        tokenizer: MaskTokenizer,
        device: &Device,
        max_positions: usize,
    ) -> Self {
        Self {
            name: name.to_string(),
            model,
            tokenizer,
            device: device.clone(),
            max_positions,
        }
    }

    pub fn mask_token(&self) -> &str {
        self.tokenizer.mask_token()
    }

    /// Probability of every vocabulary entry at the mask position
    fn mask_probabilities(&self, sentence: &str) -> Result<Vec<f32>> {
        let text = self.tokenizer.to_model_text(sentence);
        let encoding = self.tokenizer.encode(&text)?;
        let ids = encoding.get_ids();
        if ids.len() > self.max_positions {
            bail!(
                "Sentence is {} tokens long; the model accepts at most {}",
                ids.len(),
                self.max_positions
            );
        }
        let mask_index = self
            .tokenizer
            .mask_position(&encoding)
            .ok_or_else(|| anyhow!("Mask token was lost during tokenization"))?;

        let input_ids = Tensor::new(ids, &self.device)?.unsqueeze(0)?;
        let token_type_ids = input_ids.zeros_like()?;
        let attention_mask =
            Tensor::new(encoding.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let logits = logits
            .squeeze(0)?
            .i((mask_index, ..))?
            .to_dtype(DType::F32)?;
        let probs = softmax(&logits, D::Minus1)?;
        Ok(probs.to_vec1::<f32>()?)
    }
}

impl FillMaskModel for BertFillMask {
    fn name(&self) -> &str {
        &self.name
    }

    fn fill_mask(&self, sentence: &str, top_k: usize) -> Result<Vec<Prediction>> {
        let probs = self.mask_probabilities(sentence)?;
        Ok(top_candidates(&probs, top_k, |id| {
            self.tokenizer.decode_token(id)
        }))
    }
}

/// Pick the `k` most probable tokens, best first.
///
/// Tokens that decode to nothing (special tokens) are skipped and the next
/// candidate takes their place. Ties keep vocabulary order.
pub fn top_candidates<F>(probs: &[f32], k: usize, decode: F) -> Vec<Prediction>
where
    F: Fn(u32) -> String,
{
    let mut idxs: Vec<usize> = (0..probs.len()).collect();
    idxs.sort_by(|&i, &j| probs[j].total_cmp(&probs[i]));

    idxs.into_iter()
        .filter_map(|idx| {
            let token = decode(idx as u32);
            (!token.is_empty()).then(|| Prediction::new(token, probs[idx]))
        })
        .take(k)
        .collect()
}

/// Map a modern LayerNorm tensor name onto the pre-2019 `gamma`/`beta` naming
fn legacy_layer_norm_name(name: &str) -> String {
    if let Some(prefix) = name.strip_suffix("LayerNorm.weight") {
        format!("{}LayerNorm.gamma", prefix)
    } else if let Some(prefix) = name.strip_suffix("LayerNorm.bias") {
        format!("{}LayerNorm.beta", prefix)
    } else {
        name.to_string()
    }
}
