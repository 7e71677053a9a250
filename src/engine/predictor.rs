//! Fill-mask predictor
//!
//! The single entry point both front-ends call. Validation happens here; the
//! model behind it only ever sees well-formed sentences.

use crate::error::PredictError;
use crate::model::FillMaskModel;

use super::types::{CompletionResult, MaskedSentence};

/// Default number of candidates returned per sentence
pub const DEFAULT_TOP_K: usize = 5;

/// Fill-mask inference adapter
///
/// Owns the loaded model for the lifetime of the process. Share it behind an
/// `Arc`; prediction takes `&self` and never mutates anything.
pub struct Predictor {
    model: Box<dyn FillMaskModel>,
    top_k: usize,
}

impl Predictor {
    /// Wrap a loaded model. `top_k` is clamped to at least 1.
    pub fn new<M: FillMaskModel + 'static>(model: M, top_k: usize) -> Self {
        Self {
            model: Box::new(model),
            top_k: top_k.max(1),
        }
    }

    /// Identifier of the model behind this predictor
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Maximum number of candidates per result
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Predict the masked word of an already-validated sentence.
    ///
    /// The returned predictions are sorted by descending score and never
    /// longer than [`top_k`](Self::top_k), whatever the backend returned.
    pub fn predict(&self, sentence: &MaskedSentence) -> Result<CompletionResult, PredictError> {
        tracing::debug!(sentence = sentence.as_str(), top_k = self.top_k, "predicting");

        let mut predictions = self
            .model
            .fill_mask(sentence.as_str(), self.top_k)
            .map_err(PredictError::inference)?;

        predictions.retain(|p| p.score.is_finite());
        predictions.sort_by(|a, b| b.score.total_cmp(&a.score));
        predictions.truncate(self.top_k);

        CompletionResult::from_ranked(sentence.clone(), predictions)
            .ok_or_else(|| PredictError::Inference("Model returned no predictions".to_string()))
    }

    /// Validate raw text, then predict.
    pub fn predict_text(&self, text: &str) -> Result<CompletionResult, PredictError> {
        let sentence = MaskedSentence::new(text).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected sentence");
        })?;
        self.predict(&sentence)
    }

    /// Predict each sentence in turn, one result per input.
    ///
    /// Lazy: a sentence is only sent to the model when its result is pulled.
    pub fn predict_many<'a, I>(
        &'a self,
        texts: I,
    ) -> impl Iterator<Item = Result<CompletionResult, PredictError>> + 'a
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: 'a,
    {
        texts.into_iter().map(move |t| self.predict_text(t))
    }
}
