//! Request and result types for fill-mask prediction

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PredictError;

/// Placeholder users type where the missing word goes.
///
/// Backends whose tokenizer uses a different mask token translate it
/// themselves; callers always speak `[MASK]`.
pub const MASK_TOKEN: &str = "[MASK]";

/// A sentence with exactly one mask marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedSentence(String);

impl MaskedSentence {
    /// Validate `text` and wrap it.
    ///
    /// Sentences with no marker, or with more than one, are rejected before
    /// any model sees them.
    pub fn new(text: impl Into<String>) -> Result<Self, PredictError> {
        let text = text.into();
        match text.matches(MASK_TOKEN).count() {
            0 => Err(PredictError::Validation(format!(
                "Please include {} in your sentence",
                MASK_TOKEN
            ))),
            1 => Ok(Self(text)),
            n => Err(PredictError::Validation(format!(
                "Sentence must contain exactly one {}, found {}",
                MASK_TOKEN, n
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Replace the marker with `word`
    pub fn fill(&self, word: &str) -> String {
        self.0.replacen(MASK_TOKEN, word, 1)
    }
}

impl FromStr for MaskedSentence {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for MaskedSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One candidate for the masked position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub token: String,
    /// Probability in `[0, 1]`
    pub score: f32,
}

impl Prediction {
    pub fn new(token: impl Into<String>, score: f32) -> Self {
        Self {
            token: token.into(),
            score,
        }
    }

    /// Score as a percentage, for display
    pub fn percent(&self) -> f32 {
        self.score * 100.0
    }
}

/// Outcome of a successful prediction.
///
/// Only [`CompletionResult::from_ranked`] builds one, so there is always at
/// least one prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    sentence: MaskedSentence,
    completed_sentence: String,
    predictions: Vec<Prediction>,
}

impl CompletionResult {
    /// Build a result from ranked predictions.
    ///
    /// Returns `None` when there is nothing to complete the sentence with.
    pub fn from_ranked(sentence: MaskedSentence, predictions: Vec<Prediction>) -> Option<Self> {
        let best = predictions.first()?;
        let completed_sentence = sentence.fill(&highlight(&best.token));
        Some(Self {
            sentence,
            completed_sentence,
            predictions,
        })
    }

    /// The sentence as submitted
    pub fn sentence(&self) -> &MaskedSentence {
        &self.sentence
    }

    /// The sentence with the marker replaced by the best candidate
    pub fn completed_sentence(&self) -> &str {
        &self.completed_sentence
    }

    /// Candidates, best first
    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    /// Highest-ranked candidate
    pub fn best(&self) -> Option<&Prediction> {
        self.predictions.first()
    }
}

/// Format a filled-in word the way completions show it: `**WORD**`
pub fn highlight(word: &str) -> String {
    format!("**{}**", word.to_uppercase())
}
