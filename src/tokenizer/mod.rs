use std::path::Path;

use anyhow::{anyhow, Result};
use tokenizers::{Encoding, Tokenizer};

use crate::engine::MASK_TOKEN;

/// Mask tokens recognised in pretrained vocabularies, in lookup order.
///
/// | Token    | Used by                      |
/// |----------|------------------------------|
/// | `[MASK]` | BERT, DistilBERT, ModernBERT |
/// | `<mask>` | RoBERTa, XLM-R               |
const MASK_CANDIDATES: &[&str] = &["[MASK]", "<mask>"];

/// Tokenizer wrapper that knows the vocabulary's mask token.
///
/// Sentences arrive with the generic `[MASK]` marker; [`to_model_text`]
/// rewrites it into whatever the vocabulary actually uses before encoding.
///
/// [`to_model_text`]: MaskTokenizer::to_model_text
pub struct MaskTokenizer {
    inner: Tokenizer,
    mask_token: String,
    mask_id: u32,
}

impl MaskTokenizer {
    /// Load a `tokenizer.json` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let inner = Tokenizer::from_file(path)
            .map_err(|e| anyhow!("Failed to load tokenizer '{}': {}", path.display(), e))?;
        Self::new(inner)
    }

    /// Parse a serialized tokenizer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let inner =
            Tokenizer::from_bytes(bytes).map_err(|e| anyhow!("Failed to parse tokenizer: {}", e))?;
        Self::new(inner)
    }

    /// Wrap a tokenizer, looking up its mask token.
    ///
    /// # Errors
    ///
    /// Fails when none of the known mask tokens is in the vocabulary; such a
    /// tokenizer cannot be used for fill-mask.
    pub fn new(inner: Tokenizer) -> Result<Self> {
        let (mask_token, mask_id) = MASK_CANDIDATES
            .iter()
            .find_map(|t| inner.token_to_id(t).map(|id| (t.to_string(), id)))
            .ok_or_else(|| {
                anyhow!(
                    "Tokenizer has no mask token (looked for {})",
                    MASK_CANDIDATES.join(", ")
                )
            })?;

        Ok(Self {
            inner,
            mask_token,
            mask_id,
        })
    }

    /// The vocabulary's own mask token
    pub fn mask_token(&self) -> &str {
        &self.mask_token
    }

    pub fn mask_id(&self) -> u32 {
        self.mask_id
    }

    /// Rewrite the generic marker into the vocabulary's mask token.
    pub fn to_model_text(&self, sentence: &str) -> String {
        if self.mask_token == MASK_TOKEN {
            sentence.to_string()
        } else {
            sentence.replace(MASK_TOKEN, &self.mask_token)
        }
    }

    /// Encode text with the vocabulary's special tokens added
    pub fn encode(&self, text: &str) -> Result<Encoding> {
        self.inner.encode(text, true).map_err(|e| {
            let preview: String = text.chars().take(50).collect();
            anyhow!("Tokenization failed on '{}': {}", preview, e)
        })
    }

    /// Position of the mask token in an encoding
    pub fn mask_position(&self, encoding: &Encoding) -> Option<usize> {
        encoding.get_ids().iter().position(|&id| id == self.mask_id)
    }

    /// Decode a single token id.
    ///
    /// Special tokens decode to an empty string.
    pub fn decode_token(&self, id: u32) -> String {
        self.inner
            .decode(&[id], true)
            .unwrap_or_default()
            .trim()
            .to_string()
    }

    /// Get vocabulary size (including added tokens)
    pub fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(true)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::word_level_json;
    use super::*;

    #[test]
    fn test_finds_bert_mask_token() {
        let tok = MaskTokenizer::from_bytes(word_level_json("[MASK]").as_bytes()).unwrap();
        assert_eq!(tok.mask_token(), "[MASK]");
        assert_eq!(tok.mask_id(), 1);
        assert_eq!(tok.to_model_text("the [MASK] sat"), "the [MASK] sat");
    }

    #[test]
    fn test_translates_roberta_mask_token() {
        let tok = MaskTokenizer::from_bytes(word_level_json("<mask>").as_bytes()).unwrap();
        assert_eq!(tok.mask_token(), "<mask>");
        assert_eq!(tok.to_model_text("the [MASK] sat"), "the <mask> sat");
    }

    #[test]
    fn test_mask_position_after_encoding() {
        let tok = MaskTokenizer::from_bytes(word_level_json("[MASK]").as_bytes()).unwrap();
        let encoding = tok.encode("the cat sat on the [MASK] .").unwrap();
        assert_eq!(tok.mask_position(&encoding), Some(5));
    }

    #[test]
    fn test_decode_skips_special_tokens() {
        let tok = MaskTokenizer::from_bytes(word_level_json("[MASK]").as_bytes()).unwrap();
        assert_eq!(tok.decode_token(6), "mat");
        assert_eq!(tok.decode_token(1), "");
    }

    #[test]
    fn test_rejects_vocab_without_mask() {
        let json = word_level_json("[SEP]");
        assert!(MaskTokenizer::from_bytes(json.as_bytes()).is_err());
    }
}
