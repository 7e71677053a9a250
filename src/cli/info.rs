//! Model info command

use anyhow::Result;

use crate::config::GapfillConfig;
use crate::loader;
use crate::model::ArchitectureSummary;
use crate::tokenizer::MaskTokenizer;

/// Show model information without loading the weights
pub async fn info(config: GapfillConfig) -> Result<()> {
    let id = config.model.id.clone();
    let files = tokio::task::spawn_blocking(move || loader::resolve_model_files(&config)).await??;

    println!("Model: {}\n", id);
    println!("Weights: {} ({})", files.weights.display(), files.format);

    let summary = ArchitectureSummary::from_file(&files.config)?;
    println!("\nConfiguration:");
    println!("  Architecture: {}", summary.model_type());
    if !summary.architectures.is_empty() {
        println!("  Heads: {}", summary.architectures.join(", "));
    }
    println!("  Vocab size: {}", summary.vocab_size);
    println!("  Hidden size: {}", summary.hidden_size);
    println!("  Layers: {}", summary.num_hidden_layers);
    println!("  Attention heads: {}", summary.num_attention_heads);
    println!("  Max positions: {}", summary.max_position_embeddings);

    let tokenizer = MaskTokenizer::from_file(&files.tokenizer)?;
    println!("\nTokenizer:");
    println!("  Vocab size: {}", tokenizer.vocab_size());
    println!("  Mask token: {} (id {})", tokenizer.mask_token(), tokenizer.mask_id());

    Ok(())
}
