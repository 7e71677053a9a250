//! One-shot prediction command

use anyhow::Result;

use crate::config::GapfillConfig;
use crate::engine::MaskedSentence;
use crate::server::PredictResponse;

use super::display::render_result;

/// Predict one sentence and print the result
pub async fn predict(config: GapfillConfig, sentence: String, json: bool) -> Result<()> {
    // Validate before loading the model
    let sentence = MaskedSentence::new(sentence.trim())?;

    let predictor = super::load_with_spinner(&config)?;
    let result = tokio::task::spawn_blocking(move || predictor.predict(&sentence)).await??;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&PredictResponse::from(&result))?
        );
    } else {
        println!("{}", render_result(&result));
    }
    Ok(())
}
