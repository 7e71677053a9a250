//! Terminal rendering of prediction results

use crate::engine::{CompletionResult, Prediction};

/// Sentences offered by the interactive menu and the web page
pub const EXAMPLES: &[&str] = &[
    "The cat sat on the [MASK].",
    "I love to eat [MASK] for breakfast.",
    "The [MASK] is shining brightly today.",
    "Python is a [MASK] programming language.",
    "Machine learning is a subset of artificial [MASK].",
    "The capital of France is [MASK].",
    "She went to the [MASK] to buy groceries.",
    "Water boils at 100 degrees [MASK].",
];

const RULE_WIDTH: usize = 70;

/// One block per two percentage points
pub fn confidence_bar(prediction: &Prediction) -> String {
    let blocks = (prediction.percent() / 2.0).floor().clamp(0.0, 50.0) as usize;
    "█".repeat(blocks)
}

/// Ranked line for one prediction, e.g. ` 1. MAT             42.10% █████...`
pub fn render_prediction(rank: usize, prediction: &Prediction) -> String {
    format!(
        "{}. {:<15} {:>6.2}% {}",
        rank,
        prediction.token.to_uppercase(),
        prediction.percent(),
        confidence_bar(prediction)
    )
}

/// Full report: input, ranked predictions, best completion
pub fn render_result(result: &CompletionResult) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{}\nInput sentence: {}\n{}\n\n", rule, result.sentence(), rule));
    out.push_str(&format!("Top {} predictions:\n\n", result.predictions().len()));
    for (i, prediction) in result.predictions().iter().enumerate() {
        out.push_str(&render_prediction(i + 1, prediction));
        out.push('\n');
    }
    out.push_str(&format!(
        "\n{}\nBest completion:\n   {}\n{}\n",
        rule, result.completed_sentence(), rule
    ));
    out
}

/// Startup banner for the interactive menu
pub fn banner() -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{}\nGAP FILLING WITH MASKED LANGUAGE MODELING\n{}\n", rule, rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MaskedSentence;

    #[test]
    fn test_confidence_bar_blocks() {
        assert_eq!(confidence_bar(&Prediction::new("a", 0.5)).chars().count(), 25);
        assert_eq!(confidence_bar(&Prediction::new("a", 0.019)).chars().count(), 0);
        assert_eq!(confidence_bar(&Prediction::new("a", 1.0)).chars().count(), 50);
    }

    #[test]
    fn test_render_prediction_line() {
        let line = render_prediction(1, &Prediction::new("mat", 0.1234));
        assert!(line.starts_with("1. MAT "));
        assert!(line.contains(" 12.34% "));
        assert!(line.ends_with("██████"));
    }

    #[test]
    fn test_render_result_sections() {
        let sentence = MaskedSentence::new("The cat sat on the [MASK].").unwrap();
        let result = CompletionResult::from_ranked(
            sentence,
            vec![Prediction::new("floor", 0.4), Prediction::new("bed", 0.2)],
        )
        .unwrap();

        let text = render_result(&result);
        assert!(text.contains("Input sentence: The cat sat on the [MASK]."));
        assert!(text.contains("Top 2 predictions:"));
        assert!(text.contains("1. FLOOR"));
        assert!(text.contains("2. BED"));
        assert!(text.contains("The cat sat on the **FLOOR**."));
    }

    #[test]
    fn test_examples_all_have_one_marker() {
        for example in EXAMPLES {
            assert!(MaskedSentence::new(*example).is_ok(), "{}", example);
        }
    }
}
