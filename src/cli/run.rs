//! Interactive menu

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;
use console::Term;
use dialoguer::{Input, Select};

use crate::config::GapfillConfig;
use crate::engine::{Predictor, MASK_TOKEN};

use super::display::{banner, render_result, EXAMPLES};

const MENU: &[&str] = &[
    "Try example sentences",
    "Enter your own sentence",
    "Batch process multiple sentences",
    "Exit",
];

/// Run the interactive menu until the user picks "Exit" or input ends
pub async fn run(config: GapfillConfig) -> Result<()> {
    println!("{}", banner());

    let predictor = super::load_with_spinner(&config)?;
    tracing::info!("Model ready");

    // Prompts block on stdin; keep them off the async runtime
    tokio::task::spawn_blocking(move || {
        let mut out = io::stdout();
        if io::stdin().is_terminal() && Term::stderr().is_term() {
            main_menu(&predictor, &mut TermPrompt, &mut out)
        } else {
            tracing::debug!("stdin is not a terminal, reading answers line by line");
            let mut prompt = LinePrompt::new(io::stdin().lock());
            main_menu(&predictor, &mut prompt, &mut out)
        }
    })
    .await?
}

/// Source of menu answers
trait Prompt {
    /// Pick one of `items`. `None` once input is exhausted.
    fn select(
        &mut self,
        out: &mut dyn Write,
        prompt: &str,
        items: &[&str],
    ) -> Result<Option<usize>>;

    /// Read one line of text. `None` once input is exhausted.
    fn line(&mut self, out: &mut dyn Write, prompt: &str) -> Result<Option<String>>;
}

/// Arrow-key menus on a terminal
struct TermPrompt;

impl Prompt for TermPrompt {
    fn select(
        &mut self,
        _out: &mut dyn Write,
        prompt: &str,
        items: &[&str],
    ) -> Result<Option<usize>> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()?)
    }

    fn line(&mut self, _out: &mut dyn Write, prompt: &str) -> Result<Option<String>> {
        let text: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(text))
    }
}

/// Numbered choices read one line at a time, for piped input
struct LinePrompt<R> {
    input: R,
}

impl<R: BufRead> LinePrompt<R> {
    fn new(input: R) -> Self {
        Self { input }
    }

    fn read(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead> Prompt for LinePrompt<R> {
    fn select(
        &mut self,
        out: &mut dyn Write,
        prompt: &str,
        items: &[&str],
    ) -> Result<Option<usize>> {
        writeln!(out, "\n{}:", prompt)?;
        for (i, item) in items.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, item)?;
        }

        loop {
            write!(out, "Select option (1-{}): ", items.len())?;
            out.flush()?;

            let Some(answer) = self.read()? else {
                return Ok(None);
            };
            match answer.trim().parse::<usize>() {
                Ok(n) if (1..=items.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => writeln!(out, "Invalid choice! Please select 1-{}.", items.len())?,
            }
        }
    }

    fn line(&mut self, out: &mut dyn Write, prompt: &str) -> Result<Option<String>> {
        write!(out, "{}: ", prompt)?;
        out.flush()?;
        self.read()
    }
}

fn main_menu(predictor: &Predictor, prompt: &mut dyn Prompt, out: &mut dyn Write) -> Result<()> {
    while let Some(selection) = prompt.select(out, "Menu", MENU)? {
        match selection {
            0 => handle_example(predictor, prompt, out)?,
            1 => handle_custom(predictor, prompt, out)?,
            2 => handle_batch(predictor, prompt, out)?,
            _ => break,
        }
    }

    writeln!(out, "\nThank you for using gapfill!\n")?;
    Ok(())
}

fn handle_example(
    predictor: &Predictor,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<()> {
    if let Some(choice) = prompt.select(out, "Select example", EXAMPLES)? {
        show(predictor, out, EXAMPLES[choice])?;
    }
    Ok(())
}

fn handle_custom(
    predictor: &Predictor,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<()> {
    let label = format!("Enter sentence with {}", MASK_TOKEN);
    if let Some(sentence) = prompt.line(out, &label)? {
        show(predictor, out, sentence.trim())?;
    }
    Ok(())
}

/// Collect sentences until an empty line, then predict and show each in turn.
fn handle_batch(
    predictor: &Predictor,
    prompt: &mut dyn Prompt,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "\nBatch mode: enter sentences one by one (empty line to finish)")?;

    let mut sentences = Vec::new();
    loop {
        let label = format!("Sentence {}", sentences.len() + 1);
        match prompt.line(out, &label)? {
            Some(sentence) if !sentence.trim().is_empty() => {
                sentences.push(sentence.trim().to_string())
            }
            _ => break,
        }
    }

    writeln!(out, "\nProcessing {} sentences...\n", sentences.len())?;
    let results = predictor.predict_many(sentences.iter().map(String::as_str));
    for (sentence, result) in sentences.iter().zip(results) {
        match result {
            Ok(result) => {
                writeln!(out, "{}", render_result(&result))?;
                if prompt.line(out, "Press Enter to continue")?.is_none() {
                    break;
                }
            }
            Err(e) => writeln!(out, "Skipping '{}': {}\n", sentence, e)?,
        }
    }
    Ok(())
}

fn show(predictor: &Predictor, out: &mut dyn Write, sentence: &str) -> Result<()> {
    match predictor.predict_text(sentence) {
        Ok(result) => writeln!(out, "{}", render_result(&result))?,
        Err(e) => writeln!(out, "Error: {}", e)?,
    }
    Ok(())
}
