//! In-memory fill-mask models for tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{bail, Result};
use gapfill::{FillMaskModel, Prediction};

/// Returns a fixed, deliberately unsorted candidate list
pub struct FixedModel {
    candidates: Vec<(&'static str, f32)>,
    calls: Arc<AtomicUsize>,
}

impl FixedModel {
    pub fn new() -> Self {
        Self::with(vec![
            ("bed", 0.10),
            ("floor", 0.30),
            ("mat", 0.35),
            ("couch", 0.08),
            ("ground", 0.06),
            ("table", 0.05),
            ("sofa", 0.04),
        ])
    }

    pub fn with(candidates: Vec<(&'static str, f32)>) -> Self {
        Self {
            candidates,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle that keeps counting model calls after the model is moved
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl FillMaskModel for FixedModel {
    fn name(&self) -> &str {
        "fixed-test-model"
    }

    // Ignores top_k on purpose: the predictor must enforce it
    fn fill_mask(&self, _sentence: &str, _top_k: usize) -> Result<Vec<Prediction>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .candidates
            .iter()
            .map(|(token, score)| Prediction::new(*token, *score))
            .collect())
    }
}

/// Always fails inside the model call
pub struct FailingModel;

impl FillMaskModel for FailingModel {
    fn name(&self) -> &str {
        "failing-test-model"
    }

    fn fill_mask(&self, _sentence: &str, _top_k: usize) -> Result<Vec<Prediction>> {
        bail!("CUDA out of memory")
    }
}
