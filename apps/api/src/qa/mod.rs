//! Question answering over a stored candidate record.
//!
//! `AnswerComposer` walks an ordered list of strategies (extractive QA →
//! generative → local rules) and returns the first answer produced. The
//! rule-based tier cannot fail, so answering a question never errors.

pub mod context;
pub mod handlers;
pub mod rules;
pub mod strategies;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::inference::InferenceBackend;
use crate::models::CandidateRecord;

pub use context::format_candidate_context;
pub use strategies::{AnswerStrategy, ExtractiveQa, GenerativeFallback, RuleBased};

pub struct AnswerComposer {
    strategies: Vec<Box<dyn AnswerStrategy>>,
    /// No inference credential configured: remote strategies are never tried.
    degraded: bool,
}

impl AnswerComposer {
    pub fn new(strategies: Vec<Box<dyn AnswerStrategy>>, degraded: bool) -> Self {
        Self {
            strategies,
            degraded,
        }
    }

    /// The standard three-tier chain over one inference backend.
    pub fn from_backend(backend: Arc<dyn InferenceBackend>, degraded: bool) -> Self {
        Self::new(
            vec![
                Box::new(ExtractiveQa::new(backend.clone())),
                Box::new(GenerativeFallback::new(backend)),
                Box::new(RuleBased),
            ],
            degraded,
        )
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub async fn answer(&self, question: &str, record: &CandidateRecord) -> String {
        let context = format_candidate_context(record);

        for strategy in &self.strategies {
            if self.degraded && strategy.is_remote() {
                continue;
            }
            match strategy.answer(question, &context).await {
                Ok(answer) => {
                    debug!(
                        "Answered question for {} via {}",
                        record.candidate_id,
                        strategy.name()
                    );
                    return answer;
                }
                Err(e) => warn!("{} strategy failed, falling back: {e}", strategy.name()),
            }
        }

        rules::rule_based_answer(question, &context)
    }
}
