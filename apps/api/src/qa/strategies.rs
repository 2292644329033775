use std::sync::Arc;

use async_trait::async_trait;

use crate::extraction::text::truncate_chars;
use crate::inference::{InferenceBackend, InferenceError};
use crate::qa::rules::rule_based_answer;

/// Context characters included in the generation prompt.
const PROMPT_CONTEXT_CHARS: usize = 1000;
/// Maximum length of an answer cut from generated text.
const MAX_GENERATED_ANSWER_CHARS: usize = 200;
const ANSWER_MARKER: &str = "Answer:";

/// One tier of the answer fallback chain.
#[async_trait]
pub trait AnswerStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Remote strategies are skipped when no inference credential is configured.
    fn is_remote(&self) -> bool;

    async fn answer(&self, question: &str, context: &str) -> Result<String, InferenceError>;
}

/// Extractive QA against the remote model.
pub struct ExtractiveQa {
    backend: Arc<dyn InferenceBackend>,
}

impl ExtractiveQa {
    pub fn new(backend: Arc<dyn InferenceBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl AnswerStrategy for ExtractiveQa {
    fn name(&self) -> &'static str {
        "extractive-qa"
    }

    fn is_remote(&self) -> bool {
        true
    }

    async fn answer(&self, question: &str, context: &str) -> Result<String, InferenceError> {
        self.backend.ask(question, context).await
    }
}

/// Free-text generation; the answer is whatever follows the final "Answer:" marker.
pub struct GenerativeFallback {
    backend: Arc<dyn InferenceBackend>,
}

impl GenerativeFallback {
    pub fn new(backend: Arc<dyn InferenceBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl AnswerStrategy for GenerativeFallback {
    fn name(&self) -> &'static str {
        "generative"
    }

    fn is_remote(&self) -> bool {
        true
    }

    async fn answer(&self, question: &str, context: &str) -> Result<String, InferenceError> {
        let prompt = generation_prompt(question, context);
        let generated = self.backend.generate(&prompt).await?;
        extract_marked_answer(&generated).ok_or(InferenceError::Malformed(
            "generated text has no answer after the marker",
        ))
    }
}

pub struct RuleBased;

#[async_trait]
impl AnswerStrategy for RuleBased {
    fn name(&self) -> &'static str {
        "rule-based"
    }

    fn is_remote(&self) -> bool {
        false
    }

    async fn answer(&self, question: &str, context: &str) -> Result<String, InferenceError> {
        Ok(rule_based_answer(question, context))
    }
}

fn generation_prompt(question: &str, context: &str) -> String {
    format!(
        "Context: {}\n\nQuestion: {question}\n\n{ANSWER_MARKER}",
        truncate_chars(context, PROMPT_CONTEXT_CHARS)
    )
}

/// Text after the last answer marker, trimmed and capped. `None` if there is
/// no marker or nothing follows it.
fn extract_marked_answer(generated: &str) -> Option<String> {
    let (_, answer) = generated.rsplit_once(ANSWER_MARKER)?;
    let answer = answer.trim();
    (!answer.is_empty()).then(|| truncate_chars(answer, MAX_GENERATED_ANSWER_CHARS))
}
