//! Remote inference client for extractive QA and text generation over the
//! Hugging Face hosted inference API.
//!
//! Every failure mode is an `InferenceError`. Callers treat all of them the same
//! way: fall through to the next answering strategy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_QA_URL: &str =
    "https://api-inference.huggingface.co/models/deepset/roberta-base-squad2";
pub const DEFAULT_GENERATION_URL: &str = "https://api-inference.huggingface.co/models/gpt2";

const GENERATION_MAX_LENGTH: u32 = 150;
const GENERATION_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Inference API error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Malformed inference payload: {0}")]
    Malformed(&'static str),

    #[error("No inference API key configured")]
    MissingCredential,
}

/// The two remote capabilities the answer composer relies on.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Extractive QA: the answer span for `question` within `context`.
    async fn ask(&self, question: &str, context: &str) -> Result<String, InferenceError>;

    /// Free-text generation continuing `prompt`. Returns the raw generated text.
    async fn generate(&self, prompt: &str) -> Result<String, InferenceError>;
}

#[derive(Debug, Serialize)]
struct QaRequest<'a> {
    inputs: QaInputs<'a>,
}

#[derive(Debug, Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_length: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct QaAnswer {
    answer: Option<String>,
}

/// The QA endpoint answers with either a single object or a list of candidates.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QaResponse {
    Single(QaAnswer),
    Batch(Vec<QaAnswer>),
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: Option<String>,
}

/// Bearer-token client for the hosted inference endpoints. No retries: the
/// answer composer's fallback chain is the retry policy.
#[derive(Clone)]
pub struct HuggingFaceClient {
    client: Client,
    api_key: Option<String>,
    qa_url: String,
    generation_url: String,
}

impl HuggingFaceClient {
    pub fn new(
        api_key: Option<String>,
        qa_url: String,
        generation_url: String,
        timeout: Duration,
    ) -> Result<Self, InferenceError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            qa_url,
            generation_url,
        })
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<String, InferenceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(InferenceError::MissingCredential)?;

        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Inference call to {url} succeeded ({} bytes)", body.len());
        Ok(body)
    }
}

#[async_trait]
impl InferenceBackend for HuggingFaceClient {
    async fn ask(&self, question: &str, context: &str) -> Result<String, InferenceError> {
        let request = QaRequest {
            inputs: QaInputs { question, context },
        };
        let body = self.post(&self.qa_url, &request).await?;
        parse_qa_answer(&body)
    }

    async fn generate(&self, prompt: &str) -> Result<String, InferenceError> {
        let request = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_length: GENERATION_MAX_LENGTH,
                temperature: GENERATION_TEMPERATURE,
            },
        };
        let body = self.post(&self.generation_url, &request).await?;
        parse_generated_text(&body)
    }
}

fn parse_qa_answer(body: &str) -> Result<String, InferenceError> {
    let answer = match serde_json::from_str::<QaResponse>(body)? {
        QaResponse::Single(single) => single.answer,
        QaResponse::Batch(batch) => batch.into_iter().next().and_then(|first| first.answer),
    };
    answer.ok_or(InferenceError::Malformed("QA response has no answer"))
}

fn parse_generated_text(body: &str) -> Result<String, InferenceError> {
    let generations: Vec<Generation> = serde_json::from_str(body)?;
    generations
        .into_iter()
        .next()
        .and_then(|first| first.generated_text)
        .ok_or(InferenceError::Malformed("generation response has no generated_text"))
}

#[cfg(test)]
pub use scripted::ScriptedBackend;
