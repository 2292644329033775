use std::sync::Arc;

use crate::config::Config;
use crate::qa::AnswerComposer;
use crate::storage::{BlobStore, CandidateStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Extracted candidate records. Default: PgCandidateStore.
    pub candidates: Arc<dyn CandidateStore>,
    /// Original uploaded documents. Default: S3BlobStore.
    pub blobs: Arc<dyn BlobStore>,
    pub composer: Arc<AnswerComposer>,
    pub config: Config,
}
