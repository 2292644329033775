use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;

use crate::candidates::ingest::{ingest_resume, IngestOutcome};
use crate::errors::AppError;
use crate::models::{CandidateRecord, CandidateSummary};
use crate::state::AppState;

/// Multipart field carrying the document.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub outcome: IngestOutcome,
}

/// POST /api/v1/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let outcome = ingest_resume(
            state.candidates.as_ref(),
            state.blobs.as_ref(),
            &filename,
            bytes,
        )
        .await?;

        return Ok(Json(UploadResponse {
            message: "Resume uploaded and processed successfully",
            outcome,
        }));
    }

    Err(AppError::Validation("No file provided".to_string()))
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateSummary>>, AppError> {
    Ok(Json(state.candidates.list_summaries().await?))
}

/// GET /api/v1/candidate/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<String>,
) -> Result<Json<CandidateRecord>, AppError> {
    let record = state
        .candidates
        .get_by_id(&candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;
    Ok(Json(record))
}
