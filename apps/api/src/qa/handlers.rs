use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub candidate_id: String,
    pub question: String,
    pub answer: String,
}

/// POST /api/v1/ask/:id
pub async fn handle_ask(
    State(state): State<AppState>,
    Path(candidate_id): Path<String>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(AppError::Validation("Question must not be empty".to_string()));
    }

    let record = state
        .candidates
        .get_by_id(&candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    let answer = state.composer.answer(question, &record).await;

    Ok(Json(AskResponse {
        candidate_id,
        question: question.to_string(),
        answer,
    }))
}
