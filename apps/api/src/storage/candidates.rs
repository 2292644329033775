use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::{CandidateRecord, CandidateSummary};

/// Candidate record persistence. A record is stored and replaced as a whole.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Upserts `record` under `candidate_id`, replacing any prior record.
    async fn save(&self, candidate_id: &str, record: &CandidateRecord) -> Result<(), AppError>;

    async fn get_by_id(&self, candidate_id: &str) -> Result<Option<CandidateRecord>, AppError>;

    /// Summaries of every stored candidate, most recently updated first.
    async fn list_summaries(&self) -> Result<Vec<CandidateSummary>, AppError>;
}

/// Stores each record as one JSONB document in the `candidates` table.
#[derive(Clone)]
pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn save(&self, candidate_id: &str, record: &CandidateRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO candidates (candidate_id, record)
            VALUES ($1, $2)
            ON CONFLICT (candidate_id)
            DO UPDATE SET record = EXCLUDED.record, updated_at = NOW()
            "#,
        )
        .bind(candidate_id)
        .bind(Json(record))
        .execute(&self.pool)
        .await?;

        info!("Saved candidate record {candidate_id}");
        Ok(())
    }

    async fn get_by_id(&self, candidate_id: &str) -> Result<Option<CandidateRecord>, AppError> {
        let record: Option<Json<CandidateRecord>> =
            sqlx::query_scalar("SELECT record FROM candidates WHERE candidate_id = $1")
                .bind(candidate_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(record.map(|Json(record)| record))
    }

    async fn list_summaries(&self) -> Result<Vec<CandidateSummary>, AppError> {
        let records: Vec<Json<CandidateRecord>> =
            sqlx::query_scalar("SELECT record FROM candidates ORDER BY updated_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(records
            .iter()
            .map(|Json(record)| CandidateSummary::from(record))
            .collect())
    }
}

#[cfg(test)]
pub use memory::MemoryCandidateStore;
