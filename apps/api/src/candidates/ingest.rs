use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_document, file_extension, DocumentFormat};
use crate::models::CandidateRecord;
use crate::storage::{BlobStore, CandidateStore, StoredBlob};

#[derive(Debug, Serialize)]
pub struct IngestOutcome {
    pub candidate_id: String,
    pub upload: StoredBlob,
    pub extracted_data: CandidateRecord,
}

/// Upload pipeline:
/// 1. Validate the extension (no storage or extraction for unsupported files)
/// 2. Store the original document; its blob id becomes the candidate id
/// 3. Decode and extract on the blocking pool
/// 4. Persist the complete record
///
/// Nothing is saved to the candidate store unless extraction finished.
pub async fn ingest_resume(
    candidates: &dyn CandidateStore,
    blobs: &dyn BlobStore,
    filename: &str,
    bytes: Bytes,
) -> Result<IngestOutcome, AppError> {
    let ext = file_extension(filename).to_string();
    let format = DocumentFormat::from_extension(&ext)?;

    let upload = blobs.store(bytes.clone(), filename).await?;

    let mut record = tokio::task::spawn_blocking(move || extract_document(&bytes, &ext))
        .await
        .map_err(|e| AppError::Processing(format!("Extraction task failed: {e}")))??;

    record.candidate_id = upload.id.clone();
    candidates.save(&upload.id, &record).await?;

    info!(
        "Ingested {} resume {} as candidate {}",
        format, upload.filename, upload.id
    );

    Ok(IngestOutcome {
        candidate_id: upload.id.clone(),
        upload,
        extracted_data: record,
    })
}
