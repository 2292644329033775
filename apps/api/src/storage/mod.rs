//! Persistence collaborators for candidate records (PostgreSQL) and uploaded
//! documents (S3 / MinIO).
//!
//! `AppState` holds both as trait objects so handlers never depend on a
//! concrete backend.

pub mod blobs;
pub mod candidates;

pub use blobs::{BlobStore, S3BlobStore, StoredBlob};
pub use candidates::{CandidateStore, PgCandidateStore};

#[cfg(test)]
pub use blobs::MemoryBlobStore;
#[cfg(test)]
pub use candidates::MemoryCandidateStore;
