//! Candidate API: resume upload/ingestion and record lookup.

pub mod handlers;
pub mod ingest;
