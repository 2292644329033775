//! Resume field extraction engine.
//!
//! Flow: raw bytes → `document` (PDF/DOCX → text) → `section` (header-keyword
//! segmentation) → one extractor per field → `CandidateRecord`.
//!
//! Extraction is pure, synchronous and CPU-bound. Callers on the async runtime
//! run it inside `tokio::task::spawn_blocking`.

pub mod certifications;
pub mod document;
pub mod education;
pub mod experience;
pub mod hobbies;
pub mod introduction;
pub mod projects;
pub mod section;
pub mod skills;
pub mod text;

use std::any::Any;
use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::CandidateRecord;

pub use certifications::extract_certifications;
pub use document::{extract_text, file_extension, DocumentFormat};
pub use education::extract_education;
pub use experience::extract_experience;
pub use hobbies::extract_hobbies;
pub use introduction::extract_introduction;
pub use projects::extract_projects;
pub use skills::extract_skills;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}. Only PDF and DOCX files are allowed.")]
    UnsupportedFormat(String),

    #[error("Failed to extract text from {format} document: {message}")]
    Decode {
        format: DocumentFormat,
        message: String,
    },
}

/// Decodes a document declared as `ext` and extracts every field from its text.
/// The returned record has an empty `candidate_id`; the caller assigns it.
pub fn extract_document(bytes: &[u8], ext: &str) -> Result<CandidateRecord, ExtractionError> {
    let text = extract_text(bytes, ext)?;
    Ok(extract_candidate(&text))
}

/// Runs every field extractor over `text`.
///
/// Each extractor is isolated: an error or panic inside one field is logged and
/// degrades that field to its empty default instead of failing the record.
pub fn extract_candidate(text: &str) -> CandidateRecord {
    let text = normalize_line_endings(text);
    let text = text.as_ref();

    let record = CandidateRecord {
        candidate_id: String::new(),
        introduction: isolate("introduction", || Ok(extract_introduction(text))),
        education: isolate("education", || Ok(extract_education(text))),
        experience: isolate("experience", || Ok(extract_experience(text))),
        skills: isolate("skills", || Ok(extract_skills(text))),
        hobbies: isolate("hobbies", || Ok(extract_hobbies(text))),
        certifications: isolate("certifications", || Ok(extract_certifications(text))),
        projects: isolate("projects", || Ok(extract_projects(text))),
    };

    debug!(
        "Extracted {} education, {} experience, {} skills, {} projects",
        record.education.len(),
        record.experience.len(),
        record.skills.len(),
        record.projects.len()
    );

    record
}

fn isolate<T, F>(field: &'static str, extractor: F) -> T
where
    T: Default,
    F: FnOnce() -> Result<T, ExtractionError>,
{
    match panic::catch_unwind(AssertUnwindSafe(extractor)) {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            warn!("{field} extractor failed, using empty default: {e}");
            T::default()
        }
        Err(payload) => {
            warn!(
                "{field} extractor panicked, using empty default: {}",
                panic_message(payload.as_ref())
            );
            T::default()
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
