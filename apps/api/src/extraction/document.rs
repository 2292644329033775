//! Document text adapter. Turns uploaded PDF / DOCX bytes into plain text.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::extraction::{panic_message, ExtractionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Accepts `pdf`, `.pdf`, `DOCX`, ... Anything else is unsupported.
    pub fn from_extension(ext: &str) -> Result<Self, ExtractionError> {
        let normalized = ext.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            _ => Err(ExtractionError::UnsupportedFormat(format!(".{normalized}"))),
        }
    }

}

/// Extension of an uploaded filename without the dot, or `""` if it has none.
pub fn file_extension(filename: &str) -> &str {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => f.write_str("pdf"),
            Self::Docx => f.write_str("docx"),
        }
    }
}

/// Extracts plain text from `bytes` declared as `ext`.
/// Fails with `UnsupportedFormat` before reading any bytes if `ext` is not PDF or DOCX.
pub fn extract_text(bytes: &[u8], ext: &str) -> Result<String, ExtractionError> {
    let format = DocumentFormat::from_extension(ext)?;
    extract_document_text(bytes, format)
}

fn extract_document_text(
    bytes: &[u8],
    format: DocumentFormat,
) -> Result<String, ExtractionError> {
    let text = match format {
        DocumentFormat::Pdf => pdf_text(bytes)?,
        DocumentFormat::Docx => docx_text(bytes)?,
    };
    debug!(
        "Extracted {} chars from {} document ({} bytes)",
        text.chars().count(),
        format,
        bytes.len()
    );
    Ok(text)
}

fn pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));

    match result {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Decode {
            format: DocumentFormat::Pdf,
            message: e.to_string(),
        }),
        Err(payload) => Err(ExtractionError::Decode {
            format: DocumentFormat::Pdf,
            message: panic_message(payload.as_ref()),
        }),
    }
}

/// Paragraph texts joined by newlines.
fn docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::Decode {
        format: DocumentFormat::Docx,
        message: e.to_string(),
    })?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .into_iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(paragraph) => Some(paragraph_text(&paragraph)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    docx_rs::RunChild::Text(t) => text.push_str(&t.text),
                    docx_rs::RunChild::Tab(_) => text.push('\t'),
                    _ => {}
                }
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use docx_rs::{Docx, Paragraph, Run};

    use super::*;

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
            docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
        });
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension(".pdf").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_extension("DOCX").unwrap(), DocumentFormat::Docx);
        assert!(matches!(
            DocumentFormat::from_extension(".txt"),
            Err(ExtractionError::UnsupportedFormat(ext)) if ext == ".txt"
        ));
    }

    #[test]
    fn test_format_from_filename() {
        assert_eq!(file_extension("Jane Doe CV.Pdf"), "Pdf");
        assert_eq!(
            DocumentFormat::from_extension(file_extension("Jane Doe CV.Pdf")).unwrap(),
            DocumentFormat::Pdf
        );
        assert!(DocumentFormat::from_extension(file_extension("resume.doc")).is_err());
        assert_eq!(file_extension("resume"), "");
        assert!(DocumentFormat::from_extension(file_extension("resume")).is_err());
    }

    #[test]
    fn test_unsupported_extension_fails_without_reading() {
        let err = extract_text(b"plain text resume", ".txt").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_docx_paragraphs_joined_by_newlines() {
        let bytes = build_docx(&["Jane Doe", "SKILLS", "Rust, Go"]);
        let text = extract_text(&bytes, ".docx").unwrap();
        assert_eq!(text, "Jane Doe\nSKILLS\nRust, Go");
    }

    #[test]
    fn test_garbage_bytes_are_decode_errors() {
        for ext in ["pdf", "docx"] {
            let err = extract_text(b"definitely not a document", ext).unwrap_err();
            assert!(matches!(err, ExtractionError::Decode { .. }), "{ext}: {err}");
        }
    }
}
