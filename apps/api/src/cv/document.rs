//! Uploaded document metadata: declared kind detection and pre-decode checks.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Upload ceiling carried over from the candidate upload form.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Resolves the declared type: MIME first, then file extension.
    /// No content sniffing; the decoder is the real validator.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Result<Self, FormatError> {
        let mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            PDF_MIME => return Ok(DocumentKind::Pdf),
            DOCX_MIME => return Ok(DocumentKind::Docx),
            _ => {}
        }

        let name = file_name.unwrap_or_default().to_ascii_lowercase();
        if name.ends_with(".pdf") {
            return Ok(DocumentKind::Pdf);
        }
        if name.ends_with(".docx") {
            return Ok(DocumentKind::Docx);
        }

        let declared = match (mime.is_empty(), name.is_empty()) {
            (false, false) => format!("{mime} ({name})"),
            (false, true) => mime,
            (true, false) => name,
            (true, true) => "unknown".to_string(),
        };
        Err(FormatError::Unsupported(declared))
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Docx => "DOCX",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The input could not be decoded at all. Callers fall back to manual entry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("{kind} file is empty")]
    Empty { kind: DocumentKind },

    #[error("Unsupported document format: {0}. Use PDF or DOCX")]
    Unsupported(String),

    #[error("{kind} file is corrupt or unreadable: {reason}")]
    Corrupt { kind: DocumentKind, reason: String },
}

/// A file selected by the candidate, with its declared kind.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub kind: DocumentKind,
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(kind: DocumentKind, file_name: Option<String>, bytes: Bytes) -> Self {
        Self {
            kind,
            file_name,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Rejects zero-byte uploads. Size limits are enforced by the caller,
    /// which owns the configured ceiling.
    pub fn ensure_not_empty(&self) -> Result<(), FormatError> {
        if self.bytes.is_empty() {
            return Err(FormatError::Empty { kind: self.kind });
        }
        Ok(())
    }

    pub fn exceeds(&self, max_bytes: usize) -> bool {
        self.bytes.len() > max_bytes
    }
}
