//! Document Text Extractor: turns PDF / DOCX bytes into flat UTF-8 text.
//!
//! Decoding is delegated to `pdf-extract` and `docx-rs`. Anything those
//! libraries reject is reported as [`FormatError::Corrupt`]; there is no
//! attempt to salvage a partially readable file.

use std::panic::{self, AssertUnwindSafe};

use async_trait::async_trait;
use docx_rs::{
    DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::debug;

use crate::cv::document::{DocumentKind, FormatError, UploadedDocument};

/// PDFs with less trimmed text than this are most likely image scans.
pub const SCANNED_PDF_THRESHOLD: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedText {
    pub kind: DocumentKind,
    pub text: String,
    pub char_count: usize,
    /// Set when a PDF decoded but carries (almost) no text layer.
    pub likely_scanned: bool,
}

/// Either the file itself is bad, or the decoder task never finished.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("text extraction task failed: {0}")]
    Task(#[from] JoinError),
}

/// Extractor seam. `AppState` holds an `Arc<dyn TextExtractor>`.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: &UploadedDocument) -> Result<ExtractedText, ExtractError>;
}

/// Default extractor backed by the document libraries, run off the async
/// executor since decoding is CPU-bound.
pub struct LibraryTextExtractor;

#[async_trait]
impl TextExtractor for LibraryTextExtractor {
    async fn extract(&self, document: &UploadedDocument) -> Result<ExtractedText, ExtractError> {
        let kind = document.kind;
        let bytes = document.bytes.clone();

        let extracted = tokio::task::spawn_blocking(move || extract_text(&bytes, kind)).await??;
        Ok(extracted)
    }
}

/// Decodes `bytes` as `kind` and returns its text with normalized line breaks.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<ExtractedText, FormatError> {
    if bytes.is_empty() {
        return Err(FormatError::Empty { kind });
    }

    // Both decoders have been seen to panic on hostile input.
    let decoded = panic::catch_unwind(AssertUnwindSafe(|| match kind {
        DocumentKind::Pdf => extract_pdf(bytes),
        DocumentKind::Docx => extract_docx(bytes),
    }))
    .map_err(|_| FormatError::Corrupt {
        kind,
        reason: "decoder aborted on malformed structure".to_string(),
    })??;

    let text = normalize_line_breaks(&decoded);
    let char_count = text.chars().count();
    let likely_scanned = kind == DocumentKind::Pdf && char_count < SCANNED_PDF_THRESHOLD;

    debug!(
        kind = %kind,
        input_bytes = bytes.len(),
        char_count,
        likely_scanned,
        "Document decoded"
    );

    Ok(ExtractedText {
        kind,
        text,
        char_count,
        likely_scanned,
    })
}

fn extract_pdf(bytes: &[u8]) -> Result<String, FormatError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| FormatError::Corrupt {
        kind: DocumentKind::Pdf,
        reason: e.to_string(),
    })
}

fn extract_docx(bytes: &[u8]) -> Result<String, FormatError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| FormatError::Corrupt {
        kind: DocumentKind::Docx,
        reason: e.to_string(),
    })?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(para) => lines.push(paragraph_text(para)),
            DocumentChild::Table(table) => push_table_lines(table, &mut lines),
            _ => {}
        }
    }

    Ok(lines.join("\n"))
}

/// One line per cell paragraph, rows read left to right.
fn push_table_lines(table: &Table, lines: &mut Vec<String>) {
    for TableChild::TableRow(row) in &table.rows {
        for TableRowChild::TableCell(cell) in &row.cells {
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(para) => lines.push(paragraph_text(para)),
                    TableCellContent::Table(nested) => push_table_lines(nested, lines),
                    _ => {}
                }
            }
        }
    }
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        push_paragraph_child(child, &mut text);
    }
    text
}

fn push_paragraph_child(child: &ParagraphChild, out: &mut String) {
    match child {
        ParagraphChild::Run(run) => push_run(run, out),
        // Word turns typed e-mail addresses and URLs into hyperlinks.
        ParagraphChild::Hyperlink(link) => {
            for inner in &link.children {
                push_paragraph_child(inner, out);
            }
        }
        // Tracked insertions are part of the visible text.
        ParagraphChild::Insert(insert) => {
            for inner in &insert.children {
                if let InsertChild::Run(run) = inner {
                    push_run(run, out);
                }
            }
        }
        _ => {}
    }
}

fn push_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

/// `\r\n`, `\r` and form feeds become `\n`; trailing spaces are dropped per line.
pub fn normalize_line_breaks(raw: &str) -> String {
    let unified = raw
        .replace("\r\n", "\n")
        .replace(['\r', '\x0C'], "\n");

    unified
        .split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
