use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cv::document::{DocumentKind, UploadedDocument};
use crate::cv::draft::{DraftCandidateRecord, ExtractionStatus};
use crate::cv::extractor::{ExtractError, TextExtractor};
use crate::cv::segmenter::Segmenter;

/// What was decoded, without any of its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub kind: DocumentKind,
    pub file_name: Option<String>,
    pub size_bytes: usize,
    pub char_count: usize,
    pub likely_scanned: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseOutcome {
    /// Log correlation only; not part of the draft.
    pub parse_id: Uuid,
    pub status: ExtractionStatus,
    pub draft: DraftCandidateRecord,
    pub document: DocumentSummary,
    pub raw_text: String,
}

/// Extracts and segments one uploaded CV.
///
/// Only an undecodable file is an error. A file that decodes but yields
/// nothing comes back with `status: Empty` so the form can say so.
pub async fn parse_document(
    document: &UploadedDocument,
    extractor: &dyn TextExtractor,
    segmenter: &Segmenter,
) -> Result<ParseOutcome, ExtractError> {
    let parse_id = Uuid::new_v4();
    document.ensure_not_empty()?;

    let extracted = extractor.extract(document).await.map_err(|e| {
        warn!(%parse_id, kind = %document.kind, error = %e, "CV could not be decoded");
        e
    })?;

    let draft = segmenter.segment(&extracted.text);
    let status = draft.status();

    info!(
        %parse_id,
        kind = %document.kind,
        size_bytes = document.len(),
        char_count = extracted.char_count,
        likely_scanned = extracted.likely_scanned,
        status = ?status,
        has_name = draft.full_name.is_some(),
        has_email = draft.email.is_some(),
        has_phone = draft.phone.is_some(),
        skills = draft.skills.len(),
        languages = draft.languages.len(),
        experiences = draft.experiences.len(),
        formations = draft.formations.len(),
        "CV parsed"
    );

    Ok(ParseOutcome {
        parse_id,
        status,
        draft,
        document: DocumentSummary {
            kind: document.kind,
            file_name: document.file_name.clone(),
            size_bytes: document.len(),
            char_count: extracted.char_count,
            likely_scanned: extracted.likely_scanned,
        },
        raw_text: extracted.text,
    })
}
