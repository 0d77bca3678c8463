use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cv::document::{DocumentKind, UploadedDocument};
use crate::cv::draft::DraftCandidateRecord;
use crate::cv::ingest::{parse_document, ParseOutcome};
use crate::cv::prefill::{prefill_form, ProfileForm};
use crate::cv::suggestions::suggest_skills;
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart field carrying the CV.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Deserialize)]
pub struct SuggestSkillsRequest {
    pub title: String,
}

#[derive(Serialize)]
pub struct SuggestSkillsResponse {
    pub skills: Vec<String>,
}

#[derive(Deserialize)]
pub struct PrefillRequest {
    pub draft: DraftCandidateRecord,
    #[serde(default)]
    pub current_form: ProfileForm,
}

/// POST /api/v1/cv/parse
pub async fn handle_parse_cv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseOutcome>, AppError> {
    let document = read_upload(&mut multipart, state.config.max_upload_bytes).await?;
    let outcome = parse_document(&document, state.extractor.as_ref(), &state.segmenter).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/cv/suggest-skills
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
    Json(req): Json<SuggestSkillsRequest>,
) -> Result<Json<SuggestSkillsResponse>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    let skills = suggest_skills(&req.title, state.segmenter.dictionaries());
    Ok(Json(SuggestSkillsResponse { skills }))
}

/// POST /api/v1/cv/prefill
pub async fn handle_prefill(Json(req): Json<PrefillRequest>) -> Json<ProfileForm> {
    Json(prefill_form(&req.draft, req.current_form, Utc::now()))
}

/// Pulls the first `file` field out of the form. Other fields are skipped.
async fn read_upload(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<UploadedDocument, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let kind = DocumentKind::detect(content_type.as_deref(), file_name.as_deref())?;

        let bytes = field.bytes().await.map_err(multipart_error)?;
        let document = UploadedDocument::new(kind, file_name, bytes);
        if document.exceeds(max_bytes) {
            return Err(AppError::PayloadTooLarge(format!(
                "CV is {} bytes; the limit is {max_bytes} bytes",
                document.len()
            )));
        }
        return Ok(document);
    }

    Err(AppError::Validation(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}
