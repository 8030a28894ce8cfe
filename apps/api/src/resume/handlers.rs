//! Axum route handlers for resume uploads.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::resume::experience::ExperienceReport;
use crate::resume::extract::extract_text;
use crate::resume::summary::{summarize, ResumeSummary};
use crate::skills::load_matcher;
use crate::state::AppState;

/// Multipart field carrying the uploaded document.
pub const FILE_FIELD: &str = "file";

/// POST /parse
///
/// Extracts the PDF text and returns name, email and dictionary-matched skills.
/// The skill dictionary is re-read on every request.
pub async fn handle_parse(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeSummary>, AppError> {
    let upload = read_upload(multipart).await?;
    let text = extract_text(upload).await?;

    let skills_path = state.config.skills_path.clone();
    let matcher = tokio::task::spawn_blocking(move || load_matcher(&skills_path))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    let summary = summarize(&text, &matcher);
    info!(
        "Parsed resume: {} of {} skills matched",
        summary.skills.len(),
        matcher.skill_count()
    );

    Ok(Json(summary))
}

/// POST /extract-experience
///
/// Sends the PDF text to the completion API and returns structured experience.
/// An undecodable model reply yields an empty list with a warning, not an error.
pub async fn handle_extract_experience(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExperienceReport>, AppError> {
    let upload = read_upload(multipart).await?;
    let text = extract_text(upload).await?;

    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No extractable text found in the uploaded PDF".to_string(),
        ));
    }

    let report = state.experience.extract(&text).await?;
    info!("Extracted {} experience entries", report.experiences.len());

    Ok(Json(report))
}

/// Pulls the bytes of the `file` field out of a multipart body.
async fn read_upload(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        if data.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }

        debug!("Received upload '{filename}' ({} bytes)", data.len());
        return Ok(data);
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}
