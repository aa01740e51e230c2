use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::profile::{
    extract_profile, raw_text_preview, CandidateProfile, ProfileField, ProfileSchema,
};
use crate::state::AppState;

const RAW_TEXT_PREVIEW_CHARS: usize = 10_000;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
    pub schema: Option<ProfileSchema>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub schema: ProfileSchema,
    pub profile: CandidateProfile,
    /// Schema fields with labels, for editing before the link is built.
    pub fields: Vec<ProfileField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text_preview: Option<String>,
}

fn build_response(
    state: &AppState,
    text: &str,
    schema: Option<ProfileSchema>,
) -> ProfileResponse {
    let config = state
        .extractor
        .with_schema(schema.unwrap_or(state.extractor.schema));
    let profile = extract_profile(text, &config);
    ProfileResponse {
        schema: config.schema,
        fields: profile.fields(config.schema),
        profile,
        raw_text_preview: None,
    }
}

/// POST /api/v1/profile/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    Ok(Json(build_response(&state, &req.text, req.schema)))
}

/// POST /api/v1/profile/upload
///
/// Multipart parts: `file` (PDF, required) and `schema` (optional).
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProfileResponse>, AppError> {
    let mut document: Option<Bytes> = None;
    let mut schema: Option<ProfileSchema> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let is_pdf = field
                    .content_type()
                    .map(|ct| ct.eq_ignore_ascii_case("application/pdf"))
                    .unwrap_or(false)
                    || field
                        .file_name()
                        .map(|name| name.to_ascii_lowercase().ends_with(".pdf"))
                        .unwrap_or(false);
                if !is_pdf {
                    return Err(AppError::Validation(
                        "Only PDF documents are supported".to_string(),
                    ));
                }
                document = Some(field.bytes().await?);
            }
            "schema" => {
                let raw = field.text().await?;
                schema = Some(raw.parse().map_err(AppError::Validation)?);
            }
            _ => {}
        }
    }

    let document = document.ok_or_else(|| {
        AppError::Validation("Upload a candidate CV (PDF) in the 'file' field".to_string())
    })?;

    let text = state.text_source.extract_text(document).await?;
    let mut response = build_response(&state, &text, schema);
    response.raw_text_preview = Some(raw_text_preview(&text, RAW_TEXT_PREVIEW_CHARS));

    info!(
        schema = ?response.schema,
        name_found = !response.profile.full_name.is_empty(),
        "Profile extracted from upload"
    );
    Ok(Json(response))
}
