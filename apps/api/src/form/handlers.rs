use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::form::builder::build_prefilled_url;
use crate::form::defaults::{OptionEntry, FORM_OPTION_ENTRIES};
use crate::form::template::{parse_prefill_template, suggest_mapping, EntryMap};
use crate::form::{FieldMapping, FieldValues};
use crate::profile::{CandidateProfile, ProfileSchema};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PrefillRequest {
    /// Edited field values; these override anything derived from `profile`.
    #[serde(default)]
    pub values: FieldValues,
    /// Extracted profile to seed the values from.
    pub profile: Option<CandidateProfile>,
    pub schema: Option<ProfileSchema>,
    /// Field → parameter table. Defaults to the configured mapping.
    pub mapping: Option<Value>,
    pub base_url: Option<String>,
    /// Example prefilled link; its base URL wins over `base_url`.
    pub template_url: Option<String>,
    #[serde(default)]
    pub keep_empty: bool,
}

#[derive(Debug, Serialize)]
pub struct PrefillResponse {
    pub url: String,
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct TemplateRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub base_url: String,
    pub entries: EntryMap,
    /// Present when the example link was filled with field names as values.
    pub suggested_mapping: FieldMapping,
}

#[derive(Debug, Serialize)]
pub struct FormConfigResponse {
    pub base_url: String,
    pub mapping: FieldMapping,
    pub option_entries: &'static [OptionEntry],
    pub profile_schema: ProfileSchema,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// POST /api/v1/form/prefill
pub async fn handle_prefill(
    State(state): State<AppState>,
    Json(req): Json<PrefillRequest>,
) -> Result<Json<PrefillResponse>, AppError> {
    let base_url = match non_blank(req.template_url.as_deref()) {
        Some(template_url) => parse_prefill_template(template_url).base_url,
        None => non_blank(req.base_url.as_deref())
            .unwrap_or(state.config.form_base_url.trim())
            .to_string(),
    };
    if base_url.is_empty() {
        return Err(AppError::Validation(
            "Please provide either a prefilled template URL or form base URL.".to_string(),
        ));
    }

    let mapping = match req.mapping {
        Some(raw) => FieldMapping::try_from(raw)?,
        None => state.config.form_mapping.clone(),
    };
    if mapping.is_empty() {
        return Err(AppError::Validation(
            "Please provide a valid field mapping JSON.".to_string(),
        ));
    }

    let schema = req.schema.unwrap_or(state.extractor.schema);
    let mut values = req
        .profile
        .map(|p| p.to_field_values(schema))
        .unwrap_or_default();
    values.extend(req.values);

    let url = build_prefilled_url(&base_url, &mapping, &values, req.keep_empty);
    info!(
        fields = mapping.len(),
        has_query = url.len() > base_url.len(),
        "Prefilled link generated"
    );
    Ok(Json(PrefillResponse { url, base_url }))
}

/// POST /api/v1/form/template
pub async fn handle_parse_template(
    Json(req): Json<TemplateRequest>,
) -> Result<Json<TemplateResponse>, AppError> {
    let url = non_blank(Some(req.url.as_str()))
        .ok_or_else(|| AppError::Validation("Template URL is required".to_string()))?;

    let template = parse_prefill_template(url);
    let known_fields = known_fields();
    let suggested_mapping = suggest_mapping(&template, &known_fields);

    Ok(Json(TemplateResponse {
        base_url: template.base_url,
        entries: template.entries,
        suggested_mapping,
    }))
}

/// GET /api/v1/form/config
pub async fn handle_form_config(State(state): State<AppState>) -> Json<FormConfigResponse> {
    Json(FormConfigResponse {
        base_url: state.config.form_base_url.clone(),
        mapping: state.config.form_mapping.clone(),
        option_entries: FORM_OPTION_ENTRIES,
        profile_schema: state.extractor.schema,
    })
}

/// Every field name a mapping may reference: both profile schemas plus option entries.
fn known_fields() -> Vec<&'static str> {
    let mut fields: Vec<&'static str> = ProfileSchema::Referral
        .field_names()
        .iter()
        .chain(ProfileSchema::Detailed.field_names())
        .copied()
        .chain(FORM_OPTION_ENTRIES.iter().map(|o| o.field))
        .collect();
    let mut seen = std::collections::HashSet::new();
    fields.retain(|f| seen.insert(*f));
    fields
}
