// Profile Extractor
// Implements: deterministic heuristics turning CV text into a flat candidate profile.
// No I/O here; document decoding is done by text_source before text reaches the pipeline.

pub mod career;
pub mod contact;
pub mod extractor;
pub mod handlers;
pub mod models;
pub mod skills;

pub use extractor::{extract_profile, ExtractorConfig};
pub use models::{CandidateProfile, ProfileField, ProfileSchema};

const PREVIEW_TRUNCATED_MARKER: &str = "\n\n[truncated]";

/// Collapses whitespace runs to single spaces and trims.
pub fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `limit` characters of the document, marked when cut.
pub fn raw_text_preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}{PREVIEW_TRUNCATED_MARKER}", &text[..idx]),
        None => text.to_string(),
    }
}
