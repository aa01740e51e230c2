use std::sync::Arc;

use crate::config::Config;
use crate::profile::ExtractorConfig;
use crate::text_source::TextSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Extractor defaults; requests may override the schema.
    pub extractor: ExtractorConfig,
    /// Pluggable document decoder. Default: PdfTextSource.
    pub text_source: Arc<dyn TextSource>,
}

impl AppState {
    pub fn new(config: Config, text_source: Arc<dyn TextSource>) -> Self {
        let extractor = ExtractorConfig {
            schema: config.profile_schema,
            max_input_bytes: config.max_input_bytes,
            ..ExtractorConfig::default()
        };
        Self {
            config,
            extractor,
            text_source,
        }
    }
}
