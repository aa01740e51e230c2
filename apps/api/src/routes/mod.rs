pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::form::handlers as form;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.upload_limit_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Profile API
        .route("/api/v1/profile/extract", post(profile::handle_extract))
        .route(
            "/api/v1/profile/upload",
            post(profile::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Form API
        .route("/api/v1/form/prefill", post(form::handle_prefill))
        .route("/api/v1/form/template", post(form::handle_parse_template))
        .route("/api/v1/form/config", get(form::handle_form_config))
        .with_state(state)
}
