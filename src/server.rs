//! HTTP routes: localized pages, the contact relay and a health check.

use crate::config::Config;
use crate::contact::{self, RelayError, RelaySettings};
use crate::i18n::{page_route, resolve_language, Catalog, Page, TranslationMetrics};
use crate::mailer::MailTransport;
use crate::pages;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

pub const SUCCESS_MESSAGE: &str = "Email sent successfully";
pub const FAILURE_MESSAGE: &str = "Failed to send email. Please try again later.";

/// Shared, read-only state of the running site.
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub mailer: Arc<dyn MailTransport>,
}

impl AppState {
    fn relay_settings(&self) -> RelaySettings {
        RelaySettings {
            from: self.config.email_from.clone(),
            to: self.config.email_to.clone(),
            timeout: self.config.smtp_timeout(),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/contact", post(handle_contact))
        .route("/health", get(handle_health))
        .fallback(get(handle_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_contact(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let result = contact::relay(&body, &state.relay_settings(), state.mailer.as_ref()).await;
    contact_response(result)
}

/// Map the outcome of a relay attempt to the JSON response the form expects.
pub fn contact_response(result: Result<(), RelayError>) -> Response {
    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": SUCCESS_MESSAGE })),
        )
            .into_response(),
        Err(RelayError::Invalid(e)) => {
            warn!("Rejected contact submission: {}", e);
            (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response()
        }
        Err(e) => {
            error!("Email sending error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": FAILURE_MESSAGE })),
            )
                .into_response()
        }
    }
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "translations": TranslationMetrics::global().report(),
    }))
}

async fn handle_page(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let path = uri.path();
    let locale = resolve_language(path);

    match page_route(path).map(Page::from_slug) {
        Some(Ok(page)) => Html(pages::render_page(
            &state.catalog,
            locale,
            page,
            &state.config.site_url,
        ))
        .into_response(),
        _ => {
            warn!("No page at {}", path);
            (
                StatusCode::NOT_FOUND,
                Html(pages::render_not_found(&state.catalog, locale, path)),
            )
                .into_response()
        }
    }
}
