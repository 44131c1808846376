// File:    lib.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: JSON API exposing the cipher workbench pages over HTTP.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The cipher workbench web API.
//!
//! One [`WebState`] is shared by every request. Submissions go through a single
//! coordinator, so a page that already has a submission in flight answers
//! `409 Conflict` until it finishes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use cipher_core::client::HttpTransport;
use cipher_core::coordinator::{Coordinator, Outcome};
use cipher_core::input::RawInput;
use cipher_core::key_order::KeywordTracker;
use cipher_core::preferences::{AppState, PreferenceStore};
use cipher_core::render::render;
use cipher_core::request::CipherKind;
use log::{error, warn};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

struct Session {
    state: AppState,
    store: Box<dyn PreferenceStore + Send>,
}

/// State shared by all handlers.
pub struct WebState {
    coordinator: Coordinator<HttpTransport>,
    session: Mutex<Session>,
}

impl WebState {
    /// Creates the shared state, forwarding submissions to `service_url` and
    /// keeping preferences in `store`.
    #[must_use]
    pub fn new(service_url: &str, store: Box<dyn PreferenceStore + Send>) -> Self {
        let state = AppState::load(&*store);
        Self {
            coordinator: Coordinator::new(HttpTransport::new(service_url)),
            session: Mutex::new(Session { state, store }),
        }
    }

    /// The computation service submissions are sent to.
    #[must_use]
    pub fn service_url(&self) -> &str {
        self.coordinator.transport().base_url()
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builds the API router.
#[must_use]
pub fn app(state: Arc<WebState>) -> Router {
    Router::new()
        .route("/api/submit", post(submit_handler))
        .route("/api/key-order", get(key_order_handler))
        .route("/api/theme", get(get_theme_handler))
        .route("/api/theme/toggle", post(toggle_theme_handler))
        .route("/api/ciphers", get(list_ciphers_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Validates and dispatches one page submission.
///
/// A body that does not decode into a page is rejected in the same JSON shape
/// as a failed validation.
async fn submit_handler(
    State(state): State<Arc<WebState>>,
    payload: Result<Json<RawInput>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            warn!("Rejected submission body: {}", rejection.body_text());
            return (
                rejection.status(),
                Json(json!({ "status": "rejected", "errors": [rejection.body_text()] })),
            );
        }
    };
    match state.coordinator.submit(&input).await {
        Outcome::Rendered(report) => (
            StatusCode::OK,
            Json(json!({
                "status": "rendered",
                "report": render(&report),
                "digest": report.digest(),
            })),
        ),
        Outcome::Rejected(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "status": "rejected", "errors": errors })),
        ),
        Outcome::Failed(diagnostic) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({
                "status": "failed",
                "kind": diagnostic.kind,
                "error": diagnostic.message,
            })),
        ),
        Outcome::Busy => (StatusCode::CONFLICT, Json(json!({ "status": "busy" }))),
    }
}

#[derive(Deserialize)]
struct KeyOrderQuery {
    #[serde(default)]
    keyword: String,
}

async fn key_order_handler(Query(query): Query<KeyOrderQuery>) -> Json<Value> {
    let tracker = KeywordTracker::new(&query.keyword);
    Json(json!({ "keyword": tracker.keyword(), "order": tracker.order() }))
}

async fn get_theme_handler(State(state): State<Arc<WebState>>) -> Json<Value> {
    let theme = state.session().state.theme;
    Json(json!({ "theme": theme }))
}

async fn toggle_theme_handler(State(state): State<Arc<WebState>>) -> (StatusCode, Json<Value>) {
    let mut session = state.session();
    let Session { state: app, store } = &mut *session;
    match app.toggle_theme(&mut **store) {
        Ok(theme) => (StatusCode::OK, Json(json!({ "theme": theme }))),
        Err(e) => {
            error!("Failed to save theme preference: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Failed to save theme preference: {e}") })),
            )
        }
    }
}

/// Lists every page with its service endpoint and submit control.
async fn list_ciphers_handler(State(state): State<Arc<WebState>>) -> Json<Value> {
    let ciphers: Vec<Value> = CipherKind::ALL
        .into_iter()
        .map(|kind| {
            let trigger = state.coordinator.trigger(kind);
            json!({
                "kind": kind,
                "endpoint": kind.endpoint(),
                "label": trigger.label(),
                "enabled": trigger.is_enabled(),
            })
        })
        .collect();
    Json(json!(ciphers))
}
