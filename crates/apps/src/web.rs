//! Form-based web front-end.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use rp_core::{CoreError, PredictorKind};
use rp_decisions::DecisionEngine;
use rp_runtime::{MetricsRegistry, MetricsSnapshot};
use rp_views::html::{self, Outcome};
use rp_views::PredictionView;
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state. The engine is read-only, so clones share it without locks.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DecisionEngine>,
    pub metrics: MetricsRegistry,
}

impl AppState {
    pub fn new(engine: DecisionEngine) -> Self {
        Self { engine: Arc::new(engine), metrics: MetricsRegistry::default() }
    }

    fn infer(
        &self,
        kind: PredictorKind,
        fields: &HashMap<String, String>,
    ) -> Result<PredictionView, CoreError> {
        let outcome = self.engine.infer_fields(kind, fields);
        self.metrics.record(kind, &outcome);
        outcome.map(|summary| PredictionView::from(&summary))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    /// Request body that could not be decoded as JSON.
    Body(JsonRejection),
    Core(CoreError),
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        AppError::Core(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Body(rejection)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, field) = match &self {
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found"), None),
            AppError::Body(rejection) => (rejection.status(), rejection.body_text(), None),
            AppError::Core(err @ CoreError::InvalidInput { field, .. }) => {
                (StatusCode::BAD_REQUEST, err.to_string(), Some(*field))
            }
            AppError::Core(err) => {
                tracing::error!("prediction error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None)
            }
        };

        let body = Json(json!({
            "error": message,
            "field": field,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api/v1/predict/:kind", post(predict_json))
        .route("/:kind", get(show_form).post(submit_form))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn index() -> Html<String> {
    Html(html::index_page())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy", version: env!("CARGO_PKG_VERSION") })
}

async fn metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

fn page_kind(raw: &str) -> AppResult<PredictorKind> {
    raw.parse().map_err(|_| AppError::NotFound(format!("page /{raw}")))
}

async fn show_form(Path(kind): Path<String>) -> AppResult<Html<String>> {
    let kind = page_kind(&kind)?;
    Ok(Html(html::form_page(kind, &HashMap::<String, String>::new(), Outcome::Empty)))
}

/// Invalid input re-renders the form with 400 and nothing predicted.
async fn submit_form(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> AppResult<(StatusCode, Html<String>)> {
    let kind = page_kind(&kind)?;
    let (status, page) = match state.infer(kind, &fields) {
        Ok(view) => (StatusCode::OK, html::form_page(kind, &fields, Outcome::Predicted(&view))),
        Err(err @ CoreError::InvalidInput { .. }) => {
            let message = err.to_string();
            (StatusCode::BAD_REQUEST, html::form_page(kind, &fields, Outcome::Rejected(&message)))
        }
        Err(err) => {
            let message = err.to_string();
            let page = html::form_page(kind, &fields, Outcome::Failed(&message));
            (StatusCode::INTERNAL_SERVER_ERROR, page)
        }
    };
    Ok((status, Html(page)))
}

async fn predict_json(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: Result<Json<HashMap<String, Value>>, JsonRejection>,
) -> AppResult<Json<PredictionView>> {
    let kind = page_kind(&kind)?;
    let Json(body) = body?;
    let fields: HashMap<String, String> = body
        .into_iter()
        .map(|(name, value)| {
            let raw = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (name, raw)
        })
        .collect();
    Ok(Json(state.infer(kind, &fields)?))
}
