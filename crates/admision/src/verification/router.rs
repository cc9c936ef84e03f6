use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::registry::store::CandidateStore;

use super::service::{VerificationError, VerificationService};

/// Router builder exposing the three public verification endpoints.
pub fn verification_router<S>(service: Arc<VerificationService<S>>) -> Router
where
    S: CandidateStore + 'static,
{
    Router::new()
        .route("/api/v1/verificar", post(verify_handler::<S>))
        .route("/api/v1/verificar-becas", post(verify_becas_handler::<S>))
        .route(
            "/api/v1/verificar-compulsas",
            post(verify_compulsas_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyRequest {
    pub(crate) ci: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MeritVerifyRequest {
    #[serde(default)]
    pub(crate) ci: Option<String>,
    #[serde(default)]
    pub(crate) name: Option<String>,
}

pub(crate) async fn verify_handler<S>(
    State(service): State<Arc<VerificationService<S>>>,
    Json(request): Json<VerifyRequest>,
) -> Response
where
    S: CandidateStore + 'static,
{
    respond(service.verify_standard(&request.ci))
}

pub(crate) async fn verify_becas_handler<S>(
    State(service): State<Arc<VerificationService<S>>>,
    Json(request): Json<VerifyRequest>,
) -> Response
where
    S: CandidateStore + 'static,
{
    respond(service.verify_scholarship(&request.ci))
}

pub(crate) async fn verify_compulsas_handler<S>(
    State(service): State<Arc<VerificationService<S>>>,
    Json(request): Json<MeritVerifyRequest>,
) -> Response
where
    S: CandidateStore + 'static,
{
    respond(service.verify_merit(request.ci.as_deref(), request.name.as_deref()))
}

fn respond(
    result: Result<super::views::VerificationView, VerificationError>,
) -> Response {
    match result {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(VerificationError::NotFound(message)) => {
            let payload = json!({ "error": message });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(VerificationError::Store(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
        }
    }
}
