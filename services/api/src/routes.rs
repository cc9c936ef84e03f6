use crate::infra::AppState;
use admision::registry::CandidateStore;
use admision::reports::{reports_router, FilterCascade, ReportService};
use admision::verification::{verification_router, VerificationService};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_service_routes<S>(
    verification: Arc<VerificationService<S>>,
    cascade: Arc<FilterCascade<S>>,
    reports: Arc<ReportService<S>>,
) -> axum::Router
where
    S: CandidateStore + 'static,
{
    verification_router(verification)
        .merge(reports_router(cascade, reports))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use admision::registry::domain::{CandidateRecord, Department, PersonIdentity, Venue};
    use admision::InMemoryRegistry;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn seeded_registry() -> InMemoryRegistry {
        let registry = InMemoryRegistry::default();
        registry.insert_department(Department {
            dep_id: 2,
            dep_nombre: "La Paz".to_string(),
        });
        registry.insert_venue(Venue {
            id_recinto: 10,
            recinto_nombre: "Recinto Norte".to_string(),
            dep_id: 2,
        });
        registry.insert_candidate(CandidateRecord {
            ci: "5551234".to_string(),
            dep_id: Some(2),
            id_recinto: Some(10),
            esfm: Some("ESFM Simon Bolivar".to_string()),
            fecha: Some("2026-02-02T08:00:00".to_string()),
            aula: Some("A-1".to_string()),
            turno: Some("MANANA".to_string()),
            ..CandidateRecord::default()
        });
        registry.insert_person(PersonIdentity {
            ci: "5551234".to_string(),
            nombre: Some("Ana".to_string()),
            paterno: Some("Quispe".to_string()),
            materno: None,
            nombre_completo: Some("Quispe Ana".to_string()),
            fecha_actualizado: None,
        });
        registry
    }

    fn app() -> axum::Router {
        let registry = Arc::new(seeded_registry());
        let verification = Arc::new(VerificationService::new(registry.clone()));
        let cascade = Arc::new(FilterCascade::new(registry.clone()));
        let reports = Arc::new(ReportService::new(registry));
        with_service_routes(verification, cascade, reports)
    }

    #[tokio::test]
    async fn verify_endpoint_returns_cleared_candidate() {
        let response = app()
            .oneshot(
                Request::post("/api/v1/verificar")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"ci":"5551234"}"#))
                    .expect("request builds"),
            )
            .await
            .expect("request completes");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("body is json");
        assert_eq!(body["estado"], "HABILITADO");
        assert_eq!(body["nombre_completo"], "QUISPE, ANA");
        assert_eq!(body["departamento"], "La Paz");
    }

    #[tokio::test]
    async fn verify_endpoint_misses_with_upstream_message() {
        let response = app()
            .oneshot(
                Request::post("/api/v1/verificar")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"ci":"0000000"}"#))
                    .expect("request builds"),
            )
            .await
            .expect("request completes");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("body is json");
        assert_eq!(body["error"], "CI no encontrado o no habilitado");
    }

    #[tokio::test]
    async fn cascade_endpoints_drill_down() {
        let response = app()
            .oneshot(
                Request::get("/api/v1/reports/recintos?dep_id=2")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("request completes");
        assert_eq!(response.status(), StatusCode::OK);

        let response = app()
            .oneshot(
                Request::get("/api/v1/reports/fechas?recinto_id=10")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("request completes");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("body is json");
        assert_eq!(body[0]["display"], "02/02/2026");
    }

    #[tokio::test]
    async fn pdf_endpoint_returns_a_pdf_attachment() {
        let response = app()
            .oneshot(
                Request::get("/api/v1/reports/pdf?recinto=10&variant=listado")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("request completes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/pdf")
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        assert!(bytes.starts_with(b"%PDF-1.4"));
    }

    #[tokio::test]
    async fn stats_endpoint_reports_totals() {
        let response = app()
            .oneshot(
                Request::get("/api/v1/reports/stats")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("request completes");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("body is json");
        assert_eq!(body["total"], 1);
        assert_eq!(body["by_department"][0]["label"], "La Paz");
    }
}
