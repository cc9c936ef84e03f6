use std::sync::Arc;

use admision::registry::domain::{CandidateRecord, Department, PersonIdentity, Venue};
use admision::registry::track::merit_admission_day;
use admision::reports::{reports_router, FilterCascade, ReportService};
use admision::verification::{verification_router, VerificationService};
use admision::InMemoryRegistry;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

fn registry() -> Arc<InMemoryRegistry> {
    let registry = InMemoryRegistry::default();
    registry.insert_department(Department {
        dep_id: 3,
        dep_nombre: "Potosi".to_string(),
    });
    registry.insert_venue(Venue {
        id_recinto: 7,
        recinto_nombre: "Liceo Bolivia".to_string(),
        dep_id: 3,
    });
    registry.insert_candidate(CandidateRecord {
        ci: "4440001".to_string(),
        dep_id: Some(3),
        id_recinto: Some(7),
        tipo_postulacion: Some("compulsa".to_string()),
        cargo: Some("SECRETARIA".to_string()),
        ..CandidateRecord::default()
    });
    registry.insert_person(PersonIdentity {
        ci: "4440001".to_string(),
        nombre: None,
        paterno: None,
        materno: None,
        nombre_completo: Some("Vargas Llanos Carmen".to_string()),
        fecha_actualizado: merit_admission_day().and_hms_opt(16, 45, 0),
    });
    Arc::new(registry)
}

#[tokio::test]
async fn merit_verification_round_trips_over_http() {
    let router = verification_router(Arc::new(VerificationService::new(registry())));

    let response = router
        .clone()
        .oneshot(
            Request::post("/api/v1/verificar-compulsas")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"vargas carmen"}"#))
                .expect("request builds"),
        )
        .await
        .expect("request completes");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("body is json");
    assert_eq!(body["ci"], "4440001");
    assert_eq!(body["tipo_postulacion"], "COMPULSA");

    let response = router
        .oneshot(
            Request::post("/api/v1/verificar-compulsas")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"ci":"0000000"}"#))
                .expect("request builds"),
        )
        .await
        .expect("request completes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reports_router_serves_the_cascade_and_the_pdf() {
    let store = registry();
    let router = reports_router(
        Arc::new(FilterCascade::new(store.clone())),
        Arc::new(ReportService::new(store)),
    );

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/reports/departamentos")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request completes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(
            Request::get("/api/v1/reports/pdf?variant=compulsas")
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
}
