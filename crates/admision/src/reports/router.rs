use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::registry::store::{CandidateStore, StoreError};
use crate::registry::track::Track;

use super::filters::FilterCascade;
use super::query::ReportQuery;
use super::service::{ReportError, ReportService};
use super::variant::ReportVariant;

const PDF_DISPOSITION: &str = "attachment; filename=reporte-postulantes.pdf";

/// Shared state for the reporting endpoints.
pub struct ReportsState<S> {
    pub cascade: Arc<FilterCascade<S>>,
    pub reports: Arc<ReportService<S>>,
}

impl<S> Clone for ReportsState<S> {
    fn clone(&self) -> Self {
        Self {
            cascade: self.cascade.clone(),
            reports: self.reports.clone(),
        }
    }
}

/// Router builder exposing the filter cascade, listings, aggregates, and the
/// PDF download.
pub fn reports_router<S>(cascade: Arc<FilterCascade<S>>, reports: Arc<ReportService<S>>) -> Router
where
    S: CandidateStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/reports/departamentos",
            get(departamentos_handler::<S>),
        )
        .route("/api/v1/reports/recintos", get(recintos_handler::<S>))
        .route("/api/v1/reports/fechas", get(fechas_handler::<S>))
        .route("/api/v1/reports/aulas", get(aulas_handler::<S>))
        .route("/api/v1/reports/turnos", get(turnos_handler::<S>))
        .route("/api/v1/reports/data", get(data_handler::<S>))
        .route("/api/v1/reports/stats", get(stats_handler::<S>))
        .route("/api/v1/reports/pdf", get(pdf_handler::<S>))
        .with_state(ReportsState { cascade, reports })
}

#[derive(Debug, Deserialize)]
pub(crate) struct DepartmentParams {
    pub(crate) dep_id: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VenueParams {
    pub(crate) recinto_id: u32,
    #[serde(default)]
    pub(crate) track: Option<Track>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatsParams {
    #[serde(default)]
    pub(crate) track: Option<Track>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PdfParams {
    #[serde(default)]
    pub(crate) variant: ReportVariant,
    #[serde(default)]
    pub(crate) departamento: Option<u32>,
    #[serde(default)]
    pub(crate) recinto: Option<u32>,
    #[serde(default)]
    pub(crate) ci: Option<String>,
    #[serde(default)]
    pub(crate) fecha: Option<String>,
    #[serde(default)]
    pub(crate) aula: Option<String>,
    #[serde(default)]
    pub(crate) turno: Option<String>,
    #[serde(default)]
    pub(crate) track: Option<Track>,
}

impl PdfParams {
    fn into_query(self) -> (ReportQuery, ReportVariant) {
        let variant = self.variant;
        let query = ReportQuery {
            departamento: self.departamento,
            recinto: self.recinto,
            ci: self.ci,
            fecha: self.fecha,
            aula: self.aula,
            turno: self.turno,
            track: self.track,
        };
        (query, variant)
    }
}

pub(crate) async fn departamentos_handler<S>(State(state): State<ReportsState<S>>) -> Response
where
    S: CandidateStore + 'static,
{
    Json(state.cascade.departments()).into_response()
}

pub(crate) async fn recintos_handler<S>(
    State(state): State<ReportsState<S>>,
    Query(params): Query<DepartmentParams>,
) -> Response
where
    S: CandidateStore + 'static,
{
    Json(state.cascade.venues_of_department(params.dep_id)).into_response()
}

pub(crate) async fn fechas_handler<S>(
    State(state): State<ReportsState<S>>,
    Query(params): Query<VenueParams>,
) -> Response
where
    S: CandidateStore + 'static,
{
    match state.cascade.dates_of_venue(params.recinto_id, params.track) {
        Ok(dates) => Json(dates).into_response(),
        Err(error) => store_unavailable(error),
    }
}

pub(crate) async fn aulas_handler<S>(
    State(state): State<ReportsState<S>>,
    Query(params): Query<VenueParams>,
) -> Response
where
    S: CandidateStore + 'static,
{
    match state.cascade.rooms_of_venue(params.recinto_id, params.track) {
        Ok(rooms) => Json(rooms).into_response(),
        Err(error) => store_unavailable(error),
    }
}

pub(crate) async fn turnos_handler<S>(
    State(state): State<ReportsState<S>>,
    Query(params): Query<VenueParams>,
) -> Response
where
    S: CandidateStore + 'static,
{
    match state.cascade.shifts_of_venue(params.recinto_id, params.track) {
        Ok(shifts) => Json(shifts).into_response(),
        Err(error) => store_unavailable(error),
    }
}

pub(crate) async fn data_handler<S>(
    State(state): State<ReportsState<S>>,
    Query(query): Query<ReportQuery>,
) -> Response
where
    S: CandidateStore + 'static,
{
    match state.reports.listing(&query) {
        Ok(rows) => Json(rows).into_response(),
        Err(ReportError::Store(error)) => store_unavailable(error),
    }
}

pub(crate) async fn stats_handler<S>(
    State(state): State<ReportsState<S>>,
    Query(params): Query<StatsParams>,
) -> Response
where
    S: CandidateStore + 'static,
{
    match state.reports.stats(params.track) {
        Ok(stats) => Json(stats).into_response(),
        Err(ReportError::Store(error)) => store_unavailable(error),
    }
}

pub(crate) async fn pdf_handler<S>(
    State(state): State<ReportsState<S>>,
    Query(params): Query<PdfParams>,
) -> Response
where
    S: CandidateStore + 'static,
{
    let (query, variant) = params.into_query();
    match state.reports.document(&query, variant) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime::APPLICATION_PDF.as_ref()),
                (header::CONTENT_DISPOSITION, PDF_DISPOSITION),
            ],
            bytes,
        )
            .into_response(),
        Err(ReportError::Store(error)) => store_unavailable(error),
    }
}

fn store_unavailable(error: StoreError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
}
