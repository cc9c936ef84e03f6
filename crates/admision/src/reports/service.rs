use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::registry::domain::JoinedCandidate;
use crate::registry::store::{CandidateStore, StoreError};
use crate::registry::track::Track;

use super::filters::format_display_date;
use super::layout::{layout, FilterContext};
use super::pdf::PdfSurface;
use super::query::{fetch_records, ReportQuery};
use super::render::render;
use super::stats::{stats, TrackStats};
use super::surface::DrawingSurface;
use super::variant::ReportVariant;

/// Report generation: listings, aggregates, and the printable documents.
/// One generation reads one store snapshot and is deterministic for a fixed
/// filter set; a store failure aborts the whole generation.
pub struct ReportService<S> {
    store: Arc<S>,
    letterhead: Option<PathBuf>,
}

/// Error raised by report generation. Layout and rendering never fail on
/// their own; malformed values degrade to placeholders instead.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl<S> ReportService<S>
where
    S: CandidateStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            letterhead: None,
        }
    }

    /// Configure the letterhead asset painted behind every page. A missing
    /// file is logged and skipped, never fatal.
    pub fn with_letterhead(mut self, path: Option<PathBuf>) -> Self {
        self.letterhead = path;
        self
    }

    pub fn listing(&self, query: &ReportQuery) -> Result<Vec<JoinedCandidate>, ReportError> {
        Ok(fetch_records(self.store.as_ref(), query)?)
    }

    pub fn stats(&self, track: Option<Track>) -> Result<TrackStats, ReportError> {
        Ok(stats(self.store.as_ref(), track)?)
    }

    /// Generate the printable document for a variant as PDF bytes.
    pub fn document(
        &self,
        query: &ReportQuery,
        variant: ReportVariant,
    ) -> Result<Vec<u8>, ReportError> {
        let mut surface = PdfSurface::new();
        self.render_document(query, variant, &mut surface)?;
        Ok(surface.finish())
    }

    /// Lay out and draw a document against any surface. Exposed separately
    /// so callers can target a different backend or inspect the draw stream.
    pub fn render_document<D>(
        &self,
        query: &ReportQuery,
        variant: ReportVariant,
        surface: &mut D,
    ) -> Result<(), ReportError>
    where
        D: DrawingSurface,
    {
        let mut query = query.clone();
        if let Some(track) = variant.track() {
            query.track = Some(track);
        }

        let records = fetch_records(self.store.as_ref(), &query)?;
        let context = self.filter_context(&query, variant, &records)?;
        let pages = layout(&records, variant, context);
        let background = self.load_letterhead();
        render(&pages, variant, background.as_deref(), surface);
        Ok(())
    }

    /// Resolve the filter ids into the display labels echoed on the first
    /// page; unfiltered dimensions keep the placeholder literals.
    fn filter_context(
        &self,
        query: &ReportQuery,
        variant: ReportVariant,
        records: &[JoinedCandidate],
    ) -> Result<FilterContext, ReportError> {
        let mut context = FilterContext::default();

        if let Some(dep_id) = query.departamento {
            context.departamento = self
                .store
                .department(dep_id)?
                .map(|d| d.dep_nombre)
                .unwrap_or_else(|| dep_id.to_string());
        }

        if let Some(id_recinto) = query.recinto {
            context.recinto = self
                .store
                .venue(id_recinto)?
                .map(|v| v.recinto_nombre)
                .unwrap_or_else(|| id_recinto.to_string());
        }

        if let Some(fecha) = query.fecha.as_deref() {
            context.fecha = format_display_date(fecha);
        }

        match query.aula.as_deref() {
            Some(aula) => context.aula = aula.to_string(),
            // The merit control list is printed per room; when no room
            // filter was given, the first record's room backs the display.
            None if variant == ReportVariant::Compulsas => {
                if let Some(aula) = records.first().and_then(|r| r.record.aula.clone()) {
                    context.aula = aula;
                }
            }
            None => {}
        }

        if let Some(turno) = query.turno.as_deref() {
            context.turno = turno.to_string();
        }

        Ok(context)
    }

    fn load_letterhead(&self) -> Option<Vec<u8>> {
        let path = self.letterhead.as_ref()?;
        match fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    %error,
                    "letterhead asset missing; generating without it"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::domain::{CandidateRecord, PersonIdentity, Venue};
    use crate::registry::memory::InMemoryRegistry;
    use crate::registry::track::merit_admission_day;
    use crate::reports::surface::RecordingSurface;

    fn merit_registry() -> InMemoryRegistry {
        let registry = InMemoryRegistry::default();
        registry.insert_venue(Venue {
            id_recinto: 10,
            recinto_nombre: "Recinto Norte".to_string(),
            dep_id: 1,
        });
        for (ci, aula, full) in [("100", "B-201", "Apaza Rosa"), ("200", "C-305", "Mamani Juan")] {
            registry.insert_candidate(CandidateRecord {
                ci: ci.to_string(),
                id_recinto: Some(10),
                aula: Some(aula.to_string()),
                tipo_postulacion: Some("compulsa".to_string()),
                cargo: Some("DOCENTE".to_string()),
                ..CandidateRecord::default()
            });
            registry.insert_person(PersonIdentity {
                ci: ci.to_string(),
                nombre: None,
                paterno: None,
                materno: None,
                nombre_completo: Some(full.to_string()),
                fecha_actualizado: merit_admission_day().and_hms_opt(10, 0, 0),
            });
        }
        registry
    }

    #[test]
    fn document_bytes_are_a_pdf_and_deterministic() {
        let service = ReportService::new(Arc::new(merit_registry()));
        let query = ReportQuery::default();

        let first = service
            .document(&query, ReportVariant::Compulsas)
            .expect("document generates");
        let second = service
            .document(&query, ReportVariant::Compulsas)
            .expect("document generates");

        assert!(first.starts_with(b"%PDF-1.4"));
        assert_eq!(first, second);
    }

    #[test]
    fn merit_room_display_falls_back_to_the_first_record() {
        let service = ReportService::new(Arc::new(merit_registry()));
        let mut surface = RecordingSurface::default();
        service
            .render_document(&ReportQuery::default(), ReportVariant::Compulsas, &mut surface)
            .expect("document renders");

        // Records order by full name: Apaza Rosa first, so her room wins.
        assert!(surface.texts().contains(&"B-201"));
    }

    #[test]
    fn missing_letterhead_degrades_to_no_background() {
        let service = ReportService::new(Arc::new(merit_registry()))
            .with_letterhead(Some(PathBuf::from("/nonexistent/membrete.jpg")));
        let mut surface = RecordingSurface::default();
        service
            .render_document(&ReportQuery::default(), ReportVariant::Listado, &mut surface)
            .expect("document renders");

        assert!(surface
            .ops
            .iter()
            .all(|op| !matches!(op, crate::reports::surface::SurfaceOp::BackgroundImage { .. })));
    }
}
