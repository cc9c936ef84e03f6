//! Operational reporting: the filter cascade, the record query engine, the
//! aggregate counters, and the paginated document pipeline (layout → render
//! → drawing surface).

pub mod filters;
pub mod layout;
pub mod pdf;
pub mod query;
pub mod render;
pub mod router;
pub mod service;
pub mod stats;
pub mod surface;
pub mod variant;

pub use filters::{DateOption, FilterCascade};
pub use layout::{layout, FilterContext, Page};
pub use query::{fetch_records, ReportQuery};
pub use router::reports_router;
pub use service::{ReportError, ReportService};
pub use stats::{stats, CountEntry, TrackStats};
pub use surface::{DrawingSurface, RecordingSurface};
pub use variant::ReportVariant;
