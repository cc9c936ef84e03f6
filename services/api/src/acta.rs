use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use admision::registry::import::load_registry;
use admision::reports::{ReportQuery, ReportService, ReportVariant};
use admision::AppError;
use clap::Args;

#[derive(Args, Debug)]
pub(crate) struct ActaArgs {
    /// Directory holding the registry seed exports (CSV)
    #[arg(long)]
    pub(crate) data_dir: PathBuf,
    /// Where to write the generated PDF
    #[arg(long)]
    pub(crate) out: PathBuf,
    /// Report variant: listado, becas, or compulsas
    #[arg(long, default_value = "listado", value_parser = parse_variant)]
    pub(crate) variant: ReportVariant,
    /// Optional letterhead JPEG painted behind every page
    #[arg(long)]
    pub(crate) letterhead: Option<PathBuf>,
    /// Restrict to a department id
    #[arg(long)]
    pub(crate) departamento: Option<u32>,
    /// Restrict to a venue id
    #[arg(long)]
    pub(crate) recinto: Option<u32>,
    /// Restrict to an exam date (raw value as exported)
    #[arg(long)]
    pub(crate) fecha: Option<String>,
    /// Restrict to a room
    #[arg(long)]
    pub(crate) aula: Option<String>,
    /// Restrict to a shift
    #[arg(long)]
    pub(crate) turno: Option<String>,
}

fn parse_variant(raw: &str) -> Result<ReportVariant, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "listado" => Ok(ReportVariant::Listado),
        "becas" => Ok(ReportVariant::Becas),
        "compulsas" => Ok(ReportVariant::Compulsas),
        other => Err(format!(
            "unknown variant '{other}', expected listado, becas, or compulsas"
        )),
    }
}

/// Generate one acta PDF offline, without standing up the HTTP service.
pub(crate) fn run_acta(args: ActaArgs) -> Result<(), AppError> {
    let registry = Arc::new(load_registry(&args.data_dir)?);
    let service = ReportService::new(registry).with_letterhead(args.letterhead.clone());

    let query = ReportQuery {
        departamento: args.departamento,
        recinto: args.recinto,
        ci: None,
        fecha: args.fecha.clone(),
        aula: args.aula.clone(),
        turno: args.turno.clone(),
        track: None,
    };

    let bytes = service.document(&query, args.variant)?;
    fs::write(&args.out, &bytes)?;

    println!(
        "wrote {} ({} bytes, variant {:?})",
        args.out.display(),
        bytes.len(),
        args.variant
    );
    Ok(())
}
