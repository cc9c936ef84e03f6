//! CSV seed loading. The registry is populated from the registration
//! process's periodic exports: one file per upstream table.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use super::domain::{parse_exam_datetime, CandidateRecord, Department, PersonIdentity, Venue};
use super::memory::InMemoryRegistry;

pub const DEPARTMENTS_FILE: &str = "departamentos.csv";
pub const VENUES_FILE: &str = "recintos.csv";
pub const CANDIDATES_FILE: &str = "postulaciones.csv";
pub const PERSONS_FILE: &str = "datos_personales.csv";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

/// Load the four seed exports from a directory into a fresh registry.
pub fn load_registry(dir: &Path) -> Result<InMemoryRegistry, ImportError> {
    let registry = InMemoryRegistry::default();

    for department in parse_rows::<DepartmentRow, _>(open(dir, DEPARTMENTS_FILE)?)
        .map_err(|source| csv_error(dir, DEPARTMENTS_FILE, source))?
    {
        registry.insert_department(department.into());
    }

    for venue in parse_rows::<VenueRow, _>(open(dir, VENUES_FILE)?)
        .map_err(|source| csv_error(dir, VENUES_FILE, source))?
    {
        registry.insert_venue(venue.into());
    }

    for person in parse_rows::<PersonRow, _>(open(dir, PERSONS_FILE)?)
        .map_err(|source| csv_error(dir, PERSONS_FILE, source))?
    {
        registry.insert_person(person.into());
    }

    for candidate in parse_rows::<CandidateRow, _>(open(dir, CANDIDATES_FILE)?)
        .map_err(|source| csv_error(dir, CANDIDATES_FILE, source))?
    {
        registry.insert_candidate(candidate.into());
    }

    info!(candidates = registry.len(), "registry seed loaded");
    Ok(registry)
}

fn open(dir: &Path, file: &str) -> Result<File, ImportError> {
    let path = dir.join(file);
    File::open(&path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn csv_error(dir: &Path, file: &str, source: csv::Error) -> ImportError {
    ImportError::Csv {
        path: dir.join(file).display().to_string(),
        source,
    }
}

fn parse_rows<T, R>(reader: R) -> Result<Vec<T>, csv::Error>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader.deserialize().collect()
}

#[derive(Debug, Deserialize)]
struct DepartmentRow {
    dep_id: u32,
    dep_nombre: String,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Department {
            dep_id: row.dep_id,
            dep_nombre: row.dep_nombre,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VenueRow {
    id_recinto: u32,
    recinto_nombre: String,
    dep_id: u32,
}

impl From<VenueRow> for Venue {
    fn from(row: VenueRow) -> Self {
        Venue {
            id_recinto: row.id_recinto,
            recinto_nombre: row.recinto_nombre,
            dep_id: row.dep_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PersonRow {
    ci: String,
    #[serde(default)]
    nombre: Option<String>,
    #[serde(default)]
    paterno: Option<String>,
    #[serde(default)]
    materno: Option<String>,
    #[serde(default)]
    nombre_completo: Option<String>,
    #[serde(default)]
    fecha_actualizado: Option<String>,
}

impl From<PersonRow> for PersonIdentity {
    fn from(row: PersonRow) -> Self {
        let fecha_actualizado = row
            .fecha_actualizado
            .as_deref()
            .and_then(parse_exam_datetime);
        PersonIdentity {
            ci: row.ci,
            nombre: row.nombre,
            paterno: row.paterno,
            materno: row.materno,
            nombre_completo: row.nombre_completo,
            fecha_actualizado,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CandidateRow {
    ci: String,
    #[serde(default)]
    dep_id: Option<u32>,
    #[serde(default)]
    id_recinto: Option<u32>,
    #[serde(default)]
    esfm: Option<String>,
    #[serde(default)]
    municipio: Option<String>,
    #[serde(default)]
    direccion: Option<String>,
    #[serde(default)]
    fecha: Option<String>,
    #[serde(default)]
    aula: Option<String>,
    #[serde(default)]
    turno: Option<String>,
    #[serde(default)]
    equipo: Option<String>,
    #[serde(default)]
    tipo_postulacion: Option<String>,
    #[serde(default)]
    discapacidad: Option<String>,
    #[serde(default)]
    cargo: Option<String>,
}

impl From<CandidateRow> for CandidateRecord {
    fn from(row: CandidateRow) -> Self {
        CandidateRecord {
            ci: row.ci,
            dep_id: row.dep_id,
            id_recinto: row.id_recinto,
            esfm: row.esfm,
            municipio: row.municipio,
            direccion: row.direccion,
            fecha: row.fecha,
            aula: row.aula,
            turno: row.turno,
            equipo: row.equipo,
            tipo_postulacion: row.tipo_postulacion,
            discapacidad: row.discapacidad,
            cargo: row.cargo,
        }
    }
}
