//! Display-name composition shared by the verification lookups and the
//! document row renderer, so both surfaces agree on the same rendering.

use super::domain::PersonIdentity;

/// Placeholder when no identity record is linked or the name is empty.
pub const MISSING_NAME: &str = "-";

/// How a candidate's name is rendered for a given track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    /// `"PATERNO MATERNO, NOMBRE"` with empty parts dropped.
    Surname,
    /// The precomputed full name; falls back to space-joined parts.
    FullName,
}

pub fn display_name(person: Option<&PersonIdentity>, style: NameStyle) -> String {
    let person = match person {
        Some(person) => person,
        None => return MISSING_NAME.to_string(),
    };

    let composed = match style {
        NameStyle::Surname => surname_style(person),
        NameStyle::FullName => full_name_style(person),
    };

    if composed.is_empty() {
        MISSING_NAME.to_string()
    } else {
        composed.to_uppercase()
    }
}

fn surname_style(person: &PersonIdentity) -> String {
    let surnames = join_parts(&[person.paterno.as_deref(), person.materno.as_deref()]);
    let given = person.nombre.as_deref().map(str::trim).unwrap_or_default();

    match (surnames.is_empty(), given.is_empty()) {
        (true, true) => String::new(),
        (true, false) => given.to_string(),
        (false, true) => surnames,
        (false, false) => format!("{surnames}, {given}"),
    }
}

fn full_name_style(person: &PersonIdentity) -> String {
    if let Some(full) = person.nombre_completo.as_deref() {
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }
    }

    join_parts(&[
        person.paterno.as_deref(),
        person.materno.as_deref(),
        person.nombre.as_deref(),
    ])
}

fn join_parts(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .filter_map(|part| part.map(str::trim))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
