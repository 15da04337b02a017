//! Static catalog of the placeholders a template author can use.
//!
//! The catalog is what the editor offers and what template validation checks
//! against. Every non-custom entry has a typed accessor in the resolver.

use super::engine::extract_placeholders;
use common::model::variable::{PlaceholderReport, TemplateVariable, VariableSource, VariableType};

struct Entry {
    name: &'static str,
    label: &'static str,
    var_type: VariableType,
    category: &'static str,
    required: bool,
}

const fn entry(
    name: &'static str,
    label: &'static str,
    var_type: VariableType,
    category: &'static str,
    required: bool,
) -> Entry {
    Entry {
        name,
        label,
        var_type,
        category,
        required,
    }
}

use VariableType::{Boolean, Currency, Date, Number, Text};

const CLIENT: &[Entry] = &[
    entry("client.name", "Nombre del cliente", Text, "Cliente", true),
    entry("client.document_number", "Documento de identidad", Text, "Cliente", true),
    entry("client.email", "Correo del cliente", Text, "Contacto", false),
    entry("client.phone", "Teléfono del cliente", Text, "Contacto", false),
    entry("client.address", "Dirección del cliente", Text, "Contacto", false),
    entry("client.city", "Ciudad", Text, "Contacto", false),
    entry("client.client_type", "Tipo de cliente", Text, "Cliente", false),
    entry("client.company_name", "Razón social", Text, "Cliente", false),
    entry("client.created_at", "Cliente desde", Date, "Cliente", false),
];

const CASE: &[Entry] = &[
    entry("case.number", "Número de expediente", Text, "Caso", true),
    entry("case.title", "Título del caso", Text, "Caso", true),
    entry("case.description", "Descripción", Text, "Caso", false),
    entry("case.status", "Estado", Text, "Caso", false),
    entry("case.matter", "Materia", Text, "Caso", false),
    entry("case.court", "Tribunal", Text, "Tribunal", false),
    entry("case.jurisdiction", "Jurisdicción", Text, "Tribunal", false),
    entry("case.case_type", "Tipo de procedimiento", Text, "Tribunal", false),
    entry("case.opened_at", "Fecha de inicio", Date, "Fechas", false),
    entry("case.closed_at", "Fecha de término", Date, "Fechas", false),
    entry("case.amount", "Cuantía", Currency, "Montos", false),
    entry("case.fees", "Honorarios", Currency, "Montos", false),
    entry("case.active", "Caso vigente", Boolean, "Caso", false),
    entry("case.partes_count", "Número de partes", Number, "Partes", false),
    entry("case.team", "Equipo asignado", Text, "Equipo", false),
    entry("case.lead.name", "Abogado responsable", Text, "Equipo", false),
    entry("case.lead.email", "Correo del responsable", Text, "Equipo", false),
    entry("case.client.name", "Cliente del caso", Text, "Cliente", false),
    entry("case.client.document_number", "Documento del cliente del caso", Text, "Cliente", false),
];

const USER: &[Entry] = &[
    entry("user.name", "Nombre del usuario", Text, "Usuario", true),
    entry("user.email", "Correo del usuario", Text, "Usuario", false),
    entry("user.phone", "Teléfono del usuario", Text, "Usuario", false),
    entry("user.role", "Rol", Text, "Usuario", false),
    entry("user.position", "Cargo", Text, "Usuario", false),
    entry("user.bar_number", "Matrícula profesional", Text, "Usuario", false),
];

const PARTE: &[Entry] = &[
    entry("parte.activa.name", "Nombre parte activa", Text, "Parte activa", false),
    entry("parte.activa.document_number", "Documento parte activa", Text, "Parte activa", false),
    entry("parte.activa.address", "Domicilio parte activa", Text, "Parte activa", false),
    entry("parte.activa.email", "Correo parte activa", Text, "Parte activa", false),
    entry("parte.activa.lawyer", "Abogado parte activa", Text, "Parte activa", false),
    entry("parte.demandada.name", "Nombre parte demandada", Text, "Parte demandada", false),
    entry("parte.demandada.document_number", "Documento parte demandada", Text, "Parte demandada", false),
    entry("parte.demandada.address", "Domicilio parte demandada", Text, "Parte demandada", false),
    entry("parte.demandada.email", "Correo parte demandada", Text, "Parte demandada", false),
    entry("parte.demandada.lawyer", "Abogado parte demandada", Text, "Parte demandada", false),
];

const CUSTOM: &[Entry] = &[
    entry("custom.generated_at", "Fecha de generación", Date, "Documento", false),
    entry("custom.generated_by", "Generado por", Text, "Documento", false),
    entry("custom.template_id", "Identificador de plantilla", Text, "Documento", false),
    entry("custom.template_version", "Versión de plantilla", Number, "Documento", false),
];

fn entries(source: VariableSource) -> &'static [Entry] {
    match source {
        VariableSource::Client => CLIENT,
        VariableSource::Case => CASE,
        VariableSource::User => USER,
        VariableSource::Parte => PARTE,
        VariableSource::Custom => CUSTOM,
    }
}

fn to_variable(source: VariableSource, entry: &Entry) -> TemplateVariable {
    TemplateVariable {
        name: entry.name.to_string(),
        label: entry.label.to_string(),
        var_type: entry.var_type,
        source,
        category: Some(entry.category.to_string()),
        required: entry.required,
    }
}

/// Lists catalog variables, optionally restricted to one source.
/// Order is fixed: sources in declaration order, then entries as declared.
pub fn list_variables(source: Option<VariableSource>) -> Vec<TemplateVariable> {
    let sources: Vec<VariableSource> = match source {
        Some(source) => vec![source],
        None => VariableSource::ALL.to_vec(),
    };
    sources
        .into_iter()
        .flat_map(|source| entries(source).iter().map(move |e| to_variable(source, e)))
        .collect()
}

pub fn find_variable(name: &str) -> Option<TemplateVariable> {
    let source: VariableSource = name.split('.').next()?.parse().ok()?;
    entries(source)
        .iter()
        .find(|e| e.name == name)
        .map(|e| to_variable(source, e))
}

/// Splits the placeholders of `content` into catalog matches and unknown
/// paths. Any `custom.*` path is accepted since custom data is free-form.
pub fn validate_placeholders(content: &str) -> PlaceholderReport {
    let mut report = PlaceholderReport::default();
    for name in extract_placeholders(content) {
        match find_variable(&name) {
            Some(variable) => report.known.push(variable),
            None if name.starts_with("custom.") => report.known.push(TemplateVariable {
                label: name.trim_start_matches("custom.").to_string(),
                name,
                var_type: VariableType::Text,
                source: VariableSource::Custom,
                category: None,
                required: false,
            }),
            None => report.unknown.push(name),
        }
    }
    report
}
