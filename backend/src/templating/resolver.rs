//! Maps a dotted placeholder path onto a value of the template context.
//!
//! Each source has an explicit accessor; there is no reflective field
//! lookup. Anything the accessors do not know resolves to nothing and is
//! rendered as an empty string.

use super::format::FormatOptions;
use common::model::context::{
    CaseView, ClientView, ContextMetadata, ParteRole, ParteView, TemplateContext, UserView,
};
use chrono::NaiveDate;
use log::debug;

/// A typed value before formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Text(String),
    Number(f64),
    Currency(f64),
    Date(NaiveDate),
    Boolean(bool),
}

impl Resolved {
    pub fn render(&self, options: &FormatOptions) -> String {
        match self {
            Resolved::Text(text) => text.clone(),
            Resolved::Number(n) => options.format_number(*n),
            Resolved::Currency(n) => options.format_currency(*n),
            Resolved::Date(date) => options.format_date(*date),
            Resolved::Boolean(b) => options.format_bool(*b),
        }
    }
}

/// Resolves `path` against `context` and formats it. Unknown sources,
/// unknown fields and missing entities all yield `""`.
pub fn resolve(path: &str, context: &TemplateContext, options: &FormatOptions) -> String {
    match lookup(path, context) {
        Some(value) => value.render(options),
        None => {
            debug!("Variable '{}' has no value in this context", path);
            String::new()
        }
    }
}

/// Typed lookup without formatting.
pub fn lookup(path: &str, context: &TemplateContext) -> Option<Resolved> {
    let segments: Vec<&str> = path.split('.').collect();
    let (source, fields) = segments.split_first()?;
    match *source {
        "client" => client_field(context.effective_client()?, fields),
        "case" => case_field(context.case.as_ref()?, fields),
        "user" => user_field(context.user.as_ref()?, fields),
        "parte" => parte_field(context.partes(), fields),
        "custom" => custom_field(context, &fields.join(".")),
        _ => None,
    }
}

fn text(value: &Option<String>) -> Option<Resolved> {
    value.as_ref().map(|s| Resolved::Text(s.clone()))
}

fn client_field(client: &ClientView, fields: &[&str]) -> Option<Resolved> {
    match fields {
        ["name"] => text(&client.name),
        ["document_number"] => text(&client.document_number),
        ["email"] => text(&client.email),
        ["phone"] => text(&client.phone),
        ["address"] => text(&client.address),
        ["city"] => text(&client.city),
        ["client_type"] => text(&client.client_type),
        ["company_name"] => text(&client.company_name),
        ["created_at"] => client.created_at.map(Resolved::Date),
        _ => None,
    }
}

fn user_field(user: &UserView, fields: &[&str]) -> Option<Resolved> {
    match fields {
        ["name"] => text(&user.name),
        ["email"] => text(&user.email),
        ["phone"] => text(&user.phone),
        ["role"] => text(&user.role),
        ["position"] => text(&user.position),
        ["bar_number"] => text(&user.bar_number),
        _ => None,
    }
}

fn case_field(case: &CaseView, fields: &[&str]) -> Option<Resolved> {
    match fields {
        ["number"] => text(&case.number),
        ["title"] => text(&case.title),
        ["description"] => text(&case.description),
        ["status"] => text(&case.status),
        ["matter"] => text(&case.matter),
        ["court"] => text(&case.court),
        ["jurisdiction"] => text(&case.jurisdiction),
        ["case_type"] => text(&case.case_type),
        ["opened_at"] => case.opened_at.map(Resolved::Date),
        ["closed_at"] => case.closed_at.map(Resolved::Date),
        ["amount"] => case.amount.map(Resolved::Currency),
        ["fees"] => case.fees.map(Resolved::Currency),
        ["active"] => case.active.map(Resolved::Boolean),
        ["partes_count"] => Some(Resolved::Number(case.partes.len() as f64)),
        ["team"] => {
            let names: Vec<&str> = case.team.iter().filter_map(|m| m.name.as_deref()).collect();
            (!names.is_empty()).then(|| Resolved::Text(names.join(", ")))
        }
        ["lead", rest @ ..] => user_field(case.team.first()?, rest),
        ["client", rest @ ..] => client_field(case.client.as_ref()?, rest),
        _ => None,
    }
}

/// `parte.<role>.<field>` takes the first parte with that role;
/// `parte.<field>` takes the first parte of any role.
fn parte_field(partes: &[ParteView], fields: &[&str]) -> Option<Resolved> {
    let (parte, rest) = match fields.split_first() {
        Some((first, rest)) => match ParteRole::parse(first) {
            Some(role) => (partes.iter().find(|p| p.role == role)?, rest),
            None => (partes.first()?, fields),
        },
        None => return None,
    };
    match rest {
        ["name"] => text(&parte.name),
        ["document_number"] => text(&parte.document_number),
        ["address"] => text(&parte.address),
        ["email"] => text(&parte.email),
        ["phone"] => text(&parte.phone),
        ["lawyer"] => text(&parte.lawyer),
        ["role"] => Some(Resolved::Text(parte.role.as_str().to_string())),
        _ => None,
    }
}

fn custom_field(context: &TemplateContext, key: &str) -> Option<Resolved> {
    match context.custom.get(key) {
        Some(value) => json_value(value),
        None => metadata_field(&context.metadata, key),
    }
}

fn json_value(value: &serde_json::Value) -> Option<Resolved> {
    use serde_json::Value;
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(Resolved::Boolean(*b)),
        Value::Number(n) => n.as_f64().map(Resolved::Number),
        Value::String(s) => Some(Resolved::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => Some(Resolved::Text(value.to_string())),
    }
}

fn metadata_field(metadata: &ContextMetadata, key: &str) -> Option<Resolved> {
    match key {
        "generated_at" => metadata.generated_at.map(|at| Resolved::Date(at.date_naive())),
        "generated_by" => text(&metadata.generated_by),
        "template_id" => text(&metadata.template_id),
        "template_version" => metadata
            .template_version
            .map(|v| Resolved::Number(f64::from(v))),
        _ => None,
    }
}
