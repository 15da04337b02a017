//! Per-request data a template is rendered against.
//!
//! The views below are read-only projections of the case-management entities.
//! They are built by the caller for each generation request; every field is
//! optional so a partially loaded case still renders.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientView {
    pub id: Option<String>,
    pub name: Option<String>,
    /// National id or tax number (RUT, DNI, NIT...).
    pub document_number: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    /// `persona natural`, `empresa`, ...
    pub client_type: Option<String>,
    pub company_name: Option<String>,
    pub created_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserView {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub position: Option<String>,
    /// Professional registration number of a lawyer.
    pub bar_number: Option<String>,
}

/// Procedural side of a party in a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParteRole {
    #[default]
    Activa,
    Demandada,
    Tercero,
}

impl ParteRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParteRole::Activa => "activa",
            ParteRole::Demandada => "demandada",
            ParteRole::Tercero => "tercero",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "activa" => Some(ParteRole::Activa),
            "demandada" => Some(ParteRole::Demandada),
            "tercero" => Some(ParteRole::Tercero),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParteView {
    pub role: ParteRole,
    pub name: Option<String>,
    pub document_number: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub lawyer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseView {
    pub id: Option<String>,
    /// Court docket number.
    pub number: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub matter: Option<String>,
    pub court: Option<String>,
    pub jurisdiction: Option<String>,
    pub case_type: Option<String>,
    pub opened_at: Option<NaiveDate>,
    pub closed_at: Option<NaiveDate>,
    /// Amount in dispute.
    pub amount: Option<f64>,
    /// Agreed professional fees.
    pub fees: Option<f64>,
    pub active: Option<bool>,
    pub client: Option<ClientView>,
    /// Parties in insertion order.
    pub partes: Vec<ParteView>,
    /// Assigned team; the first member is the lead lawyer.
    pub team: Vec<UserView>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextMetadata {
    pub generated_at: Option<DateTime<Utc>>,
    pub generated_by: Option<String>,
    pub template_id: Option<String>,
    pub template_version: Option<u32>,
}

/// Aggregate handed to the resolver for one document generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateContext {
    pub case: Option<CaseView>,
    /// Falls back to `case.client` when absent.
    pub client: Option<ClientView>,
    pub user: Option<UserView>,
    /// Free-form values keyed by the path after `custom.`.
    pub custom: BTreeMap<String, serde_json::Value>,
    pub metadata: ContextMetadata,
}

impl TemplateContext {
    /// Client explicitly supplied, or the one attached to the case.
    pub fn effective_client(&self) -> Option<&ClientView> {
        self.client
            .as_ref()
            .or_else(|| self.case.as_ref().and_then(|case| case.client.as_ref()))
    }

    /// Parties of the case, empty when no case is loaded.
    pub fn partes(&self) -> &[ParteView] {
        self.case
            .as_ref()
            .map(|case| case.partes.as_slice())
            .unwrap_or(&[])
    }
}
