use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a resolved value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Text,
    Number,
    Currency,
    Date,
    Boolean,
}

/// Entity a variable is read from. This is the first segment of the
/// placeholder path (`client.name` -> `Client`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableSource {
    Client,
    Case,
    User,
    Parte,
    Custom,
}

impl VariableSource {
    pub const ALL: [VariableSource; 5] = [
        VariableSource::Client,
        VariableSource::Case,
        VariableSource::User,
        VariableSource::Parte,
        VariableSource::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VariableSource::Client => "client",
            VariableSource::Case => "case",
            VariableSource::User => "user",
            VariableSource::Parte => "parte",
            VariableSource::Custom => "custom",
        }
    }
}

impl fmt::Display for VariableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariableSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VariableSource::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| format!("Unknown variable source '{}'", s))
    }
}

/// Catalog entry describing one placeholder a template author can use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateVariable {
    /// Dotted path as written inside `{{ }}`, e.g. `client.name`.
    pub name: String,
    /// Human readable label shown in the template editor.
    pub label: String,
    pub var_type: VariableType,
    pub source: VariableSource,
    pub category: Option<String>,
    pub required: bool,
}

/// Result of checking a template's placeholders against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderReport {
    pub known: Vec<TemplateVariable>,
    pub unknown: Vec<String>,
}

/// Date style used when a date variable is substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// `15/10/2026`
    #[default]
    Short,
    /// `15 de octubre de 2026`
    Long,
    /// `jueves, 15 de octubre de 2026`
    Full,
}

impl FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(DateFormat::Short),
            "long" => Ok(DateFormat::Long),
            "full" => Ok(DateFormat::Full),
            other => Err(format!("Unknown date format '{}'", other)),
        }
    }
}
