//! Runtime configuration read from the environment.
//!
//! Every setting has a default so the server starts with no environment at
//! all. A `.env` file in the working directory is loaded by `main` before
//! [`AppConfig::from_env`] runs.

use crate::error::{AppError, AppResult};
use crate::export::ExportSettings;
use crate::templating::{FormatOptions, LocaleFormat};
use common::model::variable::DateFormat;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PATH: &str = "legajo.sqlite";
const DEFAULT_FONTS_DIR: &str = "./fonts";
const DEFAULT_FONT_FAMILY: &str = "Arial";
const DEFAULT_JSON_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub fonts_dir: PathBuf,
    pub font_family: String,
    /// Used when a request does not pick a date style.
    pub date_format: DateFormat,
    pub currency_symbol: String,
    /// Maximum JSON body size in bytes.
    pub json_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            fonts_dir: PathBuf::from(DEFAULT_FONTS_DIR),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            date_format: DateFormat::default(),
            currency_symbol: LocaleFormat::default().currency_symbol,
            json_limit: DEFAULT_JSON_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            host: get("LEGAJO_HOST").unwrap_or(defaults.host),
            port: match get("LEGAJO_PORT") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| AppError::Config(format!("LEGAJO_PORT '{}' is not a port", raw)))?,
                None => defaults.port,
            },
            db_path: get("LEGAJO_DB_PATH").map(PathBuf::from).unwrap_or(defaults.db_path),
            fonts_dir: get("LEGAJO_FONTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.fonts_dir),
            font_family: get("LEGAJO_FONT_FAMILY").unwrap_or(defaults.font_family),
            date_format: match get("LEGAJO_DATE_FORMAT") {
                Some(raw) => raw.trim().parse().map_err(AppError::Config)?,
                None => defaults.date_format,
            },
            currency_symbol: get("LEGAJO_CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
            json_limit: match get("LEGAJO_JSON_LIMIT") {
                Some(raw) => raw.trim().parse().map_err(|_| {
                    AppError::Config(format!("LEGAJO_JSON_LIMIT '{}' is not a byte count", raw))
                })?,
                None => defaults.json_limit,
            },
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    /// Formatting options for one request; `requested` overrides the
    /// configured date style.
    pub fn format_options(&self, requested: Option<DateFormat>) -> FormatOptions {
        FormatOptions {
            date_format: requested.unwrap_or(self.date_format),
            locale: LocaleFormat {
                currency_symbol: self.currency_symbol.clone(),
                ..LocaleFormat::default()
            },
        }
    }

    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            fonts_dir: self.fonts_dir.clone(),
            font_family: self.font_family.clone(),
        }
    }
}
