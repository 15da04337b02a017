//! Shared application state handed to every handler as `web::Data`.

use crate::config::AppConfig;
use crate::store::Store;
use crate::templating::TemplateEngine;
use common::model::variable::DateFormat;
use std::sync::Arc;

/// Configuration plus the store. Cloning is cheap; there is no mutable
/// state shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Store,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = Store::new(config.db_path.clone());
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Engine configured for one request.
    pub fn engine(&self, date_format: Option<DateFormat>) -> TemplateEngine {
        TemplateEngine::new(self.config.format_options(date_format))
    }
}
