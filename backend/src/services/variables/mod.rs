//! # Variable Catalog Service
//!
//! `GET /api/variables` lists the variables a template author can use,
//! optionally restricted with `?source=client|case|user|parte|custom`.

use crate::templating::catalog::list_variables;
use actix_web::web::{get, scope, Query};
use actix_web::{HttpResponse, Scope};
use common::model::variable::VariableSource;
use serde::Deserialize;

const API_PATH: &str = "/api/variables";

#[derive(Debug, Deserialize)]
pub struct VariablesQuery {
    pub source: Option<VariableSource>,
}

pub async fn process(query: Query<VariablesQuery>) -> HttpResponse {
    HttpResponse::Ok().json(list_variables(query.source))
}

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(process))
}
