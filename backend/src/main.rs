use actix_web::{web, App, HttpServer};
use env_logger::Env;
use legajo_backend::config::AppConfig;
use legajo_backend::services;
use legajo_backend::state::AppState;
use log::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Could not read .env: {}", e);
        }
    }
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let state = AppState::new(config);
    state.store.init_schema().map_err(|e| {
        error!("Could not prepare database: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    if !state.config.fonts_dir.is_dir() {
        warn!(
            "Fonts directory {} not found, PDF export will fail",
            state.config.fonts_dir.display()
        );
    }

    let (host, port) = state.config.bind_address();
    let json_limit = state.config.json_limit;
    info!("Server running at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure_services)
    })
    .bind((host, port))?
    .run()
    .await
}
