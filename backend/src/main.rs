mod config;
mod error;
mod inference;
mod routes;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use config::AppConfig;
use error::StartupError;
use inference::{InferencePipeline, shared_classifier};
use routes::configure_routes;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        StartupError::from(e)
    })?;

    // The server never binds without a model.
    let classifier = shared_classifier(&config.model_path).map_err(|e| {
        log::error!("Failed to load model at startup: {}", e);
        e
    })?;
    log::info!("Model ready from {}", config.model_path.display());

    let pipeline = InferencePipeline::new(classifier);
    let frontend_dir = config.frontend_dir.display().to_string();
    let bind_address = config.bind_address();
    let config = web::Data::new(config);

    log::info!("Serving frontend from {}", frontend_dir);
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(web::Data::new(pipeline.clone()))
            .app_data(config.clone())
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
