mod form;
mod inference;
mod routes;
mod upload;

use std::env;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use inference::model::Predictor;
use routes::configure_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    }

    let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| {
        if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
            format!("{}/../static", manifest_dir)
        } else {
            "/usr/src/app/static".to_string()
        }
    });

    // The model is loaded exactly once and stays immutable for the process
    // lifetime; a missing or unreadable artifact is fatal.
    let model_path =
        env::var("MODEL_PATH").unwrap_or_else(|_| "models/price_model.gbdt".to_string());
    let predictor = Predictor::load(&model_path).map_err(|e| {
        log::error!("Failed to load model at startup: {}", e);
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Model loading failed: {}", e),
        )
    })?;
    let predictor = web::Data::new(predictor);

    let port = env::var("PORT").unwrap_or_else(|_| "8081".to_string());
    let bind_address = format!("0.0.0.0:{}", port);
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
            .app_data(predictor.clone())
            .configure(|cfg| configure_routes(cfg, static_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
