mod config;
mod gemini;
mod routes;
mod tasks;
#[cfg(test)]
mod test_support;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use config::AppConfig;
use gemini::GeminiClient;
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

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Refusing to start: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Configuration error: {}", e),
            ));
        }
    };

    let gemini_client = GeminiClient::new(config.api_key.clone(), &config.inference);
    log::info!(
        "Inference service: {} (model {})",
        config.inference.base_url,
        gemini_client.model()
    );
    log::info!("Serving frontend from {}", config.frontend_dir);

    let bind_address = config.bind_address();
    let frontend_dir = config.frontend_dir.clone();

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
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
            .app_data(web::Data::new(gemini_client.clone()))
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
