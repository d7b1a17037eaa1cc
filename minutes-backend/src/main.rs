use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod ai;
mod config;
mod controllers;
mod db;

use ai::Summarizer;
use config::Config;
use db::Database;

pub struct AppState {
    pub db: Arc<Database>,
    pub config: Config,
    /// Groq-backed summarizer, or a placeholder when no API key is set
    pub summarizer: Arc<dyn Summarizer>,
    /// Server start time for uptime calculation
    pub started_at: std::time::Instant,
}

fn build_cors(allowed_origin: &str) -> Cors {
    let cors = if allowed_origin == "*" {
        Cors::default().allow_any_origin()
    } else {
        Cors::default()
            .allowed_origin(allowed_origin)
            .supports_credentials()
    };

    cors.allow_any_method().allow_any_header().max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Minutes backend v{}", env!("CARGO_PKG_VERSION"));
    if let Ok(cwd) = std::env::current_dir() {
        log::info!("Working directory: {:?}", cwd);
    }

    let config = Config::from_env();
    let port = config.port;

    log::info!("Opening database at {}", config.database_url);
    let db = Database::new(&config.database_url).map_err(|e| {
        log::error!("Failed to open database: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    let db = Arc::new(db);

    let summarizer = ai::build_summarizer(&config.summarizer);
    let started_at = std::time::Instant::now();

    log::info!("Starting server on 0.0.0.0:{}", port);

    let server = HttpServer::new(move || {
        let cors = build_cors(&config.cors_allowed_origin);

        App::new()
            .app_data(web::Data::new(AppState {
                db: Arc::clone(&db),
                config: config.clone(),
                summarizer: Arc::clone(&summarizer),
                started_at,
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::meetings::config)
    })
    .bind(("0.0.0.0", port))?
    .run();

    let server_handle = server.handle();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(std::time::Duration::from_secs(5), server_stop)
            .await
            .is_err()
        {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}
