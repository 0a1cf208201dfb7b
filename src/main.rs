mod api;
mod config;
mod database;
mod middleware;
mod models;
mod routes;
mod services;
mod utils;
mod views;


use std::sync::Arc;

use actix_web::dev::Service;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{AppConfig, StoreBackend};
use crate::database::{InMemoryUsers, MongoDB, UserRepository};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("🚀 Starting Diary Service...");

    let users: Arc<dyn UserRepository> = match config.store {
        StoreBackend::Mongo => {
            log::info!("📊 Database: {}", config.mongodb_uri);
            let db = MongoDB::new(&config.mongodb_uri).await.map_err(|e| {
                log::error!("❌ Could not connect to MongoDB: {}", e);
                std::io::Error::other(e)
            })?;
            log::info!("✅ MongoDB connected successfully");
            Arc::new(db)
        }
        StoreBackend::Memory => {
            log::warn!("⚠️ Using the in-memory store, data is lost on shutdown");
            Arc::new(InMemoryUsers::new())
        }
    };
    let users = web::Data::from(users);

    // One key for every worker, or cookies signed by one worker fail on another.
    let session_key = config.session_key();
    let session_config = config.clone();

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(users.clone())
            .wrap(middleware::session_middleware(
                &session_config,
                session_key.clone(),
            ))
            .wrap(middleware::MethodOverride)
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            .wrap_fn(|req, srv| {
                api::metrics::increment_request_count();
                srv.call(req)
            })
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi),
            )
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
