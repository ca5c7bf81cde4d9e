mod models;
mod routes;
mod db;
mod services;
mod settings;
mod utils;
mod middleware;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use services::store::PgUserStore;
use services::wallet_service::WalletService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let settings = settings::Settings::new().map_err(std::io::Error::other)?;
    utils::logging::init(&settings.log_level).map_err(std::io::Error::other)?;

    log::info!("Connecting to database...");
    let db = db::establish_connection(&settings.database_url)
        .await
        .map_err(|e| {
            log::error!("Failed to connect to database: {}", e);
            std::io::Error::other(e)
        })?;
    log::info!("Database connected, users table: {}", settings.users_table);

    let store = Arc::new(PgUserStore::new(db, settings.users_table.clone()));
    let wallet_service = web::Data::new(WalletService::new(store));

    log::info!(
        "Starting server on http://{}:{}",
        settings.server_host,
        settings.server_port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(wallet_service.clone())
            .configure(routes::configure_routes)
    })
        .bind((settings.server_host.as_str(), settings.server_port))?
        .run()
        .await
}
