mod config;
mod constants;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod routes;
mod schema;
#[cfg(test)]
mod test_utils;
mod utils;

use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::middleware::session_middleware::SessionGate;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load();
    let pool = db::init_pool(&config).expect("Failed to set up database");

    info!("Starting server on {}:{}", config.bind_addr, config.port);
    let bind = (config.bind_addr.clone(), config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(SessionGate)
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await
}
