mod config;
mod db;
mod errors;
mod handlers;
mod middleware;
mod models;
mod routes;
mod utils;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use std::io;

use crate::config::Config;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|err| {
        error!("Invalid configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;
    info!("Using {} environment", config.app_env);

    let pool = db::create_pool(&config).await.map_err(|err| {
        error!("Failed to connect to the database: {}", err);
        io::Error::other(err)
    })?;

    db::run_migrations(&pool).await.map_err(|err| {
        error!("Failed to migrate the database: {}", err);
        io::Error::other(err)
    })?;
    info!("Tables migrated successfully");

    let (host, port) = config.bind_address();
    info!("Starting server at {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(middleware::cors())
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
