mod cors;

use std::sync::Arc;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::env_config::Config;
use db::{PgSubscriptionStore, SubscriptionStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();

    // get info
    let is_production = config.is_production();
    let origin = config.cors_allowed_origin.clone();
    let console_logging_enabled = config.console_logging_enabled;

    // init logger
    logger::setup(&config.log_level, config.log_file.as_deref())
        .expect("Failed to set up logger");

    // init db connection
    let database_url = config
        .database
        .connection_url()
        .expect("Invalid database connection settings");
    let pool = db::setup(
        &database_url,
        is_production,
        config.database.max_connections,
    )
    .await
    .expect("Failed to set up database");

    let store: Arc<dyn SubscriptionStore> = Arc::new(PgSubscriptionStore::new(pool.clone()));

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server_host,
        config.server_port
    );

    // SIGINT/SIGTERM stop accepting and drain in-flight requests for `shutdown_timeout`
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(store.clone()))
            .wrap(logger::middleware(console_logging_enabled)) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(api_subs::mount_subscriptions())
            .service(api_subs::mount_docs())
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .shutdown_timeout(config.shutdown_timeout)
    .run()
    .await?;

    log::info!("Server stopped, closing database pool");
    pool.close().await;
    Ok(())
}
