use std::sync::Arc;

use dotenvy::dotenv;
use order_store::{build_server, run_migrations, AppConfig, DieselOrderRepository, OrderService};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()?;

    let repo = Arc::new(DieselOrderRepository::open(&config.db)?);
    run_migrations(repo.pool())?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(OrderService::new(repo.clone()), &config.host, config.port)?.await?;

    match Arc::try_unwrap(repo) {
        Ok(repo) => repo.close(),
        Err(_) => log::warn!("Order store still in use at shutdown; leaving pool to drop"),
    }
    Ok(())
}
