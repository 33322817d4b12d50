use axum::Router;
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

/// Full application router: `/api/users`, OpenAPI JSON and `/health`.
async fn build_app(config: &Config) -> Router {
    let users = api::users::router(config).await;
    let router = create_router::<openapi::ApiDoc>(api::routes(users));

    router.merge(health_router(config.app))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(
        store = %config.store,
        table = %config.dynamodb.table_name,
        update_policy = %config.update_policy,
        "Starting Users API"
    );

    let app = build_app(&config).await;

    create_production_app(app, &config.server, Duration::from_secs(30), async {
        // Store clients hold no connections that need closing.
        info!("No cleanup required");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
