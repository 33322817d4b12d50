//! # Axum Helpers
//!
//! Server plumbing shared by the HTTP binaries:
//!
//! - **[`server`]**: router assembly with OpenAPI JSON, tracing layer,
//!   health endpoint and graceful shutdown.
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let router = create_router::<ApiDoc>(Router::new());
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(10), async {})
//!         .await
//! }
//! ```

pub mod server;

pub use server::{
    HealthResponse, OPENAPI_PATH, ShutdownCoordinator, create_production_app, create_router,
    health_router, shutdown_signal,
};
