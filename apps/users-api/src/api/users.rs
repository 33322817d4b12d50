//! Users API routes
//!
//! Picks the record store named by the configuration and mounts the users
//! domain router on top of it.

use axum::Router;
use domain_users::{DynamoRecordStore, InMemoryRecordStore, UserService, handlers};
use tracing::{info, warn};

use crate::config::{Config, StoreBackend};

/// Create users router
pub async fn router(config: &Config) -> Router {
    match config.store {
        StoreBackend::DynamoDb => {
            let store = DynamoRecordStore::from_config(&config.dynamodb).await;
            info!(table = %store.table_name(), "Using DynamoDB user store");
            handlers::router(UserService::new(store).with_update_policy(config.update_policy))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory user store; data is lost on restart");
            handlers::router(
                UserService::new(InMemoryRecordStore::new())
                    .with_update_policy(config.update_policy),
            )
        }
    }
}
