//! Users Domain
//!
//! CRUD over `User` records keyed by email, served through a
//! request/response gateway.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← GatewayRequest → Envelope, method dispatch, axum adapter
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← decode, email validation, existence checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ RecordStore │  ← get / scan_all / put / delete (DynamoDB, in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, Record, ErrorBody
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{GatewayRequest, InMemoryRecordStore, UserService, handlers};
//!
//! # async fn example() {
//! let service = UserService::new(InMemoryRecordStore::new());
//!
//! // Gateway style
//! let request = GatewayRequest::new("GET").with_query("email", "jane@example.com");
//! let envelope = handlers::dispatch(&service, &request).await;
//! assert_eq!(envelope.status_code, 400);
//!
//! // Or as an Axum router
//! let _router = handlers::router(service);
//! # }
//! ```

pub mod dynamodb;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use dynamodb::DynamoRecordStore;
pub use error::{UserError, UserResult};
pub use gateway::{Envelope, GatewayRequest};
pub use handlers::ApiDoc;
pub use models::{ErrorBody, Record, User, UserLookup};
pub use service::{UpdatePolicy, UserService};
pub use store::{InMemoryRecordStore, RecordStore, StoreError, StoreResult};
pub use validation::is_email_valid;
