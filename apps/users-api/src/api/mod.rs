//! API routes module

pub mod users;

use axum::Router;

/// All API routes.
/// Note: these are nested under /api by axum_helpers::create_router
pub fn routes(users: Router) -> Router {
    Router::new().nest("/users", users)
}
