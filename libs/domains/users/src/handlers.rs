use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserError;
use crate::gateway::{Envelope, GatewayRequest};
use crate::models::{ErrorBody, User, UserLookup};
use crate::service::UserService;
use crate::store::RecordStore;

/// Fixed 405 body, rendered as a JSON string
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "method not allowed";

/// Query parameter selecting a single user
pub const EMAIL_PARAM: &str = "email";

fn failure(err: UserError) -> Envelope {
    Envelope::render(err.status_code(), &ErrorBody::from(err))
}

/// GET: one user when `email` is given, otherwise every user.
pub async fn get_user<S: RecordStore>(
    service: &UserService<S>,
    request: &GatewayRequest,
) -> Envelope {
    match request.query(EMAIL_PARAM) {
        Some(email) => service.fetch_user(email).await.map(UserLookup::One),
        None => service.fetch_all_users().await.map(UserLookup::All),
    }
    .map_or_else(failure, |found| Envelope::render(StatusCode::OK, &found))
}

/// POST: create from the request body; 201 with the created user.
pub async fn create_user<S: RecordStore>(
    service: &UserService<S>,
    request: &GatewayRequest,
) -> Envelope {
    match service.create_user(&request.body).await {
        Ok(user) => Envelope::render(StatusCode::CREATED, &user),
        Err(err) => failure(err),
    }
}

/// PUT: replace from the request body.
pub async fn update_user<S: RecordStore>(
    service: &UserService<S>,
    request: &GatewayRequest,
) -> Envelope {
    match service.update_user(&request.body).await {
        Ok(user) => Envelope::render(StatusCode::OK, &user),
        Err(err) => failure(err),
    }
}

/// DELETE: remove the user named by the `email` query parameter. The body is JSON `null`.
pub async fn delete_user<S: RecordStore>(
    service: &UserService<S>,
    request: &GatewayRequest,
) -> Envelope {
    let email = request.query(EMAIL_PARAM).unwrap_or_default();

    match service.delete_user(email).await {
        Ok(()) => Envelope::render(StatusCode::OK, &()),
        Err(err) => failure(err),
    }
}

pub fn unhandled_method() -> Envelope {
    Envelope::render(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
}

/// Route a gateway request to its operation by method (case-insensitive).
pub async fn dispatch<S: RecordStore>(
    service: &UserService<S>,
    request: &GatewayRequest,
) -> Envelope {
    let method = request.method.to_ascii_uppercase();
    tracing::debug!(method = %method, "Dispatching gateway request");

    match method.as_str() {
        "GET" => get_user(service, request).await,
        "POST" => create_user(service, request).await,
        "PUT" => update_user(service, request).await,
        "DELETE" => delete_user(service, request).await,
        _ => unhandled_method(),
    }
}

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(http_get_users, http_create_user, http_update_user, http_delete_user),
    components(schemas(User, UserLookup, ErrorBody)),
    tags(
        (name = "Users", description = "User records keyed by email")
    )
)]
pub struct ApiDoc;

/// Create the users router. All four methods share `/`; any other method,
/// HEAD included, gets the 405 envelope.
pub fn router<S: RecordStore + 'static>(service: UserService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(http_get_users::<S>)
                .post(http_create_user::<S>)
                .put(http_update_user::<S>)
                .delete(http_delete_user::<S>)
                .head(http_unhandled_method)
                .fallback(http_unhandled_method),
        )
        .with_state(shared_service)
}

fn gateway_request(method: &str, query: HashMap<String, String>, body: String) -> GatewayRequest {
    GatewayRequest {
        method: method.to_string(),
        query_parameters: query,
        body,
    }
}

/// A body that is not UTF-8 is invalid user data.
fn decode_body(body: &Bytes) -> Result<String, Envelope> {
    std::str::from_utf8(body)
        .map(str::to_owned)
        .map_err(|_| failure(UserError::InvalidData))
}

/// Get one user by email, or list all users
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    params(
        ("email" = Option<String>, Query, description = "Email of a single user")
    ),
    responses(
        (status = 200, description = "A user, or every user as an array when no email is given", body = UserLookup),
        (status = 400, description = "Lookup failed", body = ErrorBody)
    )
)]
async fn http_get_users<S: RecordStore>(
    State(service): State<Arc<UserService<S>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Envelope {
    get_user(&service, &gateway_request("GET", query, String::new())).await
}

/// Create a user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = User,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid data, invalid email, duplicate or store failure", body = ErrorBody)
    )
)]
async fn http_create_user<S: RecordStore>(
    State(service): State<Arc<UserService<S>>>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Envelope {
    match decode_body(&body) {
        Ok(body) => create_user(&service, &gateway_request("POST", query, body)).await,
        Err(envelope) => envelope,
    }
}

/// Replace a user
#[utoipa::path(
    put,
    path = "",
    tag = "Users",
    request_body = User,
    responses(
        (status = 200, description = "User replaced", body = User),
        (status = 400, description = "Invalid data, invalid email, existence rule or store failure", body = ErrorBody)
    )
)]
async fn http_update_user<S: RecordStore>(
    State(service): State<Arc<UserService<S>>>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Envelope {
    match decode_body(&body) {
        Ok(body) => update_user(&service, &gateway_request("PUT", query, body)).await,
        Err(envelope) => envelope,
    }
}

/// Delete a user by email
#[utoipa::path(
    delete,
    path = "",
    tag = "Users",
    params(
        ("email" = String, Query, description = "Email of the user to delete")
    ),
    responses(
        (status = 200, description = "Deleted, or never existed"),
        (status = 400, description = "Store failure", body = ErrorBody)
    )
)]
async fn http_delete_user<S: RecordStore>(
    State(service): State<Arc<UserService<S>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Envelope {
    delete_user(&service, &gateway_request("DELETE", query, String::new())).await
}

async fn http_unhandled_method() -> Envelope {
    unhandled_method()
}
