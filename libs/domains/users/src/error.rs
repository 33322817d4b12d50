use axum::http::StatusCode;
use thiserror::Error;

/// Failure of a single user operation.
///
/// Messages are part of the wire contract: they are returned verbatim in
/// the `{"error": ...}` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("invalid user data")]
    InvalidData,

    #[error("invalid email")]
    InvalidEmail,

    #[error("failed to fetch record")]
    FetchRecord,

    #[error("failed to unmarshal record")]
    UnmarshalRecord,

    #[error("could not marshal item")]
    MarshalItem,

    #[error("could not put item")]
    StoreWrite,

    #[error("could not delete item")]
    DeleteItem,

    #[error("user already exists")]
    DuplicateUser,

    #[error("user does not exist")]
    UserNotFound,
}

impl UserError {
    /// Every user error is reported as a client error; the kinds are not
    /// distinguished by status code.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

pub type UserResult<T> = Result<T, UserError>;
