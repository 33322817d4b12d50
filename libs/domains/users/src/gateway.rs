//! Gateway request and response envelope.
//!
//! The shapes follow API-gateway proxy events: a method, flat query
//! parameters and a raw string body in; a status code, headers and a JSON
//! string body out.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of the 500 envelope. Written out literally so producing it cannot fail.
pub const INTERNAL_ERROR_BODY: &str = r#"{"error":"internal server error"}"#;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Inbound request as delivered by the gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    pub method: String,
    #[serde(default)]
    pub query_parameters: HashMap<String, String>,
    #[serde(default)]
    pub body: String,
}

impl GatewayRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Default::default()
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Query parameter `name` when present and non-empty
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_parameters
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Uniform response: status code, JSON content type, JSON body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl Envelope {
    /// Serialize `payload` into an envelope with `status`.
    ///
    /// # Errors
    /// Returns the serializer's error if `payload` cannot be rendered as JSON.
    pub fn json<T>(status: StatusCode, payload: &T) -> Result<Self, serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_string(payload)?;
        Ok(Self::raw(status, body))
    }

    /// Like [`Envelope::json`], but a serialization failure is logged and
    /// answered with [`Envelope::internal_error`].
    pub fn render<T>(status: StatusCode, payload: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        Self::json(status, payload).unwrap_or_else(|e| {
            tracing::error!(error = %e, status = status.as_u16(), "Failed to render response body");
            Self::internal_error()
        })
    }

    pub fn internal_error() -> Self {
        Self::raw(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY.to_string())
    }

    fn raw(status: StatusCode, body: String) -> Self {
        Self {
            status_code: status.as_u16(),
            headers: HashMap::from([(
                CONTENT_TYPE_HEADER.to_string(),
                CONTENT_TYPE_JSON.to_string(),
            )]),
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Header lookup, case-insensitive on the name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = (status, self.body).into_response();

        let headers = response.headers_mut();
        for (name, value) in self.headers {
            match (
                header::HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid envelope header"),
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_query_ignores_empty_values() {
        let request = GatewayRequest::new("GET").with_query("email", "");
        assert_eq!(request.query("email"), None);

        let request = GatewayRequest::new("GET").with_query("email", "a@b.com");
        assert_eq!(request.query("email"), Some("a@b.com"));
        assert_eq!(request.query("other"), None);
    }

    #[test]
    fn test_request_deserializes_gateway_shape() {
        let request: GatewayRequest = serde_json::from_str(
            r#"{"method":"DELETE","queryParameters":{"email":"a@b.com"}}"#,
        )
        .unwrap();

        assert_eq!(request.method, "DELETE");
        assert_eq!(request.query("email"), Some("a@b.com"));
        assert!(request.body.is_empty());
    }

    #[test]
    fn test_json_envelope_sets_content_type() {
        let envelope = Envelope::json(StatusCode::CREATED, &vec![1, 2]).unwrap();

        assert_eq!(envelope.status_code, 201);
        assert_eq!(envelope.header("content-type"), Some(CONTENT_TYPE_JSON));
        assert_eq!(envelope.body, "[1,2]");
    }

    #[test]
    fn test_render_degrades_to_internal_error() {
        // Non-string map keys cannot be rendered as a JSON object.
        let payload = BTreeMap::from([((1u8, 2u8), "value")]);

        assert!(Envelope::json(StatusCode::OK, &payload).is_err());

        let envelope = Envelope::render(StatusCode::OK, &payload);
        assert_eq!(envelope.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(envelope.body, INTERNAL_ERROR_BODY);
        assert_eq!(envelope.header("Content-Type"), Some(CONTENT_TYPE_JSON));
    }

    #[test]
    fn test_envelope_serializes_camel_case() {
        let envelope = Envelope::render(StatusCode::OK, "ok");
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["headers"]["Content-Type"], CONTENT_TYPE_JSON);
        assert_eq!(value["body"], r#""ok""#);
    }

    #[test]
    fn test_into_response_copies_status_and_headers() {
        let response = Envelope::render(StatusCode::METHOD_NOT_ALLOWED, "nope").into_response();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            HeaderValue::from_static(CONTENT_TYPE_JSON)
        );
    }
}
