use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::{UserError, UserResult};

/// Store-native representation of one row: attribute name to value.
pub type Record = Map<String, Value>;

/// Attribute that keys user records in the store.
pub const USER_KEY_ATTRIBUTE: &str = "email";

/// User entity, keyed by email.
///
/// Missing fields decode as empty strings so that an absent email is
/// reported by validation rather than by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Decode a raw request body.
    pub fn from_body(raw_body: &str) -> UserResult<Self> {
        serde_json::from_str(raw_body).map_err(|_| UserError::InvalidData)
    }

    /// Encode into the store's record format.
    pub fn to_record(&self) -> UserResult<Record> {
        match serde_json::to_value(self) {
            Ok(Value::Object(record)) => Ok(record),
            _ => Err(UserError::MarshalItem),
        }
    }

    /// Decode a record read back from the store.
    pub fn from_record(record: Record) -> UserResult<Self> {
        serde_json::from_value(Value::Object(record)).map_err(|_| UserError::UnmarshalRecord)
    }
}

/// Successful GET body: one user when an email was given, otherwise all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum UserLookup {
    One(User),
    All(Vec<User>),
}

/// `{"error": "..."}`; the field is left out entirely when there is no message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }
}

impl From<UserError> for ErrorBody {
    fn from(err: UserError) -> Self {
        Self::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_uses_camel_case_fields() {
        let user = User::new("x@y.com", "A", "B");
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({"email": "x@y.com", "firstName": "A", "lastName": "B"})
        );
    }

    #[test]
    fn test_record_round_trip() {
        let user = User::new("x@y.com", "A", "B");
        let record = user.to_record().unwrap();
        assert_eq!(record.get(USER_KEY_ATTRIBUTE), Some(&json!("x@y.com")));
        assert_eq!(User::from_record(record).unwrap(), user);
    }

    #[test]
    fn test_from_body_defaults_missing_fields() {
        let user = User::from_body(r#"{"email":"x@y.com"}"#).unwrap();
        assert_eq!(user, User::new("x@y.com", "", ""));

        let empty = User::from_body("{}").unwrap();
        assert!(empty.email.is_empty());
    }

    #[test]
    fn test_from_body_rejects_malformed_json() {
        assert_eq!(User::from_body("not json"), Err(UserError::InvalidData));
        assert_eq!(User::from_body(""), Err(UserError::InvalidData));
        assert_eq!(
            User::from_body(r#"{"email": 42}"#),
            Err(UserError::InvalidData)
        );
    }

    #[test]
    fn test_from_record_rejects_wrong_types() {
        let record = json!({"email": "x@y.com", "firstName": ["A"]});
        let Value::Object(record) = record else {
            unreachable!()
        };
        assert_eq!(User::from_record(record), Err(UserError::UnmarshalRecord));
    }

    #[test]
    fn test_user_lookup_serializes_without_a_tag() {
        let user = User::new("x@y.com", "A", "B");

        assert_eq!(
            serde_json::to_value(UserLookup::One(user.clone())).unwrap(),
            json!({"email": "x@y.com", "firstName": "A", "lastName": "B"})
        );
        assert_eq!(
            serde_json::to_value(UserLookup::All(vec![user])).unwrap(),
            json!([{"email": "x@y.com", "firstName": "A", "lastName": "B"}])
        );
        assert_eq!(serde_json::to_value(UserLookup::All(vec![])).unwrap(), json!([]));
    }

    #[test]
    fn test_error_body_omits_missing_message() {
        assert_eq!(serde_json::to_string(&ErrorBody::default()).unwrap(), "{}");
        assert_eq!(
            serde_json::to_string(&ErrorBody::from(UserError::InvalidEmail)).unwrap(),
            r#"{"error":"invalid email"}"#
        );
    }
}
