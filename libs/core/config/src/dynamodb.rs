use crate::{env_optional, env_or_default, ConfigError, FromEnv};

/// Table used when `DYNAMODB_TABLE` is not set
pub const DEFAULT_TABLE: &str = "users";

/// DynamoDB table configuration
///
/// Credentials are not part of this struct; they come from the AWS SDK's
/// default provider chain (env vars, web identity, instance profile, shared file).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DynamoConfig {
    pub table_name: String,
    /// Region override. `None` defers to the SDK's region resolution.
    pub region: Option<String>,
    /// Endpoint override, e.g. `http://localhost:8000` for DynamoDB Local.
    pub endpoint_url: Option<String>,
}

impl DynamoConfig {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            region: None,
            endpoint_url: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}

impl FromEnv for DynamoConfig {
    /// - DYNAMODB_TABLE: defaults to "users"
    /// - DYNAMODB_REGION, then AWS_REGION: optional
    /// - DYNAMODB_ENDPOINT: optional
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            table_name: env_or_default("DYNAMODB_TABLE", DEFAULT_TABLE),
            region: env_optional("DYNAMODB_REGION").or_else(|| env_optional("AWS_REGION")),
            endpoint_url: env_optional("DYNAMODB_ENDPOINT"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamo_config_defaults() {
        temp_env::with_vars(
            [
                ("DYNAMODB_TABLE", None::<&str>),
                ("DYNAMODB_REGION", None::<&str>),
                ("AWS_REGION", None::<&str>),
                ("DYNAMODB_ENDPOINT", None::<&str>),
            ],
            || {
                let config = DynamoConfig::from_env().unwrap();
                assert_eq!(config, DynamoConfig::new(DEFAULT_TABLE));
            },
        );
    }

    #[test]
    fn test_dynamo_config_region_precedence() {
        temp_env::with_vars(
            [
                ("DYNAMODB_TABLE", Some("people")),
                ("DYNAMODB_REGION", Some("eu-west-1")),
                ("AWS_REGION", Some("us-east-1")),
                ("DYNAMODB_ENDPOINT", Some("http://localhost:8000")),
            ],
            || {
                let config = DynamoConfig::from_env().unwrap();
                assert_eq!(config.table_name, "people");
                assert_eq!(config.region.as_deref(), Some("eu-west-1"));
                assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8000"));
            },
        );
    }

    #[test]
    fn test_dynamo_config_falls_back_to_aws_region() {
        temp_env::with_vars(
            [("DYNAMODB_REGION", None::<&str>), ("AWS_REGION", Some("us-east-2"))],
            || {
                let config = DynamoConfig::from_env().unwrap();
                assert_eq!(config.region.as_deref(), Some("us-east-2"));
            },
        );
    }
}
