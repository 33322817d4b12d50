use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, dynamodb::DynamoConfig, env_parse_or,
    server::ServerConfig,
};
use domain_users::UpdatePolicy;
use strum::{Display, EnumString};

pub use core_config::Environment;

/// Backend holding the user table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StoreBackend {
    #[default]
    #[strum(serialize = "dynamodb")]
    DynamoDb,
    /// Process-local table, lost on restart. For local runs and demos.
    Memory,
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub dynamodb: DynamoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// `USER_STORE`: dynamodb (default) or memory
    pub store: StoreBackend,
    /// `USER_UPDATE_POLICY`: require_existing (default) or reject_existing
    pub update_policy: UpdatePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            dynamodb: DynamoConfig::from_env()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
            store: env_parse_or("USER_STORE", StoreBackend::default())?,
            update_policy: env_parse_or("USER_UPDATE_POLICY", UpdatePolicy::default())?,
        })
    }
}
