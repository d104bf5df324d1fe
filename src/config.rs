use std::{env, time::Duration};

use serde::{Deserialize, Deserializer};

pub const ADMIN_SECRET_KEY_VAR: &str = "SKY_JWT_ADMIN_SECRET_KEY";
pub const ADMIN_TTL_VAR: &str = "SKY_JWT_ADMIN_TTL";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("{var} must be a number of milliseconds, got {value:?}")]
    InvalidTtl { var: &'static str, value: String },
}

/// Token settings for the admin principal class.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtProperties {
    /// The secret used to sign admin tokens.
    /// If the secret changes, every previously issued admin token stops verifying.
    pub admin_secret_key: String,
    /// How long admin tokens remain valid. Configured in milliseconds.
    #[serde(deserialize_with = "deserialize_millis")]
    pub admin_ttl: Duration,
}

impl JwtProperties {
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin_secret_key =
            env::var(ADMIN_SECRET_KEY_VAR).map_err(|_| ConfigError::Missing(ADMIN_SECRET_KEY_VAR))?;
        let ttl = env::var(ADMIN_TTL_VAR).map_err(|_| ConfigError::Missing(ADMIN_TTL_VAR))?;

        Ok(Self {
            admin_secret_key,
            admin_ttl: parse_millis(ADMIN_TTL_VAR, &ttl)?,
        })
    }
}

fn parse_millis(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidTtl {
            var,
            value: value.to_owned(),
        })
}

fn deserialize_millis<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}
