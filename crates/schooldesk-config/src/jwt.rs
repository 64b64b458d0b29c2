use crate::error::{ConfigError, parse_or, required};

/// One day, the lifetime of a session token.
pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 86_400;

/// Longest accepted token lifetime: five years.
pub const MAX_TOKEN_EXPIRY_SECONDS: i64 = 5 * 365 * 86_400;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_expiry = parse_or(&lookup, "JWT_EXPIRY_SECONDS", DEFAULT_TOKEN_EXPIRY_SECONDS)?;
        if token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRY_SECONDS",
                value: token_expiry.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if token_expiry > MAX_TOKEN_EXPIRY_SECONDS {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRY_SECONDS",
                value: token_expiry.to_string(),
                reason: format!("must not exceed {MAX_TOKEN_EXPIRY_SECONDS}"),
            });
        }

        Ok(Self {
            secret: required(&lookup, "JWT_SECRET")?,
            token_expiry,
        })
    }
}
