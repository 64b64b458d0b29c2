//! # SchoolDesk Config
//!
//! Configuration types for the SchoolDesk API.
//!
//! The whole configuration is read once at process start into an
//! [`AppConfig`] and handed by reference to whatever needs it (token
//! functions, store constructors, the router). Nothing below the binary's
//! `main` reads the environment.
//!
//! Each part also exposes `from_lookup`, which takes a variable lookup
//! function instead of touching the process environment.
//!
//! # Environment Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `5000` |
//! | `DATABASE_URL` | required |
//! | `DATABASE_MAX_CONNECTIONS` | `10` |
//! | `JWT_SECRET` | required |
//! | `JWT_EXPIRY_SECONDS` | `86400` |
//! | `BCRYPT_COST` | `10` |
//! | `ALLOWED_ORIGINS` | `http://localhost:5173,http://localhost:3000` |
//! | `LOG_LEVEL` | `info` |
//! | `LOG_DIR` | unset (console only) |

pub mod cors;
pub mod database;
pub mod error;
pub mod jwt;
pub mod password;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use password::PasswordConfig;
pub use server::{LoggingConfig, ServerConfig};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig::from_lookup(&lookup)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
            jwt: JwtConfig::from_lookup(&lookup)?,
            password: PasswordConfig::from_lookup(&lookup)?,
            cors: CorsConfig::from_lookup(&lookup),
            logging: LoggingConfig::from_lookup(&lookup),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DATABASE_URL", "postgres://localhost/schooldesk"),
            ("JWT_SECRET", "test-secret"),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&minimal())).unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.jwt.token_expiry, 86_400);
        assert_eq!(config.password.bcrypt_cost, 10);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.dir.is_none());
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://localhost:5173", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_missing_jwt_secret_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/schooldesk",
        )]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_blank_jwt_secret_is_missing() {
        let err = JwtConfig::from_lookup(lookup_from(&[("JWT_SECRET", "   ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_missing_database_url() {
        let err = DatabaseConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = minimal();
        vars.push(("PORT", "not-a-port"));
        let err = AppConfig::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        let err = PasswordConfig::from_lookup(lookup_from(&[("BCRYPT_COST", "3")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "BCRYPT_COST", .. }));

        let config = PasswordConfig::from_lookup(lookup_from(&[("BCRYPT_COST", "12")])).unwrap();
        assert_eq!(config.bcrypt_cost, 12);
    }

    #[test]
    fn test_non_positive_expiry_rejected() {
        let err = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "secret"),
            ("JWT_EXPIRY_SECONDS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "JWT_EXPIRY_SECONDS", .. }));
    }

    #[test]
    fn test_expiry_upper_bound() {
        let max = jwt::MAX_TOKEN_EXPIRY_SECONDS.to_string();
        let config = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "secret"),
            ("JWT_EXPIRY_SECONDS", max.as_str()),
        ]))
        .unwrap();
        assert_eq!(config.token_expiry, jwt::MAX_TOKEN_EXPIRY_SECONDS);

        let too_long = (jwt::MAX_TOKEN_EXPIRY_SECONDS + 1).to_string();
        let err = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "secret"),
            ("JWT_EXPIRY_SECONDS", too_long.as_str()),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "JWT_EXPIRY_SECONDS", .. }));

        let err = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "secret"),
            ("JWT_EXPIRY_SECONDS", "9223372036854775807"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "JWT_EXPIRY_SECONDS", .. }));
    }

    #[test]
    fn test_cors_origins_are_trimmed() {
        let config = CorsConfig::from_lookup(lookup_from(&[(
            "ALLOWED_ORIGINS",
            " https://school.example.com , ,http://localhost:5173",
        )]));
        assert_eq!(
            config.allowed_origins,
            vec!["https://school.example.com", "http://localhost:5173"]
        );
    }
}
