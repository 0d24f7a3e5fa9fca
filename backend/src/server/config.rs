//! Environment-driven configuration for the service binaries.

/// Default listen port for the auth service.
pub const DEFAULT_AUTH_PORT: u16 = 8081;
/// Default listen port for the recipe-catalogue service.
pub const DEFAULT_RECIPE_PORT: u16 = 8082;

/// Failures loading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("environment variable {name} is required")]
    Missing {
        /// The variable's name.
        name: &'static str,
    },
    /// A variable is present but unparsable.
    #[error("environment variable {name} is invalid: {message}")]
    Invalid {
        /// The variable's name.
        name: &'static str,
        /// What failed to parse.
        message: String,
    },
}

/// Listener and database settings shared by both binaries.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Port to bind on `0.0.0.0`.
    pub port: u16,
}

impl ServiceConfig {
    /// Load from the process environment. `DATABASE_URL` is required; the
    /// port falls back to `default_port` when `port_var` is unset.
    pub fn from_env(port_var: &'static str, default_port: u16) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok(), port_var, default_port)
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        port_var: &'static str,
        default_port: u16,
    ) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing {
                name: "DATABASE_URL",
            })?;
        let port = match lookup(port_var) {
            None => default_port,
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: port_var,
                message: raw,
            })?,
        };
        Ok(Self { database_url, port })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn database_url_is_required() {
        let err = ServiceConfig::from_lookup(|_| None, "AUTH_SERVICE_PORT", DEFAULT_AUTH_PORT)
            .expect_err("missing url");
        assert_eq!(
            err,
            ConfigError::Missing {
                name: "DATABASE_URL"
            }
        );
    }

    #[rstest]
    fn port_defaults_when_unset() {
        let config = ServiceConfig::from_lookup(
            |name| (name == "DATABASE_URL").then(|| "postgres://localhost/meals".to_owned()),
            "AUTH_SERVICE_PORT",
            DEFAULT_AUTH_PORT,
        )
        .expect("config");
        assert_eq!(config.port, DEFAULT_AUTH_PORT);
    }

    #[rstest]
    fn port_overrides_and_rejects_garbage() {
        let lookup = |value: &'static str| {
            move |name: &str| match name {
                "DATABASE_URL" => Some("postgres://localhost/meals".to_owned()),
                "RECIPE_SERVICE_PORT" => Some(value.to_owned()),
                _ => None,
            }
        };

        let config =
            ServiceConfig::from_lookup(lookup("9000"), "RECIPE_SERVICE_PORT", DEFAULT_RECIPE_PORT)
                .expect("config");
        assert_eq!(config.port, 9000);

        let err =
            ServiceConfig::from_lookup(lookup("nine"), "RECIPE_SERVICE_PORT", DEFAULT_RECIPE_PORT)
                .expect_err("bad port");
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
