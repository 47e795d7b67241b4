//! Server configuration.
//!
//! Loaded via the `config` crate from environment variables using `__` as
//! the nesting separator, e.g. `COGNITO__USER_POOL_ID`.
//!
//! See [`CognitoConfig`] for the user pool settings.

use ezdoc_session::CognitoConfig;
use serde::Deserialize;

/// Web server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct WebConfig {
    /// Cognito user pool and app client.
    pub cognito: CognitoConfig,

    /// App client secret, for confidential clients only.
    /// Public clients authenticate the code exchange with PKCE alone.
    #[serde(default)]
    pub client_secret: Option<String>,
}

impl WebConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(
            config::Environment::default()
                .separator("__")
                .try_parsing(true),
        )
    }

    fn from_source(
        source: impl config::Source + Send + Sync + 'static,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        config::Environment::default()
            .separator("__")
            .try_parsing(true)
            .source(Some(vars))
    }

    #[test]
    fn loads_cognito_settings_with_defaults() {
        let config = WebConfig::from_source(environment(&[
            ("COGNITO__REGION", "eu-west-1"),
            ("COGNITO__USER_POOL_ID", "eu-west-1_Pool42"),
            ("COGNITO__CLIENT_ID", "client-xyz"),
            ("COGNITO__REDIRECT_URI", "http://localhost:3000/"),
            ("COGNITO__POST_LOGOUT_REDIRECT_URI", "http://localhost:3000/"),
        ]))
        .expect("load");

        assert_eq!(config.cognito.client_id(), "client-xyz");
        assert_eq!(config.cognito.scopes(), ["openid", "email"]);
        assert_eq!(config.cognito.ui_locale(), "es");
        assert_eq!(config.client_secret, None);
    }

    #[test]
    fn reads_optional_client_secret() {
        let config = WebConfig::from_source(environment(&[
            ("COGNITO__REGION", "eu-west-1"),
            ("COGNITO__USER_POOL_ID", "eu-west-1_Pool42"),
            ("COGNITO__CLIENT_ID", "client-xyz"),
            ("COGNITO__REDIRECT_URI", "http://localhost:3000/"),
            ("COGNITO__POST_LOGOUT_REDIRECT_URI", "http://localhost:3000/"),
            ("COGNITO__SCOPES", "openid,email,profile"),
            ("CLIENT_SECRET", "s3cret"),
        ]))
        .expect("load");

        assert_eq!(config.cognito.scopes(), ["openid", "email", "profile"]);
        assert_eq!(config.client_secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn missing_cognito_settings_is_an_error() {
        assert!(WebConfig::from_source(environment(&[])).is_err());
    }
}
