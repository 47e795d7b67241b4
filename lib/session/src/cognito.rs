//! Amazon Cognito user pool configuration.
//!
//! The app signs in against a Cognito user pool through its OIDC endpoints
//! and signs out through the pool's hosted UI domain. Everything here is
//! public client configuration; secrets never live in this type.

use serde::{Deserialize, Serialize};

use crate::client::AuthSettings;

/// Configuration for the Cognito user pool and app client.
///
/// Fields with defaults can be omitted when loading from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CognitoConfig {
    /// AWS region hosting the pool (e.g., "eu-west-1").
    region: String,
    /// User pool ID (e.g., "eu-west-1_AbCdEf123").
    user_pool_id: String,
    /// The app client ID.
    client_id: String,
    /// Where the provider redirects after sign-in.
    redirect_uri: String,
    /// Where the provider redirects after sign-out.
    post_logout_redirect_uri: String,
    /// OAuth2 scopes to request as a comma-separated string.
    /// Default: "openid,email"
    #[serde(default = "default_scopes")]
    scopes: String,
    /// Hosted UI language, sent as the `lang` authorization parameter.
    /// Default: "es"
    #[serde(default = "default_ui_locale")]
    ui_locale: String,
}

fn default_scopes() -> String {
    "openid,email".to_string()
}

fn default_ui_locale() -> String {
    "es".to_string()
}

impl CognitoConfig {
    /// Creates a configuration with defaults for optional fields.
    #[must_use]
    pub fn new(
        region: String,
        user_pool_id: String,
        client_id: String,
        redirect_uri: String,
        post_logout_redirect_uri: String,
    ) -> Self {
        Self {
            region,
            user_pool_id,
            client_id,
            redirect_uri,
            post_logout_redirect_uri,
            scopes: default_scopes(),
            ui_locale: default_ui_locale(),
        }
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn user_pool_id(&self) -> &str {
        &self.user_pool_id
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    #[must_use]
    pub fn post_logout_redirect_uri(&self) -> &str {
        &self.post_logout_redirect_uri
    }

    /// Returns the scopes to request, parsed from the comma-separated string.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scopes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    #[must_use]
    pub fn ui_locale(&self) -> &str {
        &self.ui_locale
    }

    /// Sets the scopes to request.
    #[must_use]
    pub fn with_scopes(mut self, scopes: &[&str]) -> Self {
        self.scopes = scopes.join(",");
        self
    }

    /// Sets the hosted UI language.
    #[must_use]
    pub fn with_ui_locale(mut self, locale: impl Into<String>) -> Self {
        self.ui_locale = locale.into();
        self
    }

    /// The OIDC issuer for the pool, used for discovery.
    #[must_use]
    pub fn authority(&self) -> String {
        format!(
            "https://cognito-idp.{}.amazonaws.com/{}",
            self.region, self.user_pool_id
        )
    }

    /// The hosted UI domain serving `/logout`.
    ///
    /// Cognito prefix domains are the pool ID with its first underscore removed.
    #[must_use]
    pub fn hosted_ui_domain(&self) -> String {
        format!(
            "https://{}.auth.{}.amazoncognito.com",
            self.user_pool_id.replacen('_', "", 1),
            self.region
        )
    }

    /// Settings the auth collaborator exposes to the UI.
    #[must_use]
    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings::new(
            self.client_id.clone(),
            self.post_logout_redirect_uri.clone(),
        )
    }

    /// Builds the hosted UI logout URL for the given collaborator settings.
    #[must_use]
    pub fn logout_url(&self, settings: &AuthSettings) -> String {
        format!(
            "{}/logout?client_id={}&logout_uri={}",
            self.hosted_ui_domain(),
            settings.client_id(),
            urlencoding::encode(settings.post_logout_redirect_uri())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CognitoConfig {
        CognitoConfig::new(
            "eu-west-1".to_string(),
            "eu-west-1_AbCdEf123".to_string(),
            "client-abc".to_string(),
            "https://app.example/".to_string(),
            "https://app.example/signed-out?from=app".to_string(),
        )
    }

    #[test]
    fn new_config_has_defaults() {
        let config = config();
        assert_eq!(config.scopes(), vec!["openid", "email"]);
        assert_eq!(config.ui_locale(), "es");
    }

    #[test]
    fn authority_points_at_the_pool() {
        assert_eq!(
            config().authority(),
            "https://cognito-idp.eu-west-1.amazonaws.com/eu-west-1_AbCdEf123"
        );
    }

    #[test]
    fn hosted_ui_domain_drops_first_underscore_only() {
        let config = CognitoConfig::new(
            "us-east-1".to_string(),
            "us-east-1_a_b".to_string(),
            "c".to_string(),
            "r".to_string(),
            "p".to_string(),
        );
        assert_eq!(
            config.hosted_ui_domain(),
            "https://us-east-1a_b.auth.us-east-1.amazoncognito.com"
        );
    }

    #[test]
    fn logout_url_encodes_redirect() {
        let config = config();
        let url = config.logout_url(&config.auth_settings());
        assert_eq!(
            url,
            "https://eu-west-1AbCdEf123.auth.eu-west-1.amazoncognito.com/logout\
             ?client_id=client-abc\
             &logout_uri=https%3A%2F%2Fapp.example%2Fsigned-out%3Ffrom%3Dapp"
        );
    }

    #[test]
    fn builder_style_setters() {
        let config = config()
            .with_scopes(&["openid", "email", "profile"])
            .with_ui_locale("en");
        assert_eq!(config.scopes(), vec!["openid", "email", "profile"]);
        assert_eq!(config.ui_locale(), "en");
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r#"{
            "region": "eu-west-1",
            "user_pool_id": "eu-west-1_Pool",
            "client_id": "my-client",
            "redirect_uri": "https://app.example/",
            "post_logout_redirect_uri": "https://app.example/"
        }"#;

        let config: CognitoConfig = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.client_id(), "my-client");
        assert_eq!(config.scopes(), vec!["openid", "email"]);
        assert_eq!(config.ui_locale(), "es");
    }

    #[test]
    fn scopes_parse_comma_separated_with_spaces() {
        let json = r#"{
            "region": "r",
            "user_pool_id": "r_p",
            "client_id": "c",
            "redirect_uri": "https://app.example/",
            "post_logout_redirect_uri": "https://app.example/",
            "scopes": "openid, email, , phone"
        }"#;

        let config: CognitoConfig = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.scopes(), vec!["openid", "email", "phone"]);
    }
}
