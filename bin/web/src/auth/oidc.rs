//! OIDC client for the Cognito user pool, using the openidconnect crate.

use chrono::Utc;
use ezdoc_session::{CognitoConfig, Profile};
use openidconnect::core::{CoreAuthenticationFlow, CoreClient, CoreProviderMetadata};
use openidconnect::{
    AuthorizationCode, ClientId, ClientSecret, CsrfToken, IssuerUrl, Nonce, OAuth2TokenResponse,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse,
};

use super::SigninRequest;

/// OIDC client for authenticating users against the user pool.
pub struct OidcClient {
    provider_metadata: CoreProviderMetadata,
    client_id: ClientId,
    client_secret: Option<ClientSecret>,
    redirect_url: RedirectUrl,
    http_client: reqwest::Client,
    config: CognitoConfig,
}

impl OidcClient {
    /// Creates a new OIDC client by discovering the pool's provider metadata.
    pub async fn discover(
        config: CognitoConfig,
        client_secret: Option<String>,
    ) -> Result<Self, OidcError> {
        let issuer_url = IssuerUrl::new(config.authority())
            .map_err(|e| OidcError::Configuration(format!("invalid issuer URL: {}", e)))?;

        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| {
                OidcError::Configuration(format!("failed to create HTTP client: {}", e))
            })?;

        let provider_metadata = CoreProviderMetadata::discover_async(issuer_url, &http_client)
            .await
            .map_err(|e| OidcError::Discovery(format!("failed to discover provider: {}", e)))?;

        let redirect_url = RedirectUrl::new(config.redirect_uri().to_string())
            .map_err(|e| OidcError::Configuration(format!("invalid redirect URI: {}", e)))?;

        Ok(Self {
            provider_metadata,
            client_id: ClientId::new(config.client_id().to_string()),
            client_secret: client_secret.map(ClientSecret::new),
            redirect_url,
            http_client,
            config,
        })
    }

    /// Returns the public configuration.
    pub fn config(&self) -> &CognitoConfig {
        &self.config
    }

    /// Builds the hosted UI authorization URL with PKCE, nonce and CSRF
    /// state. The secrets are returned to the browser, which keeps them until
    /// the provider redirects back.
    pub fn authorization_request(&self) -> SigninRequest {
        let client = CoreClient::from_provider_metadata(
            self.provider_metadata.clone(),
            self.client_id.clone(),
            self.client_secret.clone(),
        )
        .set_redirect_uri(self.redirect_url.clone());

        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let mut auth_request = client
            .authorize_url(
                CoreAuthenticationFlow::AuthorizationCode,
                CsrfToken::new_random,
                Nonce::new_random,
            )
            .set_pkce_challenge(pkce_challenge)
            .add_extra_param("lang", self.config.ui_locale().to_string());

        for scope in self.config.scopes() {
            // "openid" is always requested by the authentication flow.
            if scope != "openid" {
                auth_request = auth_request.add_scope(Scope::new(scope.to_string()));
            }
        }

        let (auth_url, csrf_token, nonce) = auth_request.url();

        SigninRequest {
            authorization_url: auth_url.to_string(),
            state: csrf_token.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
            nonce: nonce.secret().clone(),
        }
    }

    /// Exchanges the authorization code for tokens and builds the profile
    /// from the verified ID token claims.
    pub async fn exchange_code(
        &self,
        code: &str,
        pkce_verifier: &str,
        nonce: &str,
    ) -> Result<Profile, OidcError> {
        let client = CoreClient::from_provider_metadata(
            self.provider_metadata.clone(),
            self.client_id.clone(),
            self.client_secret.clone(),
        )
        .set_redirect_uri(self.redirect_url.clone());

        let token_response = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .map_err(|e| OidcError::TokenExchange(format!("token endpoint error: {}", e)))?
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&self.http_client)
            .await
            .map_err(|e| OidcError::TokenExchange(format!("token exchange failed: {}", e)))?;

        let id_token = token_response
            .id_token()
            .ok_or_else(|| OidcError::TokenValidation("no ID token in response".to_string()))?;

        let nonce = Nonce::new(nonce.to_string());
        let claims = id_token
            .claims(&client.id_token_verifier(), &nonce)
            .map_err(|e| {
                OidcError::TokenValidation(format!("ID token validation failed: {}", e))
            })?;

        let expires_at = token_response
            .expires_in()
            .and_then(|ttl| i64::try_from(ttl.as_secs()).ok())
            .map(|secs| Utc::now().timestamp() + secs);

        Ok(Profile {
            subject: claims.subject().to_string(),
            email: claims.email().map(|e| e.as_str().to_string()),
            email_verified: claims.email_verified(),
            preferred_username: claims.preferred_username().map(|u| u.as_str().to_string()),
            name: claims
                .name()
                .and_then(|n| n.get(None))
                .map(|n| n.as_str().to_string()),
            access_token: token_response.access_token().secret().clone(),
            refresh_token: token_response.refresh_token().map(|t| t.secret().clone()),
            expires_at,
        })
    }
}

/// OIDC-related errors.
#[derive(Debug)]
pub enum OidcError {
    /// Configuration error (invalid URLs, etc.)
    Configuration(String),
    /// Failed to discover provider metadata.
    Discovery(String),
    /// Token exchange failed.
    TokenExchange(String),
    /// Token validation failed.
    TokenValidation(String),
}

impl std::fmt::Display for OidcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "OIDC configuration error: {}", msg),
            Self::Discovery(msg) => write!(f, "OIDC discovery error: {}", msg),
            Self::TokenExchange(msg) => write!(f, "OIDC token exchange error: {}", msg),
            Self::TokenValidation(msg) => write!(f, "OIDC token validation error: {}", msg),
        }
    }
}

impl std::error::Error for OidcError {}

impl From<OidcError> for crate::error::AuthFlowError {
    fn from(err: OidcError) -> Self {
        match err {
            OidcError::TokenValidation(details) => Self::InvalidIdToken { details },
            other => Self::CodeExchange {
                details: other.to_string(),
            },
        }
    }
}
