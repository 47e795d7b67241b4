//! Authentication for the EzDoc web shell.
//!
//! This module provides:
//! - Server functions that start and complete an OIDC sign-in against the
//!   Cognito user pool
//! - The browser side of the flow: `localStorage`, the window location and
//!   the [`AuthClient`](ezdoc_session::AuthClient) the session gate drives
//!
//! The server stores nothing. PKCE and nonce secrets travel back to the
//! browser and are kept there until the provider redirects back.

pub mod browser;
#[cfg(feature = "ssr")]
pub mod oidc;

use ezdoc_session::{CognitoConfig, PendingSignin, Profile};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

/// Everything the browser needs to leave for the hosted UI and come back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigninRequest {
    pub authorization_url: String,
    pub state: String,
    pub pkce_verifier: String,
    pub nonce: String,
}

impl SigninRequest {
    /// The part of the request kept in storage until the callback.
    pub fn pending(&self) -> PendingSignin {
        PendingSignin {
            state: self.state.clone(),
            pkce_verifier: self.pkce_verifier.clone(),
            nonce: self.nonce.clone(),
        }
    }
}

/// Server function returning the public Cognito settings.
#[server]
pub async fn get_auth_config() -> Result<CognitoConfig, ServerFnError> {
    use axum::Extension;

    let Extension(config): Extension<CognitoConfig> = leptos_axum::extract().await?;
    Ok(config)
}

/// Server function building a fresh authorization request.
#[server]
pub async fn begin_signin() -> Result<SigninRequest, ServerFnError> {
    use crate::auth::oidc::OidcClient;
    use crate::error::AuthFlowError;
    use axum::Extension;
    use std::sync::Arc;

    let Extension(oidc): Extension<Arc<OidcClient>> = leptos_axum::extract()
        .await
        .map_err(|_| AuthFlowError::NotConfigured.into_server_error())?;

    let request = oidc.authorization_request();
    tracing::debug!(client_id = oidc.config().client_id(), "issued authorization request");
    Ok(request)
}

/// Server function redeeming an authorization code for the user's profile.
#[server]
pub async fn complete_signin(
    code: String,
    pkce_verifier: String,
    nonce: String,
) -> Result<Profile, ServerFnError> {
    use crate::auth::oidc::OidcClient;
    use crate::error::AuthFlowError;
    use axum::Extension;
    use std::sync::Arc;

    let Extension(oidc): Extension<Arc<OidcClient>> = leptos_axum::extract()
        .await
        .map_err(|_| AuthFlowError::NotConfigured.into_server_error())?;

    match oidc.exchange_code(&code, &pkce_verifier, &nonce).await {
        Ok(profile) => {
            tracing::info!(subject = %profile.subject, "sign-in completed");
            Ok(profile)
        }
        Err(e) => {
            tracing::warn!(error = %e, "sign-in could not be completed");
            Err(AuthFlowError::from(e).into_server_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_keeps_the_secrets_but_not_the_url() {
        let request = SigninRequest {
            authorization_url: "https://pool.auth.eu-west-1.amazoncognito.com/oauth2/authorize"
                .to_string(),
            state: "st".to_string(),
            pkce_verifier: "verifier".to_string(),
            nonce: "n".to_string(),
        };

        assert_eq!(
            request.pending(),
            PendingSignin {
                state: "st".to_string(),
                pkce_verifier: "verifier".to_string(),
                nonce: "n".to_string(),
            }
        );
    }
}
