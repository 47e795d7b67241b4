//! Error types for the server functions behind sign-in.

use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Failures while starting or completing an OIDC sign-in.
#[derive(Debug)]
pub enum AuthFlowError {
    /// The server was started without an OIDC client.
    NotConfigured,
    /// The token endpoint rejected the authorization code.
    CodeExchange { details: String },
    /// The ID token failed validation.
    InvalidIdToken { details: String },
}

impl fmt::Display for AuthFlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "OIDC client is not configured"),
            Self::CodeExchange { details } => {
                write!(f, "authorization code exchange failed: {}", details)
            }
            Self::InvalidIdToken { details } => write!(f, "invalid ID token: {}", details),
        }
    }
}

impl std::error::Error for AuthFlowError {}

impl AuthFlowError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            AuthFlowError::NotConfigured => ServerFnError::new("Sign-in is not available"),
            AuthFlowError::CodeExchange { .. } => {
                ServerFnError::new("The sign-in code could not be redeemed")
            }
            AuthFlowError::InvalidIdToken { .. } => {
                ServerFnError::new("The identity token could not be verified")
            }
        }
    }
}
