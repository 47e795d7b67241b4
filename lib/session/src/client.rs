//! The auth collaborator seam.
//!
//! The OIDC handshake itself lives behind [`AuthClient`]. The browser build
//! implements it on top of `localStorage` and the server's token exchange;
//! tests implement it with in-memory doubles.

use async_trait::async_trait;
use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Read-only settings the collaborator was configured with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSettings {
    client_id: String,
    post_logout_redirect_uri: String,
}

impl AuthSettings {
    #[must_use]
    pub fn new(client_id: String, post_logout_redirect_uri: String) -> Self {
        Self {
            client_id,
            post_logout_redirect_uri,
        }
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn post_logout_redirect_uri(&self) -> &str {
        &self.post_logout_redirect_uri
    }
}

/// External OIDC client consumed by the session gate.
///
/// The caller owns the [`Session`](crate::Session) and applies events as
/// these calls complete. Futures are not `Send`: browser promises live on the
/// UI thread.
#[async_trait(?Send)]
pub trait AuthClient {
    /// Returns the settings the client was configured with.
    fn settings(&self) -> &AuthSettings;

    /// Begins interactive sign-in. On success the browser is navigating away.
    async fn signin_redirect(&self) -> Result<(), Report<SessionError>>;

    /// Clears the locally stored user.
    async fn remove_user(&self) -> Result<(), Report<SessionError>>;
}
