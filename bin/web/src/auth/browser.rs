//! Browser side of the sign-in flow.
//!
//! All window access is gated behind `#[cfg(feature = "hydrate")]`. On the
//! server the same types exist but report that no browser is available, so
//! components compile for both renderers and only act after hydration.

use async_trait::async_trait;
use ezdoc_session::storage::{save_pending, user_key};
use ezdoc_session::{
    AuthClient, AuthResolutionError, AuthSettings, CognitoConfig, KeyValueStore, LocationPort,
    PendingSignin, Profile, SessionError, SessionEvent, SigninCompleter, resolve_session,
};
use leptos::server_fn::error::ServerFnError;
use rootcause::prelude::Report;

use super::{begin_signin, complete_signin};
use crate::util::now_secs;

#[cfg(feature = "hydrate")]
fn window(operation: &'static str) -> Result<web_sys::Window, Report<SessionError>> {
    web_sys::window().ok_or_else(|| unavailable(operation))
}

#[cfg(feature = "hydrate")]
fn js_error(operation: &'static str, err: wasm_bindgen::JsValue) -> Report<SessionError> {
    SessionError::Location {
        operation,
        reason: format!("{err:?}"),
    }
    .into()
}

fn unavailable(operation: &'static str) -> Report<SessionError> {
    SessionError::Location {
        operation,
        reason: "no browser window".to_string(),
    }
    .into()
}

/// The window's location and history.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserLocation;

impl LocationPort for BrowserLocation {
    fn href(&self) -> Result<String, Report<SessionError>> {
        #[cfg(feature = "hydrate")]
        {
            window("read location")?
                .location()
                .href()
                .map_err(|e| js_error("read location", e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(unavailable("read location"))
        }
    }

    fn replace_url(&mut self, url: &str) -> Result<(), Report<SessionError>> {
        #[cfg(feature = "hydrate")]
        {
            window("replace url")?
                .history()
                .and_then(|h| h.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url)))
                .map_err(|e| js_error("replace url", e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = url;
            Err(unavailable("replace url"))
        }
    }

    fn assign(&mut self, url: &str) -> Result<(), Report<SessionError>> {
        #[cfg(feature = "hydrate")]
        {
            window("navigate")?
                .location()
                .assign(url)
                .map_err(|e| js_error("navigate", e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = url;
            Err(unavailable("navigate"))
        }
    }

    fn reload(&mut self) -> Result<(), Report<SessionError>> {
        #[cfg(feature = "hydrate")]
        {
            window("reload")?
                .location()
                .reload()
                .map_err(|e| js_error("reload", e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(unavailable("reload"))
        }
    }

    fn back(&mut self) -> Result<(), Report<SessionError>> {
        #[cfg(feature = "hydrate")]
        {
            window("go back")?
                .history()
                .and_then(|h| h.back())
                .map_err(|e| js_error("go back", e))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(unavailable("go back"))
        }
    }
}

/// The window's `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, Report<SessionError>> {
    let storage_error = |reason: String| -> Report<SessionError> {
        SessionError::Storage { reason }.into()
    };
    web_sys::window()
        .ok_or_else(|| storage_error("no browser window".to_string()))?
        .local_storage()
        .map_err(|e| storage_error(format!("{e:?}")))?
        .ok_or_else(|| storage_error("localStorage is disabled".to_string()))
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Report<SessionError>> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).map_err(|e| {
                SessionError::Storage {
                    reason: format!("{e:?}"),
                }
                .into()
            })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Report<SessionError>> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.set_item(key, value).map_err(|e| {
                SessionError::Storage {
                    reason: format!("{e:?}"),
                }
                .into()
            })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(SessionError::Storage {
                reason: "no browser window".to_string(),
            }
            .into())
        }
    }

    fn remove(&self, key: &str) -> Result<(), Report<SessionError>> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.remove_item(key).map_err(|e| {
                SessionError::Storage {
                    reason: format!("{e:?}"),
                }
                .into()
            })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

/// The [`AuthClient`] the session gate drives in the browser.
///
/// Sign-in asks the server for an authorization request, keeps its secrets
/// in `localStorage` and navigates to the hosted UI. Sign-out forgets the
/// stored user.
#[derive(Debug, Clone)]
pub struct BrowserAuthClient {
    settings: AuthSettings,
    user_key: String,
}

impl BrowserAuthClient {
    pub fn new(config: &CognitoConfig) -> Self {
        Self {
            settings: config.auth_settings(),
            user_key: user_key(config),
        }
    }
}

#[async_trait(?Send)]
impl AuthClient for BrowserAuthClient {
    fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    async fn signin_redirect(&self) -> Result<(), Report<SessionError>> {
        let request = begin_signin()
            .await
            .map_err(|e| SessionError::SigninRedirect {
                reason: server_message(e),
            })?;

        save_pending(&BrowserStorage, &request.pending())?;
        BrowserLocation.assign(&request.authorization_url)
    }

    async fn remove_user(&self) -> Result<(), Report<SessionError>> {
        BrowserStorage.remove(&self.user_key).map_err(|report| {
            SessionError::RemoveUser {
                reason: report.current_context().to_string(),
            }
            .into()
        })
    }
}

/// Redeems authorization codes through the [`complete_signin`] server
/// function.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerCompleter;

#[async_trait(?Send)]
impl SigninCompleter for ServerCompleter {
    async fn complete_signin(
        &self,
        code: &str,
        pending: &PendingSignin,
    ) -> Result<Profile, Report<SessionError>> {
        let profile = complete_signin(
            code.to_string(),
            pending.pkce_verifier.clone(),
            pending.nonce.clone(),
        )
        .await
        .map_err(|e| SessionError::Resolution {
            reason: server_message(e),
        })?;
        Ok(profile)
    }
}

/// Resolves the session for the current page.
pub async fn resolve(config: &CognitoConfig) -> SessionEvent {
    let href = match BrowserLocation.href() {
        Ok(href) => href,
        Err(report) => {
            return SessionEvent::Failed(AuthResolutionError::from(report.current_context()));
        }
    };

    resolve_session(
        &href,
        &user_key(config),
        &BrowserStorage,
        &ServerCompleter,
        now_secs(),
    )
    .await
}

/// The message a server function failed with, without the transport prefix.
pub fn server_message(err: ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(message) => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CognitoConfig {
        CognitoConfig::new(
            "eu-west-1".to_string(),
            "eu-west-1_Pool42".to_string(),
            "client-xyz".to_string(),
            "https://app.example/".to_string(),
            "https://app.example/bye".to_string(),
        )
    }

    #[test]
    fn client_exposes_pool_settings() {
        let client = BrowserAuthClient::new(&config());
        assert_eq!(client.settings().client_id(), "client-xyz");
        assert_eq!(
            client.settings().post_logout_redirect_uri(),
            "https://app.example/bye"
        );
        assert!(client.user_key.ends_with(":client-xyz"));
    }

    #[test]
    fn server_errors_lose_the_transport_prefix() {
        let err = ServerFnError::new("The sign-in code could not be redeemed");
        assert_eq!(server_message(err), "The sign-in code could not be redeemed");
    }

    #[cfg(not(feature = "hydrate"))]
    #[test]
    fn location_is_unavailable_off_the_browser() {
        let mut location = BrowserLocation;
        assert!(location.href().is_err());
        assert!(location.reload().is_err());
        assert_eq!(BrowserStorage.get("oidc.user:x").expect("get"), None);
    }
}
