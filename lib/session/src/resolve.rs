//! Initial resolution of the session when the page loads.
//!
//! The page is either a fresh visit, a redirect back from the provider with
//! an authorization code, or a redirect back with an error. Resolution turns
//! that into the one event that moves the session out of `Loading`.

use async_trait::async_trait;
use rootcause::prelude::Report;
use url::Url;

use crate::error::{AuthResolutionError, SessionError};
use crate::session::SessionEvent;
use crate::status::Profile;
use crate::storage::{self, KeyValueStore, PendingSignin};

/// Parameters the provider put on the redirect back to the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    /// Not a redirect from the provider.
    None,
    /// The provider reported an error.
    Error { message: String },
    /// The provider issued an authorization code.
    Code { code: String, state: String },
}

/// Reads the callback parameters from a URL.
///
/// An `error` parameter wins over a code; its message is
/// `error_description` when present, otherwise the error code itself.
///
/// # Errors
///
/// Returns [`SessionError::InvalidUrl`] if `url` does not parse.
pub fn parse_callback(url: &str) -> Result<Callback, Report<SessionError>> {
    let parsed = Url::parse(url).map_err(|e| SessionError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let mut error = None;
    let mut description = None;
    let mut code = None;
    let mut state = None;
    for (key, value) in parsed.query_pairs() {
        let slot = match key.as_ref() {
            "error" => &mut error,
            "error_description" => &mut description,
            "code" => &mut code,
            "state" => &mut state,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    if let Some(error) = error {
        return Ok(Callback::Error {
            message: description.filter(|d| !d.is_empty()).unwrap_or(error),
        });
    }
    match (code, state) {
        (Some(code), Some(state)) => Ok(Callback::Code { code, state }),
        _ => Ok(Callback::None),
    }
}

/// Exchanges an authorization code for the signed-in user.
#[async_trait(?Send)]
pub trait SigninCompleter {
    async fn complete_signin(
        &self,
        code: &str,
        pending: &PendingSignin,
    ) -> Result<Profile, Report<SessionError>>;
}

/// Resolves the session for the page at `href`.
///
/// `user_key` is where the signed-in user is stored and `now` is the current
/// time in epoch seconds.
pub async fn resolve_session<C>(
    href: &str,
    user_key: &str,
    store: &dyn KeyValueStore,
    completer: &C,
    now: i64,
) -> SessionEvent
where
    C: SigninCompleter + ?Sized,
{
    match try_resolve(href, user_key, store, completer, now).await {
        Ok(event) => event,
        Err(report) => {
            tracing::warn!(error = %report, "session resolution failed");
            SessionEvent::Failed(AuthResolutionError::from(report.current_context()))
        }
    }
}

async fn try_resolve<C>(
    href: &str,
    user_key: &str,
    store: &dyn KeyValueStore,
    completer: &C,
    now: i64,
) -> Result<SessionEvent, Report<SessionError>>
where
    C: SigninCompleter + ?Sized,
{
    match parse_callback(href)? {
        Callback::Error { message } => Err(SessionError::Resolution { reason: message }.into()),
        Callback::Code { code, state } => {
            let pending = storage::take_pending(store, &state)?.ok_or_else(|| {
                SessionError::Resolution {
                    reason: "No matching state found in storage".to_string(),
                }
            })?;

            let profile = completer.complete_signin(&code, &pending).await?;
            if let Err(report) = storage::save_user(store, user_key, &profile) {
                tracing::warn!(error = %report, "signed in but could not store the user");
            }
            Ok(SessionEvent::Resolved(profile))
        }
        Callback::None => Ok(match storage::load_user(store, user_key, now)? {
            Some(profile) => SessionEvent::Resolved(profile),
            None => SessionEvent::ResolvedAnonymous,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const KEY: &str = "oidc.user:issuer:client";

    #[derive(Default)]
    struct FakeCompleter {
        fail_with: Option<&'static str>,
        seen: RefCell<Vec<(String, PendingSignin)>>,
    }

    #[async_trait(?Send)]
    impl SigninCompleter for FakeCompleter {
        async fn complete_signin(
            &self,
            code: &str,
            pending: &PendingSignin,
        ) -> Result<Profile, Report<SessionError>> {
            self.seen
                .borrow_mut()
                .push((code.to_string(), pending.clone()));
            match self.fail_with {
                Some(reason) => Err(SessionError::Resolution {
                    reason: reason.to_string(),
                }
                .into()),
                None => Ok(Profile::new("sub-1", "access")),
            }
        }
    }

    fn pending(state: &str) -> PendingSignin {
        PendingSignin {
            state: state.to_string(),
            pkce_verifier: "verifier".to_string(),
            nonce: "nonce".to_string(),
        }
    }

    fn failure(event: &SessionEvent) -> &str {
        match event {
            SessionEvent::Failed(err) => err.message(),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn parses_each_callback_shape() {
        assert_eq!(
            parse_callback("https://app.example/").expect("parse"),
            Callback::None
        );
        assert_eq!(
            parse_callback("https://app.example/?code=c&state=s").expect("parse"),
            Callback::Code {
                code: "c".to_string(),
                state: "s".to_string()
            }
        );
        assert_eq!(
            parse_callback("https://app.example/?code=c").expect("parse"),
            Callback::None
        );
        assert_eq!(
            parse_callback("https://app.example/?error=access_denied&error_description=User%20cancelled&state=s")
                .expect("parse"),
            Callback::Error {
                message: "User cancelled".to_string()
            }
        );
        assert_eq!(
            parse_callback("https://app.example/?error=access_denied").expect("parse"),
            Callback::Error {
                message: "access_denied".to_string()
            }
        );
    }

    #[tokio::test]
    async fn fresh_visit_without_user_is_anonymous() {
        let store = storage::MemoryStore::new();
        let event =
            resolve_session("https://app.example/", KEY, &store, &FakeCompleter::default(), 0)
                .await;
        assert_eq!(event, SessionEvent::ResolvedAnonymous);
    }

    #[tokio::test]
    async fn fresh_visit_restores_stored_user() {
        let store = storage::MemoryStore::new();
        let profile = Profile::new("sub-9", "tok");
        storage::save_user(&store, KEY, &profile).expect("save");

        let event =
            resolve_session("https://app.example/", KEY, &store, &FakeCompleter::default(), 0)
                .await;
        assert_eq!(event, SessionEvent::Resolved(profile));
    }

    #[tokio::test]
    async fn callback_exchanges_code_and_stores_user() {
        let store = storage::MemoryStore::new();
        storage::save_pending(&store, &pending("s1")).expect("save");
        let completer = FakeCompleter::default();

        let event = resolve_session(
            "https://app.example/?code=abc&state=s1",
            KEY,
            &store,
            &completer,
            0,
        )
        .await;

        assert_eq!(event, SessionEvent::Resolved(Profile::new("sub-1", "access")));
        assert_eq!(
            completer.seen.borrow().as_slice(),
            [("abc".to_string(), pending("s1"))]
        );
        assert!(store.get(KEY).expect("get").is_some());
        assert!(store.get("oidc.s1").expect("get").is_none());
    }

    #[tokio::test]
    async fn callback_with_unknown_state_fails() {
        let store = storage::MemoryStore::new();
        let completer = FakeCompleter::default();

        let event = resolve_session(
            "https://app.example/?code=abc&state=nope",
            KEY,
            &store,
            &completer,
            0,
        )
        .await;

        assert_eq!(failure(&event), "No matching state found in storage");
        assert!(completer.seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn rejected_exchange_surfaces_its_message() {
        let store = storage::MemoryStore::new();
        storage::save_pending(&store, &pending("s1")).expect("save");
        let completer = FakeCompleter {
            fail_with: Some("invalid_grant"),
            ..FakeCompleter::default()
        };

        let event = resolve_session(
            "https://app.example/?code=abc&state=s1",
            KEY,
            &store,
            &completer,
            0,
        )
        .await;

        assert_eq!(failure(&event), "invalid_grant");
        assert!(store.get(KEY).expect("get").is_none());
    }

    #[tokio::test]
    async fn provider_error_fails_without_exchange() {
        let store = storage::MemoryStore::new();
        let completer = FakeCompleter::default();

        let event = resolve_session(
            "https://app.example/?error=server_error&error_description=network%20down",
            KEY,
            &store,
            &completer,
            0,
        )
        .await;

        assert_eq!(failure(&event), "network down");
        assert!(completer.seen.borrow().is_empty());
    }
}
