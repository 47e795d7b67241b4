//! Persisted sign-in state.
//!
//! The signed-in user lives under `oidc.user:{authority}:{client_id}` and a
//! sign-in in flight lives under `oidc.{state}` until the provider redirects
//! back. Values are JSON.

use std::cell::RefCell;
use std::collections::BTreeMap;

use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};

use crate::cognito::CognitoConfig;
use crate::error::SessionError;
use crate::status::Profile;

/// String key/value storage, e.g. the browser's `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Report<SessionError>>;
    fn set(&self, key: &str, value: &str) -> Result<(), Report<SessionError>>;
    fn remove(&self, key: &str) -> Result<(), Report<SessionError>>;
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Report<SessionError>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Report<SessionError>> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Report<SessionError>> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Secrets of a sign-in that has left for the provider and not yet returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSignin {
    pub state: String,
    pub pkce_verifier: String,
    pub nonce: String,
}

/// Storage key of the signed-in user for this pool and client.
#[must_use]
pub fn user_key(cognito: &CognitoConfig) -> String {
    format!("oidc.user:{}:{}", cognito.authority(), cognito.client_id())
}

/// Storage key of a pending sign-in.
#[must_use]
pub fn pending_key(state: &str) -> String {
    format!("oidc.{state}")
}

/// Loads the stored user if there is one and it has not expired at `now`
/// (epoch seconds). Expired or unreadable entries are removed.
///
/// # Errors
///
/// Returns an error if the store itself fails.
pub fn load_user(
    store: &dyn KeyValueStore,
    key: &str,
    now: i64,
) -> Result<Option<Profile>, Report<SessionError>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str::<Profile>(&raw) {
        Ok(profile) if !profile.is_expired_at(now) => Ok(Some(profile)),
        Ok(_) => {
            tracing::debug!(key, "discarding expired stored user");
            store.remove(key)?;
            Ok(None)
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable stored user");
            store.remove(key)?;
            Ok(None)
        }
    }
}

/// Stores the signed-in user.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn save_user(
    store: &dyn KeyValueStore,
    key: &str,
    profile: &Profile,
) -> Result<(), Report<SessionError>> {
    let json = serde_json::to_string(profile).map_err(|e| SessionError::Storage {
        reason: e.to_string(),
    })?;
    store.set(key, &json)
}

/// Records a sign-in that is about to leave for the provider.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn save_pending(
    store: &dyn KeyValueStore,
    pending: &PendingSignin,
) -> Result<(), Report<SessionError>> {
    let json = serde_json::to_string(pending).map_err(|e| SessionError::Storage {
        reason: e.to_string(),
    })?;
    store.set(&pending_key(&pending.state), &json)
}

/// Removes and returns the pending sign-in for `state`. A pending entry is
/// consumed even if it cannot be read.
///
/// # Errors
///
/// Returns an error if the store fails or the entry is not valid JSON.
pub fn take_pending(
    store: &dyn KeyValueStore,
    state: &str,
) -> Result<Option<PendingSignin>, Report<SessionError>> {
    let key = pending_key(state);
    let Some(raw) = store.get(&key)? else {
        return Ok(None);
    };
    store.remove(&key)?;

    let pending = serde_json::from_str(&raw).map_err(|e| SessionError::Storage {
        reason: format!("unreadable pending sign-in: {e}"),
    })?;
    Ok(Some(pending))
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
            "https://app.example/".to_string(),
        )
    }

    #[test]
    fn keys_follow_the_oidc_layout() {
        assert_eq!(
            user_key(&config()),
            "oidc.user:https://cognito-idp.eu-west-1.amazonaws.com/eu-west-1_Pool42:client-xyz"
        );
        assert_eq!(pending_key("abc"), "oidc.abc");
    }

    #[test]
    fn user_round_trips_until_expiry() {
        let store = MemoryStore::new();
        let key = user_key(&config());
        let mut profile = Profile::new("sub", "token");
        profile.expires_at = Some(1_000);

        save_user(&store, &key, &profile).expect("save");
        assert_eq!(load_user(&store, &key, 999).expect("load"), Some(profile));

        assert_eq!(load_user(&store, &key, 1_000).expect("load"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn missing_or_garbled_user_loads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(load_user(&store, "k", 0).expect("load"), None);

        store.set("k", "{not json").expect("set");
        assert_eq!(load_user(&store, "k", 0).expect("load"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn pending_signin_is_consumed_once() {
        let store = MemoryStore::new();
        let pending = PendingSignin {
            state: "st".to_string(),
            pkce_verifier: "verifier".to_string(),
            nonce: "n".to_string(),
        };

        save_pending(&store, &pending).expect("save");
        assert!(store.get("oidc.st").expect("get").is_some());

        assert_eq!(take_pending(&store, "st").expect("take"), Some(pending));
        assert_eq!(take_pending(&store, "st").expect("take"), None);
    }

    #[test]
    fn garbled_pending_is_removed_and_reported() {
        let store = MemoryStore::new();
        store.set("oidc.st", "garbage").expect("set");

        assert!(take_pending(&store, "st").is_err());
        assert!(store.is_empty());
    }
}
