//! Session lifecycle state machine.
//!
//! The auth collaborator owns a [`Session`] and drives it with
//! [`SessionEvent`]s as sign-in resolves, fails or is undone. Consumers only
//! read [`Session::status`].
//!
//! ```text
//! Loading --Resolved--> Authenticated --SignedOut--> Unauthenticated
//! Loading --ResolvedAnonymous--> Unauthenticated
//! Loading --Failed--> Error
//! Authenticated | Unauthenticated --ActionFailed--> Error
//! * --Reloaded--> Loading
//! ```

use rootcause::prelude::Report;

use crate::error::{AuthResolutionError, SessionError};
use crate::status::{Profile, SessionStatus};

/// Something that happened to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The collaborator found a signed-in user.
    Resolved(Profile),
    /// The collaborator finished resolving and found nobody signed in.
    ResolvedAnonymous,
    /// Sign-in or token resolution failed.
    Failed(AuthResolutionError),
    /// The local user was removed.
    SignedOut,
    /// `signinRedirect()` or `removeUser()` was rejected.
    ActionFailed(AuthResolutionError),
    /// The page reloaded, discarding all in-memory state.
    Reloaded,
}

impl SessionEvent {
    fn label(&self) -> &'static str {
        match self {
            Self::Resolved(_) => "resolved",
            Self::ResolvedAnonymous => "resolved-anonymous",
            Self::Failed(_) => "failed",
            Self::SignedOut => "signed-out",
            Self::ActionFailed(_) => "action-failed",
            Self::Reloaded => "reloaded",
        }
    }
}

/// The collaborator's view of authentication for one page life.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    status: SessionStatus,
    /// Number of transitions into `Authenticated`.
    entries: u64,
}

impl Session {
    /// Creates a session in `Loading`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Returns how many times the session has entered `Authenticated`.
    #[must_use]
    pub fn authenticated_entries(&self) -> u64 {
        self.entries
    }

    /// Applies an event, returning the new status.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidTransition`] when the current status
    /// does not accept the event; the session is left unchanged.
    pub fn apply(&mut self, event: SessionEvent) -> Result<&SessionStatus, Report<SessionError>> {
        let from = self.status.label();
        let was_authenticated = self.status.is_authenticated();

        let next = match (&self.status, event) {
            (_, SessionEvent::Reloaded) => SessionStatus::Loading,
            (SessionStatus::Loading | SessionStatus::Authenticated(_), SessionEvent::Resolved(profile)) => {
                SessionStatus::Authenticated(profile)
            }
            (SessionStatus::Loading, SessionEvent::ResolvedAnonymous) => {
                SessionStatus::Unauthenticated
            }
            (SessionStatus::Loading, SessionEvent::Failed(err)) => SessionStatus::Error(err),
            (SessionStatus::Authenticated(_), SessionEvent::SignedOut) => {
                SessionStatus::Unauthenticated
            }
            (
                SessionStatus::Authenticated(_) | SessionStatus::Unauthenticated,
                SessionEvent::ActionFailed(err),
            ) => SessionStatus::Error(err),
            (_, event) => {
                return Err(SessionError::InvalidTransition {
                    from,
                    event: event.label(),
                }
                .into());
            }
        };

        if next.is_authenticated() && !was_authenticated {
            self.entries += 1;
        }
        tracing::debug!(from, to = next.label(), "session transition");
        self.status = next;
        Ok(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile::new("sub-1", "access-1")
    }

    #[test]
    fn new_session_is_loading() {
        let session = Session::new();
        assert_eq!(session.status(), &SessionStatus::Loading);
        assert_eq!(session.authenticated_entries(), 0);
    }

    #[test]
    fn loading_resolves_to_each_outcome() {
        let mut s = Session::new();
        s.apply(SessionEvent::Resolved(profile())).expect("resolve");
        assert!(s.status().is_authenticated());

        let mut s = Session::new();
        s.apply(SessionEvent::ResolvedAnonymous).expect("anonymous");
        assert_eq!(s.status(), &SessionStatus::Unauthenticated);

        let mut s = Session::new();
        s.apply(SessionEvent::Failed(AuthResolutionError::new("network down")))
            .expect("fail");
        assert_eq!(
            s.status(),
            &SessionStatus::Error(AuthResolutionError::new("network down"))
        );
    }

    #[test]
    fn sign_out_returns_to_unauthenticated() {
        let mut s = Session::new();
        s.apply(SessionEvent::Resolved(profile())).expect("resolve");
        s.apply(SessionEvent::SignedOut).expect("sign out");
        assert_eq!(s.status(), &SessionStatus::Unauthenticated);
        assert!(s.status().profile().is_none());
    }

    #[test]
    fn error_is_terminal_until_reload() {
        let mut s = Session::new();
        s.apply(SessionEvent::Failed(AuthResolutionError::new("boom")))
            .expect("fail");

        assert!(s.apply(SessionEvent::Resolved(profile())).is_err());
        assert!(s.apply(SessionEvent::ResolvedAnonymous).is_err());
        assert!(s.apply(SessionEvent::SignedOut).is_err());
        assert_eq!(s.status().label(), "error");

        s.apply(SessionEvent::Reloaded).expect("reload");
        assert_eq!(s.status(), &SessionStatus::Loading);
    }

    #[test]
    fn rejected_actions_surface_as_errors() {
        let mut s = Session::new();
        s.apply(SessionEvent::ResolvedAnonymous).expect("anonymous");
        s.apply(SessionEvent::ActionFailed(AuthResolutionError::new(
            "sign-in redirect failed: offline",
        )))
        .expect("action failed");
        assert_eq!(s.status().label(), "error");
    }

    #[test]
    fn invalid_transition_leaves_session_untouched() {
        let mut s = Session::new();
        let result = s.apply(SessionEvent::SignedOut);
        assert!(result.is_err());
        assert_eq!(s.status(), &SessionStatus::Loading);
    }

    #[test]
    fn refreshing_profile_is_not_a_new_entry() {
        let mut s = Session::new();
        s.apply(SessionEvent::Resolved(profile())).expect("resolve");

        let mut renewed = profile();
        renewed.access_token = "access-2".to_string();
        s.apply(SessionEvent::Resolved(renewed)).expect("renew");

        assert_eq!(s.authenticated_entries(), 1);
        assert_eq!(
            s.status().profile().map(|p| p.access_token.as_str()),
            Some("access-2")
        );
    }

    #[test]
    fn each_reentry_is_counted() {
        let mut s = Session::new();
        s.apply(SessionEvent::Resolved(profile())).expect("resolve");
        s.apply(SessionEvent::Reloaded).expect("reload");
        s.apply(SessionEvent::Resolved(profile())).expect("resolve again");
        assert_eq!(s.authenticated_entries(), 2);
    }
}
