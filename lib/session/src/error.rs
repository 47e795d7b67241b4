//! Error types for the session crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `AuthResolutionError`: the one failure the session gate renders
//! - `SessionError`: failures of session operations (collaborator calls,
//!   location access, illegal transitions, configuration)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure reported when the sign-in or token-resolution flow fails.
///
/// The message is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResolutionError {
    message: String,
}

impl AuthResolutionError {
    /// Creates a resolution error carrying a user-visible message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the user-visible message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AuthResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AuthResolutionError {}

impl From<&SessionError> for AuthResolutionError {
    fn from(err: &SessionError) -> Self {
        Self::new(err.to_string())
    }
}

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Starting the sign-in redirect failed.
    SigninRedirect { reason: String },
    /// Clearing the local user failed.
    RemoveUser { reason: String },
    /// Resolving the session failed.
    Resolution { reason: String },
    /// The browser location could not be read or written.
    Location { operation: &'static str, reason: String },
    /// A URL could not be parsed.
    InvalidUrl { url: String, reason: String },
    /// The collaborator's storage could not be read or written.
    Storage { reason: String },
    /// Identity provider configuration is unusable.
    Configuration { reason: String },
    /// An event was applied in a state that does not accept it.
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SigninRedirect { reason } => {
                write!(f, "sign-in redirect failed: {reason}")
            }
            Self::RemoveUser { reason } => {
                write!(f, "sign-out failed: {reason}")
            }
            Self::Resolution { reason } => f.write_str(reason),
            Self::Location { operation, reason } => {
                write!(f, "browser location {operation} failed: {reason}")
            }
            Self::InvalidUrl { url, reason } => {
                write!(f, "invalid URL '{url}': {reason}")
            }
            Self::Storage { reason } => {
                write!(f, "session storage error: {reason}")
            }
            Self::Configuration { reason } => {
                write!(f, "identity provider configuration error: {reason}")
            }
            Self::InvalidTransition { from, event } => {
                write!(f, "session cannot handle '{event}' while {from}")
            }
        }
    }
}

impl std::error::Error for SessionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_error_displays_message_verbatim() {
        let err = AuthResolutionError::new("network down");
        assert_eq!(err.to_string(), "network down");
        assert_eq!(err.message(), "network down");
    }

    #[test]
    fn resolution_failures_keep_the_collaborator_wording() {
        let err = SessionError::Resolution {
            reason: "No matching state found in storage".to_string(),
        };
        assert_eq!(
            AuthResolutionError::from(&err).message(),
            "No matching state found in storage"
        );
    }

    #[test]
    fn signin_redirect_error_display() {
        let err = SessionError::SigninRedirect {
            reason: "fetch failed".to_string(),
        };
        assert!(err.to_string().contains("sign-in redirect failed"));
        assert!(err.to_string().contains("fetch failed"));
    }

    #[test]
    fn invalid_transition_display_names_both_sides() {
        let err = SessionError::InvalidTransition {
            from: "loading",
            event: "signed-out",
        };
        assert_eq!(
            err.to_string(),
            "session cannot handle 'signed-out' while loading"
        );
    }
}
