//! Authentication status and profile claims.

use serde::{Deserialize, Serialize};

use crate::error::AuthResolutionError;

/// Identity claims and tokens of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// The `sub` claim.
    pub subject: String,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub preferred_username: Option<String>,
    /// The `name` claim.
    #[serde(default)]
    pub name: Option<String>,
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Access token expiry as seconds since the Unix epoch.
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl Profile {
    /// Creates a profile with only the mandatory fields set.
    #[must_use]
    pub fn new(subject: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            email: None,
            email_verified: None,
            preferred_username: None,
            name: None,
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
        }
    }

    /// Name shown on the dashboard card: preferred username, then email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.preferred_username
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.email.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("User")
    }

    /// Name shown in the top bar: the name claim, then the email's local part.
    #[must_use]
    pub fn short_name(&self) -> &str {
        if let Some(name) = self.name.as_deref().filter(|s| !s.is_empty()) {
            return name;
        }
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|local| !local.is_empty())
            .unwrap_or("User")
    }

    /// Returns true if the access token expired at or before `now` (epoch seconds).
    ///
    /// Profiles without an expiry never expire.
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// Authentication status as reported by the auth collaborator.
///
/// Exactly one variant holds at any instant, and a profile exists only
/// while authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SessionStatus {
    /// The collaborator has not resolved yet.
    #[default]
    Loading,
    /// Resolution failed; terminal until the page reloads.
    Error(AuthResolutionError),
    /// No signed-in user.
    Unauthenticated,
    /// A user is signed in.
    Authenticated(Profile),
}

impl SessionStatus {
    /// Short name of the variant, used in logs and transition errors.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Error(_) => "error",
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticated(_) => "authenticated",
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the profile while authenticated.
    #[must_use]
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::Authenticated(profile) => Some(profile),
            _ => None,
        }
    }
}
