//! The session gate: what to render for each status, and the actions the
//! rendered views can take.

use rootcause::prelude::Report;

use crate::client::AuthClient;
use crate::cognito::CognitoConfig;
use crate::error::SessionError;
use crate::location::LocationPort;
use crate::session::{Session, SessionEvent};
use crate::status::{Profile, SessionStatus};

/// The single outcome the gate renders for a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateView {
    /// Neutral loading placeholder.
    Placeholder,
    /// Error message with a reload control.
    Error { message: String },
    /// Sign-in affordance.
    SignIn,
    /// The application content, for this user.
    Content(Profile),
}

impl GateView {
    /// Maps a status to its view. Pure; performs no side effects.
    #[must_use]
    pub fn for_status(status: &SessionStatus) -> Self {
        match status {
            SessionStatus::Loading => Self::Placeholder,
            SessionStatus::Error(err) => Self::Error {
                message: err.message().to_string(),
            },
            SessionStatus::Unauthenticated => Self::SignIn,
            SessionStatus::Authenticated(profile) => Self::Content(profile.clone()),
        }
    }
}

/// Starts interactive sign-in.
///
/// # Errors
///
/// Returns the collaborator's rejection so the caller can surface it as
/// [`SessionEvent::ActionFailed`].
pub async fn sign_in<C>(client: &C) -> Result<(), Report<SessionError>>
where
    C: AuthClient + ?Sized,
{
    tracing::info!(client_id = client.settings().client_id(), "starting sign-in redirect");
    client.signin_redirect().await
}

/// Signs out: removes the local user, then navigates to the hosted UI logout
/// endpoint. Returns the logout URL that was navigated to.
///
/// # Errors
///
/// If `remove_user` is rejected no navigation happens and the error is
/// returned. Navigation failures are returned as well.
pub async fn sign_out<C>(
    client: &C,
    location: &mut dyn LocationPort,
    cognito: &CognitoConfig,
) -> Result<String, Report<SessionError>>
where
    C: AuthClient + ?Sized,
{
    client.remove_user().await?;

    let logout_url = cognito.logout_url(client.settings());
    tracing::info!(url = %logout_url, "navigating to identity provider logout");
    location.assign(&logout_url)?;
    Ok(logout_url)
}

/// Recovers from an error by reloading the whole page.
///
/// # Errors
///
/// Returns an error if the reload could not be started; the session is then
/// left unchanged.
pub fn retry(
    session: &mut Session,
    location: &mut dyn LocationPort,
) -> Result<(), Report<SessionError>> {
    location.reload()?;
    session.apply(SessionEvent::Reloaded)?;
    Ok(())
}
