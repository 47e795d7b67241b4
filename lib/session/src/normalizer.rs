//! Post-sign-in URL cleanup.
//!
//! The provider redirects back with `?code=...&state=...`. Once the session
//! becomes authenticated those parameters are stripped from the visible URL
//! by replacing the current history entry, so reloading or navigating back
//! never replays a consumed authorization code.

use rootcause::prelude::Report;
use url::Url;

use crate::error::SessionError;
use crate::location::LocationPort;
use crate::status::SessionStatus;

/// Query parameters left behind by the authorization-code redirect.
pub const CALLBACK_PARAMS: [&str; 2] = ["code", "state"];

/// Returns `url` without callback parameters, or `None` if it has none.
///
/// Other query pairs keep their original encoding and order; the path and
/// fragment are untouched. A query left empty is removed entirely.
///
/// # Errors
///
/// Returns [`SessionError::InvalidUrl`] if `url` does not parse.
pub fn strip_callback_params(url: &str) -> Result<Option<String>, Report<SessionError>> {
    let mut parsed = Url::parse(url).map_err(|e| SessionError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let kept = {
        let Some(query) = parsed.query() else {
            return Ok(None);
        };

        let (dropped, kept): (Vec<&str>, Vec<&str>) = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .partition(|pair| is_callback_pair(pair));

        if dropped.is_empty() {
            return Ok(None);
        }
        kept.join("&")
    };

    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.set_query(Some(&kept));
    }
    Ok(Some(parsed.to_string()))
}

fn is_callback_pair(pair: &str) -> bool {
    let key = pair.split_once('=').map_or(pair, |(key, _)| key);
    let key = urlencoding::decode(key).map_or_else(|_| key.into(), |decoded| decoded);
    CALLBACK_PARAMS.iter().any(|param| *param == key)
}

/// What a call to [`RedirectNormalizer::observe`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalization {
    /// Not an entry into `Authenticated`; the location was not read.
    Skipped,
    /// Entered `Authenticated` but the URL carried no callback parameters.
    Clean,
    /// Callback parameters were removed; holds the replacement URL.
    Replaced(String),
}

/// Edge-triggered cleanup of callback parameters.
///
/// Feed it every status the session reports. It acts only on the transition
/// into `Authenticated`, so re-observing an authenticated status is a no-op.
#[derive(Debug, Default, Clone)]
pub struct RedirectNormalizer {
    authenticated: bool,
}

impl RedirectNormalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observes a status, cleaning the location on entry into `Authenticated`.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be read, parsed or replaced.
    /// The entry still counts as handled so a failure is not retried on the
    /// next observation.
    pub fn observe(
        &mut self,
        status: &SessionStatus,
        location: &mut dyn LocationPort,
    ) -> Result<Normalization, Report<SessionError>> {
        let entered = status.is_authenticated() && !self.authenticated;
        self.authenticated = status.is_authenticated();
        if !entered {
            return Ok(Normalization::Skipped);
        }

        let href = location.href()?;
        match strip_callback_params(&href)? {
            Some(cleaned) => {
                location.replace_url(&cleaned)?;
                tracing::debug!(url = %cleaned, "removed sign-in callback parameters");
                Ok(Normalization::Replaced(cleaned))
            }
            None => Ok(Normalization::Clean),
        }
    }
}
