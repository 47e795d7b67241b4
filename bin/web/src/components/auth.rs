//! Session context, the provider that resolves it and the gate that renders
//! by it.

use ezdoc_session::{
    AuthResolutionError, CognitoConfig, GateView, Normalization, Profile, RedirectNormalizer,
    Session, SessionEvent,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{LoginForm, PageLoader};
use crate::auth::browser::{self, BrowserAuthClient, BrowserLocation, server_message};
use crate::auth::get_auth_config;

/// Reactive handle on the session, provided to the whole app.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Session>,
    config: RwSignal<Option<CognitoConfig>>,
}

impl AuthContext {
    fn new() -> Self {
        Self {
            session: RwSignal::new(Session::new()),
            config: RwSignal::new(None),
        }
    }

    /// What the gate should render. Tracked.
    pub fn gate_view(&self) -> GateView {
        self.session.with(|s| GateView::for_status(s.status()))
    }

    /// The signed-in user, if any. Tracked.
    pub fn profile(&self) -> Option<Profile> {
        self.session.with(|s| s.status().profile().cloned())
    }

    /// Applies an event, logging transitions the session rejects.
    pub fn apply(&self, event: SessionEvent) {
        self.session.update(|session| {
            if let Err(report) = session.apply(event) {
                log::warn!("ignored session event: {report}");
            }
        });
    }

    /// Starts the hosted UI sign-in.
    pub fn sign_in(&self) {
        let Some(config) = self.config.get_untracked() else {
            log::warn!("sign-in requested before the auth config loaded");
            return;
        };
        let this = *self;
        spawn_local(async move {
            let client = BrowserAuthClient::new(&config);
            if let Err(report) = ezdoc_session::sign_in(&client).await {
                log::warn!("sign-in redirect failed: {report}");
                this.apply(SessionEvent::ActionFailed(report.current_context().into()));
            }
        });
    }

    /// Forgets the local user and leaves through the hosted UI logout.
    pub fn sign_out(&self) {
        let Some(config) = self.config.get_untracked() else {
            log::warn!("sign-out requested before the auth config loaded");
            return;
        };
        let this = *self;
        spawn_local(async move {
            let client = BrowserAuthClient::new(&config);
            let mut location = BrowserLocation;
            match ezdoc_session::sign_out(&client, &mut location, &config).await {
                Ok(_) => this.apply(SessionEvent::SignedOut),
                Err(report) => {
                    log::warn!("sign-out failed: {report}");
                    this.apply(SessionEvent::ActionFailed(report.current_context().into()));
                }
            }
        });
    }

    /// Reloads the page to recover from an error.
    pub fn retry(&self) {
        self.session.update(|session| {
            if let Err(report) = ezdoc_session::retry(session, &mut BrowserLocation) {
                log::warn!("reload failed: {report}");
            }
        });
    }
}

/// Returns the [`AuthContext`] provided by [`AuthProvider`].
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Provides the [`AuthContext`], resolves the session once hydrated and
/// strips sign-in callback parameters whenever the user becomes signed in.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext::new();
    provide_context(auth);

    // Effects only run in the browser, so resolution starts after hydration.
    Effect::new(move || {
        spawn_local(async move {
            let event = match get_auth_config().await {
                Ok(config) => {
                    let event = browser::resolve(&config).await;
                    auth.config.set(Some(config));
                    event
                }
                Err(e) => SessionEvent::Failed(AuthResolutionError::new(server_message(e))),
            };
            auth.apply(event);
        });
    });

    let normalizer = StoredValue::new(RedirectNormalizer::new());
    Effect::new(move || {
        let status = auth.session.with(|s| s.status().clone());
        normalizer.update_value(|normalizer| {
            match normalizer.observe(&status, &mut BrowserLocation) {
                Ok(Normalization::Replaced(url)) => log::debug!("cleaned callback url: {url}"),
                Ok(_) => {}
                Err(report) => log::warn!("could not clean callback url: {report}"),
            }
        });
    });

    children()
}

/// Renders exactly one of: loader, error, sign-in, or the app.
#[component]
pub fn SessionGate(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let gate = Memo::new(move |_| auth.gate_view());

    move || match gate.get() {
        GateView::Placeholder => view! { <PageLoader/> }.into_any(),
        GateView::Error { message } => view! {
            <div class="auth-error">
                <div class="auth-error-box">
                    <h1>"Error de autenticación"</h1>
                    <p class="error-message">{message}</p>
                    <button class="primary-btn" on:click=move |_| auth.retry()>
                        "Recargar"
                    </button>
                </div>
            </div>
        }
        .into_any(),
        GateView::SignIn => view! { <LoginForm/> }.into_any(),
        GateView::Content(_) => children().into_any(),
    }
}
