//! Fallback for unknown routes.

use ezdoc_session::LocationPort;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::auth::browser::BrowserLocation;

/// Not-found page with ways back.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    let reload = move |_| {
        if let Err(report) = BrowserLocation.reload() {
            log::warn!("reload failed: {report}");
        }
    };
    let back = move |_| {
        if let Err(report) = BrowserLocation.back() {
            log::warn!("history back failed: {report}");
        }
    };

    view! {
        <div class="not-found-page">
            <h1>"404"</h1>
            <p>"La página que buscas no existe."</p>
            <div class="not-found-actions">
                <A href="/">"Ir al inicio"</A>
                <button class="secondary-btn" on:click=reload>"Recargar"</button>
                <button class="secondary-btn" on:click=back>"Volver"</button>
            </div>
        </div>
    }
}
