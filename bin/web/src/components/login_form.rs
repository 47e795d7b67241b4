//! Sign-in screen.

use leptos::prelude::*;

use super::use_auth;

/// Sign-in affordance shown while nobody is signed in.
#[component]
pub fn LoginForm() -> impl IntoView {
    let auth = use_auth();
    let (redirecting, set_redirecting) = signal(false);

    view! {
        <div class="login-page">
            <div class="login-box">
                <h1>"EzDoc"</h1>
                <p>"Inicia sesión para gestionar tus plantillas de documentos."</p>
                <button
                    class="login-button"
                    disabled=move || redirecting.get()
                    on:click=move |_| {
                        set_redirecting.set(true);
                        auth.sign_in();
                    }
                >
                    {move || if redirecting.get() { "Redirigiendo..." } else { "Iniciar sesión" }}
                </button>
            </div>
        </div>
    }
}
