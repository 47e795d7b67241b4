use leptos::prelude::*;

/// Neutral loading placeholder.
#[component]
pub fn PageLoader() -> impl IntoView {
    view! {
        <div class="page-loader" role="status" aria-label="Cargando">
            <div class="spinner"></div>
        </div>
    }
}
