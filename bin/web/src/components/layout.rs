//! Application chrome: sidebar, top bar and content area.

use leptos::prelude::*;
use leptos_router::components::A;

use super::use_auth;
use crate::util::viewport_is_narrow;

/// Sidebar + top bar around the routed page.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let collapsed = RwSignal::new(false);

    // Start collapsed on small screens.
    Effect::new(move || {
        if viewport_is_narrow() {
            collapsed.set(true);
        }
    });

    view! {
        <div class="app-shell" class:sidebar-collapsed=move || collapsed.get()>
            <Sidebar/>
            <div class="app-main">
                <TopBar collapsed/>
                <main class="content">{children()}</main>
            </div>
        </div>
    }
}

#[component]
fn Sidebar() -> impl IntoView {
    view! {
        <aside class="sidebar">
            <div class="sidebar-brand">
                <span class="logo">"EzDoc"</span>
            </div>
            <nav class="sidebar-nav">
                <A href="/">
                    <span class="nav-icon">"⌂"</span>
                    <span class="nav-label">"Inicio"</span>
                </A>
                <A href="/templates">
                    <span class="nav-icon">"▤"</span>
                    <span class="nav-label">"Plantillas"</span>
                </A>
            </nav>
        </aside>
    }
}

#[component]
fn TopBar(collapsed: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let (menu_open, set_menu_open) = signal(false);

    let name = move || {
        auth.profile()
            .map(|p| p.short_name().to_string())
            .unwrap_or_default()
    };
    let email = move || auth.profile().and_then(|p| p.email).unwrap_or_default();

    view! {
        <header class="top-bar">
            <button
                class="icon-btn"
                aria-label="Mostrar u ocultar el menú"
                on:click=move |_| collapsed.update(|c| *c = !*c)
            >
                "☰"
            </button>
            <div class="user-menu">
                <button class="user-button" on:click=move |_| set_menu_open.update(|open| *open = !*open)>
                    <span class="user-name">{name}</span>
                    <span class="user-email">{email}</span>
                </button>
                {move || if menu_open.get() {
                    view! {
                        <div class="user-dropdown">
                            <button on:click=move |_| {
                                set_menu_open.set(false);
                                auth.sign_out();
                            }>"Cerrar sesión"</button>
                        </div>
                    }.into_any()
                } else {
                    view! { <span></span> }.into_any()
                }}
            </div>
        </header>
    }
}
