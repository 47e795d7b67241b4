//! Main Leptos application component and routing.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use crate::components::{AuthProvider, Layout, SessionGate};
use crate::pages::{DashboardPage, NotFoundPage, TemplatesPage};

/// The main application component.
///
/// Nothing below the gate renders until the session is resolved and someone
/// is signed in.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="EzDoc"/>
        <Router>
            <AuthProvider>
                <SessionGate>
                    <Layout>
                        <Routes fallback=|| view! { <NotFoundPage/> }>
                            <Route path=path!("/") view=DashboardPage/>
                            <Route path=path!("/templates") view=TemplatesPage/>
                        </Routes>
                    </Layout>
                </SessionGate>
            </AuthProvider>
        </Router>
    }
}
