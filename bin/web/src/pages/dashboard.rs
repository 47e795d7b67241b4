//! Dashboard page component.

use ezdoc_session::Profile;
use leptos::prelude::*;

use crate::components::use_auth;

/// The dashboard page: who is signed in, and their raw claims.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();

    move || {
        auth.profile().map(|profile| {
            let initial = avatar_initial(&profile);
            let display_name = profile.display_name().to_string();
            let email = profile.email.clone().unwrap_or_default();
            let verified = if profile.email_verified == Some(true) { "Sí" } else { "No" };
            let debug = debug_json(&profile);

            view! {
                <div class="dashboard-page">
                    <section class="profile-card">
                        <div class="avatar">{initial}</div>
                        <div class="profile-details">
                            <h1>{display_name}</h1>
                            <p class="profile-email">{email}</p>
                            <p class="profile-verified">"Correo verificado: "{verified}</p>
                        </div>
                        <button class="secondary-btn" on:click=move |_| auth.sign_out()>
                            "Cerrar sesión"
                        </button>
                    </section>
                    <section class="debug-block">
                        <h2>"Datos de la sesión"</h2>
                        <pre>{debug}</pre>
                    </section>
                </div>
            }
        })
    }
}

fn avatar_initial(profile: &Profile) -> String {
    profile
        .display_name()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Claims and tokens as pretty-printed JSON.
fn debug_json(profile: &Profile) -> String {
    let value = serde_json::json!({
        "email": profile.email,
        "sub": profile.subject,
        "email_verified": profile.email_verified,
        "access_token": profile.access_token,
        "refresh_token": profile.refresh_token,
    });
    serde_json::to_string_pretty(&value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_json_lists_claims_and_tokens() {
        let mut profile = Profile::new("sub-1", "access");
        profile.email = Some("ana@example.com".to_string());
        profile.email_verified = Some(true);

        let json: serde_json::Value = serde_json::from_str(&debug_json(&profile)).expect("json");
        assert_eq!(json["sub"], "sub-1");
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["email_verified"], true);
        assert_eq!(json["access_token"], "access");
        assert!(json["refresh_token"].is_null());
    }

    #[test]
    fn avatar_uses_first_letter_of_display_name() {
        let mut profile = Profile::new("sub-1", "access");
        profile.preferred_username = Some("ángela".to_string());
        assert_eq!(avatar_initial(&profile), "Á");
    }
}
