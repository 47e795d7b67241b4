#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use ezdoc_web::{app::App, auth::oidc::OidcClient, config::WebConfig};
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use std::sync::Arc;
    use tower_http::{services::ServeDir, trace::TraceLayer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = WebConfig::from_env().expect("failed to load configuration");
    tracing::info!(
        region = config.cognito.region(),
        user_pool_id = config.cognito.user_pool_id(),
        "Loaded configuration"
    );

    // Initialize OIDC client
    tracing::info!(authority = %config.cognito.authority(), "Discovering OIDC provider...");
    let cognito = config.cognito.clone();
    let oidc_client = OidcClient::discover(config.cognito, config.client_secret)
        .await
        .expect("failed to discover OIDC provider");

    let conf = get_configuration(None).expect("failed to get leptos configuration");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler::<LeptosOptions, _>(shell))
        .nest_service("/pkg", ServeDir::new("target/site/pkg"))
        // Provide the OIDC client and public Cognito settings to server functions
        .layer(axum::Extension(Arc::new(oidc_client)))
        .layer(axum::Extension(cognito))
        .layer(TraceLayer::new_for_http())
        .with_state(leptos_options);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}

#[cfg(feature = "ssr")]
fn shell(options: leptos::prelude::LeptosOptions) -> impl leptos::prelude::IntoView {
    use ezdoc_web::app::App;
    use leptos::prelude::*;
    use leptos_meta::*;

    view! {
        <!DOCTYPE html>
        <html lang="es">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="stylesheet" href="/pkg/ezdoc.css"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // This main function is only used for WASM builds
    // The actual hydration happens in lib.rs
}
