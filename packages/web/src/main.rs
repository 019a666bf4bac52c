use dioxus::prelude::*;

use ui::AuthProvider;
use views::{Careers, Events, Home, Login, SiteLayout, Signup};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(SiteLayout)]
        #[route("/")]
        Home {},
        #[route("/careers")]
        Careers {},
        #[route("/events")]
        Events {},
        #[route("/login")]
        Login {},
        #[route("/signup")]
        Signup {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[cfg(feature = "server")]
fn main() -> anyhow::Result<()> {
    tokio::runtime::Runtime::new()?.block_on(launch_server())
}

#[cfg(not(feature = "server"))]
fn main() {
    dioxus::launch(App);
}

#[cfg(feature = "server")]
async fn launch_server() -> anyhow::Result<()> {
    use anyhow::Context;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use std::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();

    // The dev server may have installed a subscriber already.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    let settings = api::backend::get_settings()
        .await
        .context("Failed to load settings")?;

    // Initialize the Supabase client
    let client = api::backend::get_client()
        .await
        .context("Failed to create Supabase client")?;

    // Session layer configuration
    let ttl_days = u64::try_from(settings.session.ttl).context("SESSION_TTL must not be negative")?;
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(settings.session.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            Duration::from_secs(60 * 60 * 24 * ttl_days)
                .try_into()
                .context("SESSION_TTL is out of range")?,
        ));

    let router = axum::Router::new()
        // REST endpoints for the events table
        .merge(api::events::router(client.clone()))
        // Then serve the Dioxus application
        .serve_dioxus_application(ServeConfig::new(), App)
        // Add session layer to all routes
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}
