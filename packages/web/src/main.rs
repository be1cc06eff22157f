use dioxus::prelude::*;

use ui::components::ToastProvider;
use ui::{AuthProvider, ConfigProvider};
use views::{CalculationDetail, Calculations, Login, Protected, Settings};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[layout(Protected)]
        #[route("/calculations")]
        Calculations {},
        #[route("/calculations/:id")]
        CalculationDetail { id: String },
        #[route("/settings")]
        Settings {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .expect("Failed to start the tokio runtime")
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use std::time::Duration;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, SessionManagerLayer};
    use tower_sessions_sqlx_store::PostgresStore;
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    // Fail fast on a broken portal.toml rather than on the first request
    let config = match api::config::get_config().await {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            panic!("Failed to load portal configuration: {e}");
        }
    };

    let pool = match api::db::get_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("{}", e);
            panic!("Failed to connect to database: {e}");
        }
    };

    api::db::MIGRATOR
        .run(pool)
        .await
        .expect("Failed to run migrations");

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .expect("Failed to migrate the session store");

    let expiry_secs = 60 * 60 * 24 * u64::from(config.session.expiry_days);
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.session.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            Duration::from_secs(expiry_secs)
                .try_into()
                .expect("Session expiry out of range"),
        ));

    let router = axum::Router::new()
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind the listen address");
    tracing::info!(policy = ?config.access.policy, "Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, router.into_make_service()).await {
        tracing::error!("Server error: {}", e);
    }
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ConfigProvider {
            AuthProvider {
                ToastProvider {
                    Router::<Route> {}
                }
            }
        }
    }
}

/// Redirect `/` based on auth state
#[component]
fn Root() -> Element {
    let auth = ui::use_auth();
    let nav = use_navigator();

    if !auth().loading {
        if auth().is_signed_in() {
            nav.replace(Route::Calculations {});
        } else {
            nav.replace(Route::Login {});
        }
    }

    rsx! {}
}
