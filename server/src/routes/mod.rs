//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Serves the Leptos app with SSR at every page route, its compiled assets at
//! `/pkg`, a health probe, and a redirect that turns the auth backend's
//! legacy `/static/auth-success.html` landing into the app's `/auth-success`
//! page. Authentication and analysis live on external services; nothing here
//! touches sessions.


use std::path::PathBuf;

use axum::Router;
use axum::extract::RawQuery;
use axum::http::{HeaderName, StatusCode};
use axum::response::Redirect;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::StartupError;

/// Landing page the auth backend redirects to after OAuth.
pub const BACKEND_LANDING: &str = "/static/auth-success.html";

/// Non-Leptos routes: health probe and the backend landing redirect.
pub fn api_routes(config: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/healthz", get(healthz))
        .route(BACKEND_LANDING, get(redirect_backend_landing))
        .layer(TraceLayer::new_for_http());

    match &config.cors_origin {
        Some(origin) => router.layer(
            CorsLayer::new()
                .allow_origin(origin.clone())
                .allow_methods(Any)
                .allow_headers([HeaderName::from_static("content-type")]),
        ),
        None => router,
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Keep the query string so provider error details reach the page.
async fn redirect_backend_landing(RawQuery(query): RawQuery) -> Redirect {
    Redirect::temporary(&landing_target(query.as_deref()))
}

fn landing_target(query: Option<&str>) -> String {
    match query.filter(|q| !q.is_empty()) {
        Some(q) => format!("/auth-success?{q}"),
        None => "/auth-success".to_owned(),
    }
}

/// Leptos SSR frontend plus [`api_routes`].
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn leptos_app(config: &ServerConfig) -> Result<Router, StartupError> {
    let conf = get_configuration(None).map_err(|e| StartupError::Leptos(e.to_string()))?;
    let mut leptos_options = conf.leptos_options;
    if let Some(root) = &config.site_root {
        leptos_options.site_root = root.to_string_lossy().as_ref().into();
    }
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());
    tracing::info!(site_root = %site_root_path.display(), "serving leptos assets");

    Ok(api_routes(config)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}
