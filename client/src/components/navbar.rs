//! Top navigation bar with language toggle, identity, and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered on every route. Links depend on whether a user is signed in;
//! logout ends the session for the configured strategy and returns home.

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::state::language::{Label, Language};
use crate::util::storage::LocalStorage;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let language = expect_context::<RwSignal<Language>>();
    let config = expect_context::<ClientConfig>();

    let label = move |l: Label| language.get().label(l);

    let on_toggle_language = move |_| {
        language.update(|lang| {
            *lang = lang.toggled();
            lang.save(&LocalStorage);
        });
    };

    let strategy = config.strategy;
    let endpoints = config.auth_endpoints();
    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let endpoints = endpoints.clone();
            leptos::task::spawn_local(async move {
                let client = crate::net::api::HttpAuthClient::new(endpoints);
                let flags = crate::util::storage::browser_flags();
                if let Err(e) = crate::auth::service::logout(&client, strategy, &LocalStorage, &flags).await {
                    leptos::logging::warn!("logout failed: {e}");
                }
                auth.set(AuthState::from(&authflow::session::AuthSession::Unauthenticated));
                if let Some(w) = web_sys::window() {
                    if w.location().set_href(authflow::redirect::Destination::Home.path()).is_err() {
                        leptos::logging::warn!("redirect after logout failed");
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (strategy, &endpoints);
    };

    let user_name = move || auth.get().navbar_name().unwrap_or_default();

    view! {
        <nav class="navbar">
            <a href="/" class="navbar__brand">"Vivaran"</a>
            <div class="navbar__links">
                <a href="/">{move || label(Label::Home)}</a>
                <Show when=move || auth.get().is_authenticated()>
                    <a href="/dashboard">{move || label(Label::Dashboard)}</a>
                    <a href="/upload">{move || label(Label::Upload)}</a>
                </Show>
            </div>
            <div class="navbar__actions">
                <button class="btn btn--ghost navbar__language" on:click=on_toggle_language>
                    {move || language.get().toggle_caption()}
                </button>
                <Show
                    when=move || auth.get().is_authenticated()
                    fallback=move || {
                        view! {
                            <a href="/login" class="btn btn--primary">{move || label(Label::SignIn)}</a>
                        }
                    }
                >
                    <span class="navbar__user">{user_name}</span>
                    <button class="btn btn--ghost" on:click=on_logout.clone()>
                        {move || label(Label::Logout)}
                    </button>
                </Show>
            </div>
        </nav>
    }
}
