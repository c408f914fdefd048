//! Login page for the configured auth strategy.
//!
//! SYSTEM CONTEXT
//! ==============
//! OAuth shows one button per provider; a click records the attempt and leaves
//! for the backend's provider URL. The email and demo strategies show a
//! credentials form instead. Signed-in visitors are sent to the dashboard.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use authflow::session::AuthSession;
use authflow::status::ProvidersResponse;
use authflow::strategy::{AuthStrategy, Provider};

use crate::auth::host::browser_orchestrator;
use crate::config::ClientConfig;
use crate::net::api::HttpAuthClient;
use crate::state::auth::AuthState;

/// Providers to offer: the discovered ones, else all known.
pub(crate) fn providers_to_show(discovered: Option<&ProvidersResponse>) -> Vec<Provider> {
    let known = discovered.map(ProvidersResponse::known_providers).unwrap_or_default();
    if known.is_empty() { Provider::ALL.to_vec() } else { known }
}

pub(crate) fn form_heading(strategy: AuthStrategy) -> &'static str {
    match strategy {
        AuthStrategy::Demo => "Sign in to the demo",
        AuthStrategy::OAuth | AuthStrategy::EmailPassword => "Welcome back",
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let orchestrator = StoredValue::new_local(browser_orchestrator());
    let client = HttpAuthClient::new(config.auth_endpoints());
    let strategy = config.strategy;
    let placeholder = config.placeholder;

    let providers = RwSignal::new(Provider::ALL.to_vec());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    Effect::new(move || {
        if auth.get().is_authenticated() {
            orchestrator.with_value(|o| o.navigate_to_dashboard());
        }
    });

    #[cfg(feature = "hydrate")]
    {
        if strategy == AuthStrategy::OAuth {
            let client = client.clone();
            leptos::task::spawn_local(async move {
                let discovered = client.fetch_providers().await;
                providers.set(providers_to_show(discovered.as_ref()));
            });
        }
    }

    let oauth_client = client.clone();
    let on_provider = move |provider: Provider| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        info.set(format!("Redirecting to {}...", provider.label()));
        let flags = crate::util::storage::browser_flags();
        orchestrator.with_value(|o| crate::auth::service::start_oauth(&flags, o, &oauth_client, provider));
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if strategy == AuthStrategy::Demo {
            match crate::auth::service::demo_login(&crate::util::storage::LocalStorage, &email_value, &password_value) {
                Ok(user) => auth.update(|s| s.apply(&AuthSession::Authenticated(user))),
                Err(e) => info.set(e.to_string()),
            }
            return;
        }
        busy.set(true);
        info.set("Signing in...".to_owned());
        #[cfg(feature = "hydrate")]
        {
            let client = client.clone();
            leptos::task::spawn_local(async move {
                match crate::auth::service::email_login(&client, placeholder, &email_value, &password_value).await {
                    Ok(user) => auth.update(|s| s.apply(&AuthSession::Authenticated(user))),
                    Err(e) => info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (&client, placeholder);
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-card__logo">"V"</div>
                <h1>{form_heading(strategy)}</h1>
                {if strategy.collects_credentials() {
                    view! {
                        <form class="login-form" on:submit=on_submit>
                            <input
                                class="login-input"
                                type="email"
                                placeholder="you@example.com"
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev))
                            />
                            <input
                                class="login-input"
                                type="password"
                                placeholder="Enter your password"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                            />
                            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                "Sign in"
                            </button>
                        </form>
                    }
                        .into_any()
                } else {
                    view! {
                        <div class="login-providers">
                            <For
                                each=move || providers.get()
                                key=|provider| provider.slug()
                                children=move |provider| {
                                    let on_provider = on_provider.clone();
                                    view! {
                                        <button
                                            class="btn btn--provider"
                                            disabled=move || busy.get()
                                            on:click=move |_| on_provider(provider)
                                        >
                                            {format!("Continue with {}", provider.label())}
                                        </button>
                                    }
                                }
                            />
                        </div>
                    }
                        .into_any()
                }}
                <p class="login-card__info">{move || info.get()}</p>
            </div>
        </div>
    }
}
