//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::components::oauth_monitor::OAuthMonitor;
use crate::config::ClientConfig;
use crate::pages::{
    auth_success::AuthSuccessPage, dashboard::DashboardPage, landing::LandingPage, login::LoginPage,
    oauth_callback::OAuthCallbackPage, signup::SignupPage, upload::UploadPage,
};
use crate::state::{auth::AuthState, bills::BillsState, language::Language, upload::UploadState};
use crate::util::storage::LocalStorage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
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

/// Root application component.
///
/// Provides the build-time config and all shared state contexts, then sets up
/// client-side routing with the login monitor mounted inside the router.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let auth = RwSignal::new(AuthState::default());
    let language = RwSignal::new(Language::default());
    let bills = RwSignal::new(BillsState::default());
    let upload = RwSignal::new(UploadState::default());

    provide_context(config);
    provide_context(auth);
    provide_context(language);
    provide_context(bills);
    provide_context(upload);

    // Stored preference is only readable in the browser.
    Effect::new(move || language.set(Language::load(&LocalStorage)));

    view! {
        <Stylesheet id="leptos" href="/pkg/vivaran.css"/>
        <Title text="Vivaran"/>

        <Router>
            <OAuthMonitor/>
            <Navbar/>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=LandingPage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("signup") view=SignupPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("upload") view=UploadPage/>
                    <Route path=StaticSegment("oauth-callback") view=OAuthCallbackPage/>
                    <Route path=StaticSegment("auth-success") view=AuthSuccessPage/>
                </Routes>
            </main>
        </Router>
    }
}
