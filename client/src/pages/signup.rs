//! `/signup`: accounts are created by the identity providers, so this route
//! forwards to the login page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use authflow::redirect::Destination;

#[component]
pub fn SignupPage() -> impl IntoView {
    let navigate = use_navigate();
    Effect::new(move || {
        navigate(Destination::Login.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
    });
}
