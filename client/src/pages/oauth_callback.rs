//! `/oauth-callback`: provider redirect target.
//!
//! Checks once, and only when this browser started a login; a stray visit
//! goes straight home.

use leptos::prelude::*;

use authflow::detector::DetectorConfig;

use crate::components::verification_panel::VerificationRoute;

#[component]
pub fn OAuthCallbackPage() -> impl IntoView {
    view! { <VerificationRoute config=DetectorConfig::oauth_callback_page() title="Signing you in"/> }
}
