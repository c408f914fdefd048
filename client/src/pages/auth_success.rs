//! `/auth-success`: where the backend lands the browser after OAuth.
//!
//! The session cookie may lag the redirect, so the page waits 2 s and checks
//! up to three times before giving up.

use leptos::prelude::*;

use authflow::detector::DetectorConfig;

use crate::components::verification_panel::VerificationRoute;

#[component]
pub fn AuthSuccessPage() -> impl IntoView {
    view! { <VerificationRoute config=DetectorConfig::auth_success_page() title="Completing sign-in"/> }
}
