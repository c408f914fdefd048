//! Public landing page.

use leptos::prelude::*;

use crate::state::auth::AuthState;
use crate::state::language::{Label, Language};

#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let language = expect_context::<RwSignal<Language>>();

    let start_href = move || if auth.get().is_authenticated() { "/upload" } else { "/login" };

    view! {
        <div class="landing">
            <section class="landing__hero">
                <h1>"Uncover Hidden Costs in Your " <span class="landing__accent">"Medical Bills"</span></h1>
                <p>
                    "Vivaran analyzes your medical bills, identifies overcharges, and helps you claim "
                    "insurance benefits."
                </p>
                <a href=start_href class="btn btn--primary">{move || language.get().label(Label::GetStarted)}</a>
            </section>
            <section class="landing__steps">
                <h2>"How it works"</h2>
                <ol>
                    <li>"Upload your medical bill in PDF, JPEG, or PNG format."</li>
                    <li>"The analysis service extracts the charges and checks them against reference rates."</li>
                    <li>"Receive a verdict with the overcharge amount and ask follow-up questions."</li>
                </ol>
            </section>
        </div>
    }
}
