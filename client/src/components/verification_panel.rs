//! Login verification screen shared by `/auth-success` and `/oauth-callback`.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`VerificationRoute`] owns a page-scoped detector configured by the route,
//! starts it once on mount, and cancels it on unmount. [`VerificationPanel`]
//! renders the resulting [`VerificationState`]: progress, then either the
//! success line or the failure actions.

use leptos::prelude::*;

use authflow::detector::DetectorConfig;

use crate::auth::host::{BrowserHost, DetectorHandle};
use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::state::verification::{VerificationPhase, VerificationState};

/// Runs `config` against the current session and shows its progress.
#[component]
pub fn VerificationRoute(config: DetectorConfig, #[prop(into)] title: String) -> impl IntoView {
    let client_config = expect_context::<ClientConfig>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let verification = RwSignal::new(VerificationState::default());
    let handle = DetectorHandle::new(
        config.with_placeholder(client_config.placeholder),
        BrowserHost::new(&client_config, auth, Some(verification)),
    );
    let liveness = handle.liveness();
    let handle = StoredValue::new_local(handle);

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        handle.with_value(|h| {
            h.fire(authflow::detector::Trigger::Mount);
        });
    });
    on_cleanup(move || liveness.cancel());

    let on_retry = Callback::new(move |()| handle.with_value(DetectorHandle::retry));

    view! { <VerificationPanel title=title verification=verification on_retry=on_retry/> }
}

#[component]
pub fn VerificationPanel(
    title: String,
    verification: RwSignal<VerificationState>,
    on_retry: Callback<()>,
) -> impl IntoView {
    let phase = move || verification.get().phase;

    view! {
        <div class="verify-page">
            <div class="verify-card">
                <h1>{title}</h1>
                <p
                    class="verify-card__status"
                    class:verify-card__status--error=move || phase() == VerificationPhase::Failed
                    class:verify-card__status--ok=move || phase() == VerificationPhase::Succeeded
                >
                    {move || verification.get().message}
                </p>
                <Show when=move || phase() == VerificationPhase::Working>
                    <div class="spinner" aria-hidden="true"></div>
                </Show>
                <Show when=move || verification.get().can_retry()>
                    <div class="verify-card__actions">
                        <button class="btn btn--primary" on:click=move |_| on_retry.run(())>
                            "Retry Authentication"
                        </button>
                        <a href="/login" class="btn btn--ghost">"Back to Login"</a>
                    </div>
                </Show>
                <Show when=move || verification.get().show_help()>
                    <div class="verify-card__help">
                        <p>"Having trouble? Try logging in again or contact support."</p>
                    </div>
                </Show>
            </div>
        </div>
    }
}
