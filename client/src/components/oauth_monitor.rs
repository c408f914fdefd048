//! App-wide login monitor.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once inside the router. On load it restores a browser-held session
//! (demo strategy) or probes the backend session; while an OAuth attempt is
//! pending it re-checks whenever the tab regains focus or visibility, and
//! moves the user to the dashboard once the session appears.
//!
//! `/auth-success` and `/oauth-callback` run their own detector, so the
//! monitor stays quiet there.

use leptos::prelude::*;

use authflow::detector::DetectorConfig;

use crate::auth::host::{BrowserHost, DetectorHandle};
use crate::config::ClientConfig;
use crate::state::auth::AuthState;

#[cfg(feature = "hydrate")]
use authflow::detector::Trigger;
#[cfg(feature = "hydrate")]
use leptos_router::hooks::use_location;

#[cfg(feature = "hydrate")]
use crate::auth::service::restore_session;
#[cfg(feature = "hydrate")]
use crate::util::auth::route_owns_detection;
#[cfg(feature = "hydrate")]
use crate::util::storage::LocalStorage;

#[cfg(feature = "hydrate")]
fn document_visible() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .is_some_and(|d| d.visibility_state() == web_sys::VisibilityState::Visible)
}

/// Renders nothing; installs the session bootstrap and login listeners.
#[component]
pub fn OAuthMonitor() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let handle = DetectorHandle::new(
        DetectorConfig::monitor().with_placeholder(config.placeholder),
        BrowserHost::new(&config, auth, None),
    );

    #[cfg(feature = "hydrate")]
    {
        let pathname = use_location().pathname;
        let liveness = handle.liveness();
        let listening = handle.host().listening();
        let handle = StoredValue::new_local(handle);

        let fire = move |trigger: Trigger| {
            if route_owns_detection(&pathname.get_untracked()) {
                return;
            }
            handle.with_value(|h| {
                h.fire(trigger);
            });
        };

        let strategy = config.strategy;
        Effect::new(move || {
            if let Some(session) = restore_session(strategy, &LocalStorage) {
                auth.update(|state| state.apply(&session));
                return;
            }
            fire(Trigger::Mount);
        });

        let focus_listening = listening.clone();
        let on_focus = window_event_listener_untyped("focus", move |_| {
            if focus_listening.is_alive() {
                fire(Trigger::FocusRegained);
            }
        });
        let on_visibility = window_event_listener_untyped("visibilitychange", move |_| {
            if listening.is_alive() && document_visible() {
                fire(Trigger::VisibilityRegained);
            }
        });

        on_cleanup(move || {
            liveness.cancel();
            on_focus.remove();
            on_visibility.remove();
        });
    }
    #[cfg(not(feature = "hydrate"))]
    drop(handle);
}
