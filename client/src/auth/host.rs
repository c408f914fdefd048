//! Detector host backed by the browser.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`BrowserHost`] implements `authflow::driver::Host`: status fetches go to
//! [`HttpAuthClient`], session changes land in the `AuthState` signal, status
//! lines in the optional `VerificationState` signal, and navigation through
//! the router via a [`RedirectOrchestrator`].
//!
//! [`DetectorHandle`] owns one detector plus its host and liveness flag, and
//! is what components hold. Triggers call [`DetectorHandle::fire`], which
//! reads the flag store and spawns the driver on the action list.
//!
//! TRADE-OFFS
//! ==========
//! Everything here is `Rc`-based and lives on the UI thread. Components keep
//! the handle in a local `StoredValue` and hand only the `Arc`-backed
//! [`Liveness`] to `on_cleanup`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use authflow::detector::{Action, CompletionDetector, DetectorConfig, StatusLine, Trigger};
use authflow::driver::{Host, Liveness};
use authflow::error::AuthError;
use authflow::flags::FlagStore;
use authflow::redirect::{Destination, Navigator, RedirectOrchestrator};
use authflow::session::AuthSession;
use authflow::status::{AuthStatusClient, AuthStatusResponse};
use leptos::prelude::{GetUntracked, Memo, RwSignal, Update};
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::config::ClientConfig;
use crate::net::api::HttpAuthClient;
use crate::state::auth::AuthState;
use crate::state::verification::VerificationState;
use crate::util::storage::{BrowserClock, LocalStorage, browser_flags};

/// [`Navigator`] over the Leptos router and `window.location`.
#[derive(Clone)]
pub struct RouterNavigator {
    navigate: Rc<dyn Fn(&str, NavigateOptions)>,
    pathname: Memo<String>,
}

impl RouterNavigator {
    /// Must be called inside `<Router>`.
    #[must_use]
    pub fn from_router() -> Self {
        let navigate = use_navigate();
        let location = use_location();
        Self {
            navigate: Rc::new(move |path: &str, options: NavigateOptions| navigate(path, options)),
            pathname: location.pathname,
        }
    }
}

impl Navigator for RouterNavigator {
    fn current_path(&self) -> String {
        self.pathname.get_untracked()
    }

    fn replace(&self, path: &str) {
        (self.navigate)(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
    }

    fn assign(&self, url: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Err(e) = window.location().set_href(url) {
                leptos::logging::warn!("navigation to {url} failed: {e:?}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = url;
        }
    }
}

pub type BrowserOrchestrator = RedirectOrchestrator<RouterNavigator>;

/// Build the orchestrator for the current router.
#[must_use]
pub fn browser_orchestrator() -> BrowserOrchestrator {
    RedirectOrchestrator::new(RouterNavigator::from_router())
}

/// `authflow` host wired to the app's signals.
pub struct BrowserHost {
    client: HttpAuthClient,
    auth: RwSignal<AuthState>,
    verification: Option<RwSignal<VerificationState>>,
    flags: FlagStore<LocalStorage, BrowserClock>,
    orchestrator: BrowserOrchestrator,
    listening: Liveness,
}

impl BrowserHost {
    #[must_use]
    pub fn new(config: &ClientConfig, auth: RwSignal<AuthState>, verification: Option<RwSignal<VerificationState>>) -> Self {
        Self {
            client: HttpAuthClient::new(config.auth_endpoints()),
            auth,
            verification,
            flags: browser_flags(),
            orchestrator: browser_orchestrator(),
            listening: Liveness::new(),
        }
    }

    /// Cleared once the detector tears down; event listeners check it.
    #[must_use]
    pub fn listening(&self) -> Liveness {
        self.listening.clone()
    }
}

#[async_trait(?Send)]
impl Host for BrowserHost {
    async fn fetch_status(&self) -> Result<AuthStatusResponse, AuthError> {
        self.client.fetch_current_user().await
    }

    async fn sleep(&self, delay: Duration) {
        #[cfg(feature = "hydrate")]
        gloo_timers::future::sleep(delay).await;
        #[cfg(not(feature = "hydrate"))]
        let _ = delay;
    }

    fn apply_session(&self, session: AuthSession) {
        self.auth.update(|state| state.apply(&session));
    }

    fn show_status(&self, status: StatusLine) {
        if let Some(verification) = self.verification {
            verification.update(|state| state.apply(&status));
        }
    }

    fn clear_flag(&self) {
        self.flags.clear();
    }

    fn teardown(&self) {
        self.listening.cancel();
    }

    fn navigate(&self, to: Destination) {
        self.orchestrator.navigate_to(to);
    }
}

/// One detector bound to one [`BrowserHost`].
#[derive(Clone)]
pub struct DetectorHandle {
    detector: Rc<RefCell<CompletionDetector>>,
    host: Rc<BrowserHost>,
    liveness: Liveness,
}

impl DetectorHandle {
    #[must_use]
    pub fn new(config: DetectorConfig, host: BrowserHost) -> Self {
        Self {
            detector: Rc::new(RefCell::new(CompletionDetector::new(config))),
            host: Rc::new(host),
            liveness: Liveness::new(),
        }
    }

    /// Flipped off when the owning component unmounts.
    #[must_use]
    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    #[must_use]
    pub fn host(&self) -> &BrowserHost {
        &self.host
    }

    /// Feed `trigger` to the detector and run whatever it asks for.
    pub fn fire(&self, trigger: Trigger) {
        let active = self.host.flags.is_active();
        let actions = self.detector.borrow_mut().trigger(trigger, active);
        self.run(actions);
    }

    /// "Retry" after a failed verification. A pending failure redirect from
    /// the old cycle is dropped by the driver; with no attempt flag left the
    /// detector sends the user to the login page instead.
    pub fn retry(&self) {
        let active = self.host.flags.is_active();
        let actions = self.detector.borrow_mut().retry(active);
        self.run(actions);
    }

    pub fn cancel(&self) {
        self.liveness.cancel();
        self.host.listening.cancel();
    }

    fn run(&self, actions: Vec<Action>) {
        if actions.is_empty() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let detector = Rc::clone(&self.detector);
            let host = Rc::clone(&self.host);
            let liveness = self.liveness.clone();
            leptos::task::spawn_local(async move {
                let state = authflow::driver::drive(&detector, host.as_ref(), &liveness, actions).await;
                leptos::logging::log!("auth detector settled: {state:?}");
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = actions;
        }
    }
}
