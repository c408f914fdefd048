//! Idempotent navigation out of the auth flow.
//!
//! Several triggers (interval tick, focus, visibility, a page's own check) can
//! conclude "go to the dashboard" within the same frame. The orchestrator makes
//! sure only one navigation is issued per destination and route.

#[cfg(test)]
#[path = "redirect_test.rs"]
mod redirect_test;

use std::cell::RefCell;

/// In-app routes the auth flow can end on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Destination {
    Home,
    Login,
    Dashboard,
}

impl Destination {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
        }
    }
}

/// Browser navigation primitives.
pub trait Navigator {
    /// Current route path, without query or fragment.
    fn current_path(&self) -> String;
    /// Client-side route change replacing the current history entry.
    fn replace(&self, path: &str);
    /// Full-page navigation, leaving the app.
    fn assign(&self, url: &str);
}

/// Issues at most one navigation per destination until the route changes.
#[derive(Debug)]
pub struct RedirectOrchestrator<N> {
    navigator: N,
    last: RefCell<Option<(Destination, String)>>,
}

impl<N: Navigator> RedirectOrchestrator<N> {
    #[must_use]
    pub fn new(navigator: N) -> Self {
        Self { navigator, last: RefCell::new(None) }
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Route to `to` unless already there or already requested from here.
    ///
    /// Returns whether a navigation was issued.
    pub fn navigate_to(&self, to: Destination) -> bool {
        let here = self.navigator.current_path();
        if same_route(&here, to.path()) {
            log::debug!("already on {}, skipping redirect", to.path());
            return false;
        }
        let pending = (to, here);
        if self.last.borrow().as_ref() == Some(&pending) {
            log::debug!("redirect to {} already issued from {}", to.path(), pending.1);
            return false;
        }
        log::info!("redirecting {} -> {}", pending.1, to.path());
        self.navigator.replace(to.path());
        *self.last.borrow_mut() = Some(pending);
        true
    }

    pub fn navigate_to_dashboard(&self) -> bool {
        self.navigate_to(Destination::Dashboard)
    }

    pub fn navigate_to_login(&self) -> bool {
        self.navigate_to(Destination::Login)
    }

    /// Leave the app for an external URL (OAuth provider).
    pub fn hand_off(&self, url: &str) {
        log::info!("handing off to {url}");
        self.last.borrow_mut().take();
        self.navigator.assign(url);
    }
}

/// Compares paths ignoring trailing slashes.
#[must_use]
pub fn same_route(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
