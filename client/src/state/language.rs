//! Interface language preference.
//!
//! SYSTEM CONTEXT
//! ==============
//! The choice persists in `localStorage` under [`LANGUAGE_KEY`] and drives the
//! navigation labels. Page copy itself is English only.

#[cfg(test)]
#[path = "language_test.rs"]
mod language_test;

use authflow::flags::KeyValueStore;

pub const LANGUAGE_KEY: &str = "vivaran-language";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    Hi,
}

/// Navigation labels looked up by [`Language::label`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    Home,
    Dashboard,
    Upload,
    SignIn,
    Logout,
    UploadBill,
    GetStarted,
}

impl Language {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "en" => Some(Self::En),
            "hi" => Some(Self::Hi),
            _ => None,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::En => Self::Hi,
            Self::Hi => Self::En,
        }
    }

    /// Stored preference, English when absent or unrecognized.
    #[must_use]
    pub fn load(store: &impl KeyValueStore) -> Self {
        store.get(LANGUAGE_KEY).as_deref().and_then(Self::parse).unwrap_or_default()
    }

    pub fn save(self, store: &impl KeyValueStore) {
        store.set(LANGUAGE_KEY, self.code());
    }

    #[must_use]
    pub const fn label(self, label: Label) -> &'static str {
        match (self, label) {
            (Self::En, Label::Home) => "Home",
            (Self::En, Label::Dashboard) => "Dashboard",
            (Self::En, Label::Upload) => "Upload",
            (Self::En, Label::SignIn) => "Sign In",
            (Self::En, Label::Logout) => "Logout",
            (Self::En, Label::UploadBill) => "Upload Bill",
            (Self::En, Label::GetStarted) => "Get Started",
            (Self::Hi, Label::Home) => "होम",
            (Self::Hi, Label::Dashboard) => "डैशबोर्ड",
            (Self::Hi, Label::Upload) => "अपलोड",
            (Self::Hi, Label::SignIn) => "साइन इन",
            (Self::Hi, Label::Logout) => "लॉगआउट",
            (Self::Hi, Label::UploadBill) => "बिल अपलोड करें",
            (Self::Hi, Label::GetStarted) => "शुरू करें",
        }
    }

    /// Caption of the toggle button: the language it switches to.
    #[must_use]
    pub const fn toggle_caption(self) -> &'static str {
        match self {
            Self::En => "हिंदी",
            Self::Hi => "English",
        }
    }
}
