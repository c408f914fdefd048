//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome and the auth/analysis surfaces while reading
//! and writing shared state from Leptos context providers.

pub mod analysis_report;
pub mod navbar;
pub mod oauth_monitor;
pub mod verification_panel;
