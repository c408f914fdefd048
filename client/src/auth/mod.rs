//! Browser bindings for the `authflow` login machinery.
//!
//! SYSTEM CONTEXT
//! ==============
//! `host` adapts the completion detector to Leptos signals, the router, and
//! `localStorage`. `service` holds the login/logout operations the pages call
//! for each configured strategy.

pub mod host;
pub mod service;
