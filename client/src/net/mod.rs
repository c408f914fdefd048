//! Networking modules for the auth backend and the analysis service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` binds the `authflow` auth contract to `gloo-net`, `analysis` talks to
//! the bill-analysis service, and `types` defines the analysis wire schema.

pub mod analysis;
pub mod api;
pub mod types;
