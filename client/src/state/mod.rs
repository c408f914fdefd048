//! Reactive client state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each state struct is plain data wrapped in an `RwSignal` by `app::App`.
//! Mutation helpers live on the structs so they can be tested without a
//! reactive runtime.

pub mod auth;
pub mod bills;
pub mod language;
pub mod upload;
pub mod verification;
