//! OAuth completion tracking for the Vivaran web client.
//!
//! The crate holds every piece of the login-completion flow that does not need
//! a browser: the persisted login-in-progress flag, the auth status contract,
//! the completion detector state machine, redirect orchestration and the async
//! driver that runs detector actions against a host. The Leptos client binds
//! these seams to `localStorage`, `fetch`, timers and the router; tests bind
//! them to in-memory fakes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`flags`] | Persisted login attempt with a TTL over a [`flags::KeyValueStore`] |
//! | [`status`] | Auth status DTOs, endpoint URLs and the [`status::AuthStatusClient`] trait |
//! | [`session`] | In-memory [`session::AuthSession`] and the [`session::User`] profile |
//! | [`detector`] | Sans-IO [`detector::CompletionDetector`] emitting [`detector::Action`]s |
//! | [`driver`] | Async loop that performs detector actions through a [`driver::Host`] |
//! | [`redirect`] | Idempotent in-app navigation and the provider hand-off |
//! | [`retry`] | Bounded [`retry::RetryPolicy`] schedules |
//! | [`strategy`] | Login strategies, providers and credential validation |
//! | [`error`] | [`error::AuthError`] taxonomy |

pub mod detector;
pub mod driver;
pub mod error;
pub mod flags;
pub mod redirect;
pub mod retry;
pub mod session;
pub mod status;
pub mod strategy;
