//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod auth_success;
pub mod dashboard;
pub mod landing;
pub mod login;
pub mod oauth_callback;
pub mod signup;
pub mod upload;
