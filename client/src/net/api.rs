//! Auth backend calls over `gloo-net`.
//!
//! Client-side (hydrate): credentialed `fetch` so the session cookie set by
//! the OAuth redirect travels with every request.
//! Server-side (SSR): stubs returning [`AuthError::Unavailable`] or `None`,
//! since these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure maps onto [`AuthError`] so the completion detector can decide
//! whether to retry. Nothing here touches the session; callers do.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use authflow::error::AuthError;
use authflow::status::{AuthEndpoints, AuthStatusClient, AuthStatusResponse, ProvidersResponse};
#[cfg(feature = "hydrate")]
use authflow::status::interpret_logout;
use authflow::strategy::Credentials;

#[cfg(any(test, feature = "hydrate"))]
fn decode_status(body: &str) -> Result<AuthStatusResponse, AuthError> {
    serde_json::from_str(body).map_err(|e| AuthError::Malformed(e.to_string()))
}

#[cfg(any(test, feature = "hydrate"))]
fn transport(err: impl std::fmt::Display) -> AuthError {
    AuthError::Transport(err.to_string())
}

/// [`AuthStatusClient`] backed by the browser `fetch` API.
#[derive(Clone, Debug)]
pub struct HttpAuthClient {
    endpoints: AuthEndpoints,
}

impl HttpAuthClient {
    #[must_use]
    pub fn new(endpoints: AuthEndpoints) -> Self {
        Self { endpoints }
    }

    #[must_use]
    pub fn endpoints(&self) -> &AuthEndpoints {
        &self.endpoints
    }

    /// `POST /auth/supabase/login/email` with the validated credentials.
    ///
    /// # Errors
    ///
    /// Same contract as [`AuthStatusClient::fetch_current_user`].
    pub async fn login_with_email(&self, credentials: &Credentials) -> Result<AuthStatusResponse, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&self.endpoints.email_login())
                .credentials(web_sys::RequestCredentials::Include)
                .json(credentials)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            if !resp.ok() {
                return Err(AuthError::Http(resp.status()));
            }
            let body = resp.text().await.map_err(transport)?;
            decode_status(&body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
            Err(AuthError::Unavailable)
        }
    }

    /// `GET /auth/supabase/providers`. `None` when discovery fails; callers
    /// fall back to the built-in provider list.
    pub async fn fetch_providers(&self) -> Option<ProvidersResponse> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&self.endpoints.providers()).send().await.ok()?;
            if !resp.ok() {
                leptos::logging::warn!("provider discovery failed: {}", resp.status());
                return None;
            }
            resp.json::<ProvidersResponse>().await.ok()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }
}

#[async_trait(?Send)]
impl AuthStatusClient for HttpAuthClient {
    async fn fetch_current_user(&self) -> Result<AuthStatusResponse, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&self.endpoints.current_user())
                .credentials(web_sys::RequestCredentials::Include)
                .header("Content-Type", "application/json")
                .send()
                .await
                .map_err(transport)?;
            if !resp.ok() {
                return Err(AuthError::Http(resp.status()));
            }
            let body = resp.text().await.map_err(transport)?;
            decode_status(&body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthError::Unavailable)
        }
    }

    async fn logout(&self) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&self.endpoints.logout())
                .credentials(web_sys::RequestCredentials::Include)
                .header("Content-Type", "application/json")
                .send()
                .await
                .map_err(transport)?;
            if !resp.ok() {
                return Err(AuthError::Http(resp.status()));
            }
            let body = resp.text().await.map_err(transport)?;
            interpret_logout(decode_status(&body)?)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthError::Unavailable)
        }
    }
}
