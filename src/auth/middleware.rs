//! The per-request admin context and the middleware that guards mutating routes.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use time::{Duration, OffsetDateTime};

use crate::{
    AppState,
    auth::cookie::{extend_session_cookie_if_needed, get_token_from_cookies},
    endpoints,
};

/// Whether the current request carries a valid admin session.
///
/// Handlers take this as an argument instead of reading any shared flag, so
/// one visitor logging in never affects what another visitor may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// True when the session cookie holds an unexpired admin token.
    pub is_admin: bool,
}

impl AuthContext {
    /// Build the context from the decrypted cookies of a request.
    ///
    /// A missing, undecryptable or expired token yields a non-admin context.
    pub fn from_jar(jar: &PrivateCookieJar) -> Self {
        let now = OffsetDateTime::now_utc();
        let is_admin = get_token_from_cookies(jar)
            .map(|token| token.grants_admin(now))
            .unwrap_or(false);

        Self { is_admin }
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;

        Ok(Self::from_jar(&jar))
    }
}

/// The state needed for the admin guard.
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// How far into the future an active session is pushed on each admin request.
    pub cookie_duration: Duration,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// Middleware that only lets requests with an admin session through.
///
/// Requests without one are redirected to the dashboard without touching the
/// database. For admin requests the session expiry is extended to at least
/// `cookie_duration` from now.
///
/// **Note**: The app state must contain an `axum_extra::extract::cookie::Key` for decrypting and verifying the cookie contents.
pub async fn admin_guard(
    State(state): State<AuthState>,
    jar: PrivateCookieJar,
    request: Request,
    next: Next,
) -> Response {
    if !AuthContext::from_jar(&jar).is_admin {
        tracing::warn!(
            "Rejected {} {} without an admin session",
            request.method(),
            request.uri().path()
        );
        return Redirect::to(endpoints::ROOT).into_response();
    }

    let response = next.run(request).await;

    match extend_session_cookie_if_needed(jar, state.cookie_duration) {
        Ok(jar) => (jar, response).into_response(),
        Err(error) => {
            tracing::error!("Error extending session cookie: {error}. Leaving it unchanged.");
            response
        }
    }
}
