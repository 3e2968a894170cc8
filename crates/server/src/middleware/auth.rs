//! Authentication extractor.
//!
//! Every entity route requires a static bearer token configured via
//! `VAXTRACK_API_TOKEN`. Account management itself lives in the identity
//! provider; this service only checks that the caller presents the token.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;

use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_auth: RequireAuth) -> impl IntoResponse {
///     "hello"
/// }
/// ```
pub struct RequireAuth;

/// Error returned when the bearer token is missing or wrong.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, "missing or invalid bearer token").into_response()
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AuthRejection)?;

        let token = header.strip_prefix("Bearer ").ok_or(AuthRejection)?;

        if token != state.config().api_token.expose_secret() {
            return Err(AuthRejection);
        }

        Ok(Self)
    }
}
