use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use liftlog::session::Session;
use log::trace;
use std::convert::Infallible;

use crate::state::AppState;

/// The session for whoever sent the request.
///
/// A missing, malformed or rejected `Authorization: Bearer` header does not fail
/// extraction; it yields an anonymous session. Reads then come back empty and
/// mutations answer 401.
pub struct CurrentSession(pub Session);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .and_then(|token| state.identity.resolve(token));

        if caller.is_none() {
            trace!("{} {} without a usable identity", parts.method, parts.uri.path());
        }
        Ok(CurrentSession(state.session(caller)))
    }
}
