use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{
    pkg::{internal::auth::Session, server::state::AppState},
    prelude::{Error, Result},
};

/// Resolves the caller's identity before any job operation runs. The
/// owner id is never taken from request input, only from the verified
/// session.
pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let jar = CookieJar::from_headers(&headers);
    let maybe_cookie = jar.get("_Host_session").filter(|c| !c.value().is_empty());
    if let Some(cookie) = maybe_cookie {
        if let Ok(user) = Session::resolve_user(&state, cookie.value()).await {
            request.extensions_mut().insert(Arc::new(user));
            return Ok(next.run(request).await);
        }
    }
    tracing::warn!("session missing or invalid, authentication denied");
    Err(Error::Unauthenticated)
}
