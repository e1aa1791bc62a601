use crate::common::Authentication;
use crate::domains::auth::JwtVerifier;
use axum::{
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// JWT authentication middleware
///
/// Verifies the bearer token (if any) and adds an [`Authentication`] to request
/// extensions. Never rejects the request itself: resolvers run the access
/// pipeline, and routes like `/health` need no token at all.
pub async fn jwt_auth_middleware(
    verifier: Arc<JwtVerifier>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let authentication = authenticate_request(request.headers(), &verifier).await;

    match &authentication {
        Authentication::Verified(identity) => {
            debug!(sub = ?identity.subject(), "authenticated request");
        }
        Authentication::Unauthenticated(reason) => {
            debug!(reason = %reason, "unauthenticated request");
        }
    }

    request.extensions_mut().insert(authentication);
    next.run(request).await
}

/// Verify the request's bearer token, if it has one
pub async fn authenticate_request(headers: &HeaderMap, verifier: &JwtVerifier) -> Authentication {
    let token = match bearer_token(headers) {
        Ok(Some(token)) => token,
        Ok(None) => return Authentication::anonymous(),
        Err(reason) => return Authentication::Unauthenticated(reason.to_string()),
    };

    match verifier.verify(token).await {
        Ok(identity) => Authentication::Verified(identity),
        Err(err) => Authentication::Unauthenticated(err.to_string()),
    }
}

/// Token from `Authorization: Bearer <token>`; the scheme is matched case-insensitively
fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, &'static str> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| "authorization header is not valid ASCII")?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or("authorization header is not a bearer token")?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err("authorization header is not a bearer token");
    }

    let token = token.trim();
    if token.is_empty() {
        return Err("bearer token is empty");
    }
    Ok(Some(token))
}
