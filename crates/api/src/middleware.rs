//! Identity middleware.
//!
//! Session/token verification happens at the edge and is out of scope here;
//! the gateway forwards the resolved caller as `X-User-Id` / `X-Role`
//! headers, which this middleware turns into an explicit [`IdentityContext`]
//! so handlers never read ambient user state.

use axum::{
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use brocante_core::{Identity, Role, UserId};

use crate::context::IdentityContext;

pub async fn identity_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let identity = extract_identity(req.headers())?;

    req.extensions_mut().insert(IdentityContext::new(identity));

    Ok(next.run(req).await)
}

fn extract_identity(headers: &HeaderMap) -> Result<Identity, StatusCode> {
    let user_id = headers
        .get("x-user-id")
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_str()
        .map_err(|_| StatusCode::UNAUTHORIZED)?
        .parse::<UserId>()
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let role = match headers.get("x-role") {
        None => Role::Buyer,
        Some(value) => value
            .to_str()
            .map_err(|_| StatusCode::UNAUTHORIZED)?
            .parse::<Role>()
            .map_err(|_| StatusCode::UNAUTHORIZED)?,
    };

    Ok(Identity::new(user_id, role))
}
