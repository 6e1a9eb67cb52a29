//! Uniform answer for `OPTIONS` requests.
//!
//! The CORS layer answers real preflights itself (with 200), and a bare
//! `OPTIONS` without preflight headers falls through to the router. Browsers
//! only need the headers, so both cases are collapsed into an empty 204 that
//! keeps every `access-control-*` header the CORS layer produced.

use axum::{
    body::Body,
    extract::Request,
    http::{Method, StatusCode, header},
    middleware::Next,
    response::Response,
};

pub async fn preflight_middleware(req: Request, next: Next) -> Response {
    if req.method() != Method::OPTIONS {
        return next.run(req).await;
    }

    let response = next.run(req).await;
    let (mut parts, _body) = response.into_parts();
    parts.status = StatusCode::NO_CONTENT;
    parts.headers.remove(header::CONTENT_TYPE);
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, Body::empty())
}
