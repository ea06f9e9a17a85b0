use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::models::session::SessionContext;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Reads who is calling from the request and hands it to handlers as a
/// `SessionContext` extension. Anonymous callers are allowed through.
pub async fn session_middleware(headers: HeaderMap, mut request: Request, next: Next) -> Response {
    let session = session_from_headers(&headers);
    request.extensions_mut().insert(session);
    next.run(request).await
}

pub fn session_from_headers(headers: &HeaderMap) -> SessionContext {
    let bearer_token = headers
        .get("authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string);

    let user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|header| header.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    SessionContext { bearer_token, user_id }
}
