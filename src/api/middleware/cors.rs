//! CORS headers for local development hosts.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// Adds permissive CORS headers to requests addressed to a localhost host.
///
/// When [`AppState::cors_localhost`] is set and the `Host` header contains
/// `localhost`:
///
/// - `OPTIONS` preflights are answered directly with `204 No Content`
/// - every other response gets the CORS headers appended
///
/// Requests to any other host pass through untouched.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/comment", post(post_comment_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), cors::layer));
/// ```
pub async fn layer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if !state.cors_localhost || !is_localhost(req.headers()) {
        return next.run(req).await;
    }

    let mut response = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );

    response
}

fn is_localhost(headers: &HeaderMap) -> bool {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|host| host.to_ascii_lowercase().contains("localhost"))
}
