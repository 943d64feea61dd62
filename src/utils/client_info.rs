//! Client metadata extraction from HTTP request headers.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};
use std::convert::Infallible;
use std::net::SocketAddr;

/// Client metadata recorded with every comment.
///
/// Extraction never fails: the peer address is read from [`ConnectInfo`]
/// when the server provides it, and missing values become empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMeta {
    pub ip: String,
    pub user_agent: String,
}

impl<S: Send + Sync> FromRequestParts<S> for ClientMeta {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Ok(Self {
            ip: client_ip(&parts.headers, peer),
            user_agent: user_agent(&parts.headers),
        })
    }
}

/// Returns the client address for request logging.
///
/// Uses the first entry of `X-Forwarded-For` when present (the original
/// client as seen by the first proxy), otherwise the peer IP of the socket.
/// Returns an empty string when neither is known.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match (forwarded, peer) {
        (Some(ip), _) => ip.to_string(),
        (None, Some(addr)) => addr.ip().to_string(),
        (None, None) => String::new(),
    }
}

/// Returns the `User-Agent` header, or an empty string if absent or not UTF-8.
pub fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("192.0.2.10:51234".parse().unwrap())
    }

    #[test]
    fn test_client_ip_from_peer() {
        let headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, peer()), "192.0.2.10");
    }

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.5, 10.0.0.1"),
        );

        assert_eq!(client_ip(&headers, peer()), "203.0.113.5");
    }

    #[test]
    fn test_client_ip_ignores_empty_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));

        assert_eq!(client_ip(&headers, peer()), "192.0.2.10");
    }

    #[test]
    fn test_client_ip_unknown() {
        let headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, None), "");
    }

    #[test]
    fn test_user_agent_present() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));

        assert_eq!(user_agent(&headers), "Mozilla/5.0");
    }

    #[test]
    fn test_user_agent_missing() {
        assert_eq!(user_agent(&HeaderMap::new()), "");
    }

    #[tokio::test]
    async fn test_client_meta_from_request_parts() {
        let mut request = axum::http::Request::builder()
            .header(header::USER_AGENT, "curl/8.0")
            .body(())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo::<SocketAddr>("192.0.2.10:51234".parse().unwrap()));
        let (mut parts, _) = request.into_parts();

        let meta = ClientMeta::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(meta.ip, "192.0.2.10");
        assert_eq!(meta.user_agent, "curl/8.0");
    }
}
