//! Derivation of the site domain a page URL belongs to.
//!
//! The site domain is the `scheme://host[:port]` prefix of a URL and is the
//! partition key of the per-domain structures and recent-comment index.

use url::{ParseError, Url};

/// Errors that can occur while deriving a site domain.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SiteDomainError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Returns the site domain (`scheme://host[:port]`) of a page URL.
///
/// # Rules
///
/// 1. **Missing scheme**: `example.com/page` is read as `https://example.com/page`
/// 2. **Protocol**: Only HTTP and HTTPS are allowed
/// 3. **Hostname**: Lowercased by the URL parser
/// 4. **Default ports**: Dropped (80 for HTTP, 443 for HTTPS)
/// 5. **Trailing slash**: Never present in the result
///
/// # Errors
///
/// Returns [`SiteDomainError::InvalidFormat`] for malformed URLs,
/// [`SiteDomainError::UnsupportedProtocol`] for non-HTTP(S) schemes and
/// [`SiteDomainError::MissingHost`] when no host can be found.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     site_domain("https://Example.com/blog/1?x=1").unwrap(),
///     "https://example.com"
/// );
/// assert_eq!(site_domain("example.com/blog").unwrap(), "https://example.com");
/// ```
pub fn site_domain(raw_url: &str) -> Result<String, SiteDomainError> {
    let trimmed = raw_url.trim();

    let url = match Url::parse(trimmed) {
        // `host:port/path` parses with the host as its scheme.
        Ok(_) if is_bare_host_with_port(trimmed) => {
            Url::parse(&format!("https://{trimmed}"))
                .map_err(|e| SiteDomainError::InvalidFormat(e.to_string()))?
        }
        Ok(url) => url,
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{trimmed}"))
            .map_err(|e| SiteDomainError::InvalidFormat(e.to_string()))?,
        Err(ParseError::EmptyHost) => return Err(SiteDomainError::MissingHost),
        Err(e) => return Err(SiteDomainError::InvalidFormat(e.to_string())),
    };

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(SiteDomainError::UnsupportedProtocol),
    }

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or(SiteDomainError::MissingHost)?;

    let domain = match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    };

    Ok(domain.trim_end_matches('/').to_string())
}

/// `example.com:8080/page`: no `://` and only digits between the first `:`
/// and the start of the path.
fn is_bare_host_with_port(raw: &str) -> bool {
    if raw.contains("://") {
        return false;
    }

    let Some((_, rest)) = raw.split_once(':') else {
        return false;
    };
    let port = rest.split(['/', '?', '#']).next().unwrap_or_default();

    !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_domain_strips_path_and_query() {
        assert_eq!(
            site_domain("https://example.com/blog/1?ref=feed#top").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_site_domain_keeps_http_scheme() {
        assert_eq!(
            site_domain("http://example.com/page").unwrap(),
            "http://example.com"
        );
    }

    #[test]
    fn test_site_domain_defaults_to_https() {
        assert_eq!(
            site_domain("example.com/page").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_site_domain_defaults_to_https_with_port() {
        assert_eq!(
            site_domain("example.com:8080/page").unwrap(),
            "https://example.com:8080"
        );
        assert_eq!(
            site_domain("localhost:3000/x").unwrap(),
            "https://localhost:3000"
        );
    }

    #[test]
    fn test_site_domain_rejects_mailto() {
        assert_eq!(
            site_domain("mailto:someone@example.com"),
            Err(SiteDomainError::UnsupportedProtocol)
        );
    }

    #[test]
    fn test_site_domain_lowercases_host() {
        assert_eq!(
            site_domain("https://Blog.EXAMPLE.com/Post").unwrap(),
            "https://blog.example.com"
        );
    }

    #[test]
    fn test_site_domain_keeps_custom_port() {
        assert_eq!(
            site_domain("http://localhost:3000/page").unwrap(),
            "http://localhost:3000"
        );
    }

    #[test]
    fn test_site_domain_drops_default_port() {
        assert_eq!(
            site_domain("https://example.com:443/page").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_site_domain_root_url() {
        assert_eq!(
            site_domain("https://example.com/").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_site_domain_trims_whitespace() {
        assert_eq!(
            site_domain("  https://example.com/a  ").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_site_domain_rejects_javascript() {
        assert_eq!(
            site_domain("javascript:alert(1)"),
            Err(SiteDomainError::UnsupportedProtocol)
        );
    }

    #[test]
    fn test_site_domain_rejects_ftp() {
        assert_eq!(
            site_domain("ftp://files.example.com/x"),
            Err(SiteDomainError::UnsupportedProtocol)
        );
    }

    #[test]
    fn test_site_domain_rejects_missing_host() {
        assert!(site_domain("https://").is_err());
    }
}
