//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Seconds after which one request of the quota is replenished.
const REPLENISH_SECONDS: u64 = 1;
/// Requests a single client may send in a burst.
const BURST_SIZE: u32 = 10;

/// Creates a rate limiter for comment posting keyed by the socket peer address.
///
/// # Limits
///
/// - **Rate**: 1 request replenished per second
/// - **Burst**: 10 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// Requires the server to provide `ConnectInfo<SocketAddr>`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/comment", post(post_comment_handler))
///     .layer(rate_limit::layer());
/// ```
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(REPLENISH_SECONDS)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Same limits as [`layer`], keyed by the client address reported by a reverse proxy.
///
/// The key is taken from `X-Forwarded-For`, `X-Real-IP` or `Forwarded`,
/// falling back to the peer address. Use only behind a trusted proxy.
pub fn proxied_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(REPLENISH_SECONDS)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
