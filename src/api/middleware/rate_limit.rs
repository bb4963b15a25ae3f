//! Rate limiting middleware using token bucket algorithm.
//!
//! Limits are keyed per client IP. Behind a trusted reverse proxy the IP comes
//! from `X-Forwarded-For` / `X-Real-IP` / `Forwarded`; otherwise from the socket
//! peer address, which requires serving with `ConnectInfo<SocketAddr>`.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Token bucket parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    /// Seconds needed to refill one request.
    pub per_second: u64,
    pub burst: u32,
}

/// Session pages and static assets.
///
/// - **Refill**: one request every 2 seconds
/// - **Burst**: 100 requests
pub const PAGES: Quota = Quota {
    per_second: 2,
    burst: 100,
};

/// Login and logout.
///
/// - **Refill**: one request every 4 seconds
/// - **Burst**: 10 requests
///
/// Slows down token guessing.
pub const SECURE: Quota = Quota {
    per_second: 4,
    burst: 10,
};

fn governor_layer<K>(
    key_extractor: K,
    quota: Quota,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>
where
    K: KeyExtractor,
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(quota.per_second)
            .burst_size(quota.burst)
            .key_extractor(key_extractor)
            .finish()
            .expect("rate limit quota values are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Applies a per-IP rate limit to every route of `router`.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let login = rate_limit::apply(web::routes::public_routes(), behind_proxy, rate_limit::SECURE);
/// ```
pub fn apply<S>(router: Router<S>, behind_proxy: bool, quota: Quota) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        router.layer(governor_layer(SmartIpKeyExtractor, quota))
    } else {
        router.layer(governor_layer(PeerIpKeyExtractor, quota))
    }
}
