//! Rolling-window rate limiting keyed by client IP.
//!
//! Each limiter keeps a per-client deque of request timestamps and rejects a
//! request once the deque already holds `max_requests` entries younger than
//! the window. Two independent instances are layered by the router: a global
//! one covering every quotes route and a stricter one on the creation route.

use std::collections::{HashMap, VecDeque};
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;

/// In-process rolling-window rate limiter.
///
/// Cheap to clone; clones share the same window state.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    clients: Arc<Mutex<HashMap<IpAddr, VecDeque<Instant>>>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Record a request from `client`, rejecting it if the window is full.
    pub fn try_acquire(&self, client: IpAddr) -> Result<(), AppError> {
        self.try_acquire_at(client, Instant::now())
    }

    fn try_acquire_at(&self, client: IpAddr, now: Instant) -> Result<(), AppError> {
        let mut clients = self.clients.lock().unwrap_or_else(|e| e.into_inner());
        let hits = clients.entry(client).or_default();

        while let Some(&oldest) = hits.front() {
            if now.duration_since(oldest) >= self.window {
                hits.pop_front();
            } else {
                break;
            }
        }

        if hits.len() >= self.max_requests {
            tracing::debug!(%client, "Rate limit exceeded");
            return Err(AppError::RateLimited);
        }

        hits.push_back(now);
        Ok(())
    }
}

/// Axum middleware enforcing a [`RateLimiter`] against the peer address.
pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    limiter.try_acquire(addr.ip())?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(last_octet: u8) -> IpAddr {
        IpAddr::from([127, 0, 0, last_octet])
    }

    #[test]
    fn allows_up_to_max_requests() {
        let limiter = RateLimiter::new(5, Duration::from_secs(60));
        let now = Instant::now();
        for _ in 0..5 {
            assert!(limiter.try_acquire_at(client(1), now).is_ok());
        }
        assert!(matches!(
            limiter.try_acquire_at(client(1), now),
            Err(AppError::RateLimited)
        ));
    }

    #[test]
    fn window_expiry_frees_capacity() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.try_acquire_at(client(1), now).is_ok());
        assert!(limiter.try_acquire_at(client(1), now).is_err());
        assert!(limiter
            .try_acquire_at(client(1), now + Duration::from_secs(61))
            .is_ok());
    }

    #[test]
    fn partial_expiry_keeps_recent_hits() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.try_acquire_at(client(1), now).is_ok());
        assert!(limiter
            .try_acquire_at(client(1), now + Duration::from_secs(30))
            .is_ok());
        // First hit has expired, second has not: exactly one slot free.
        assert!(limiter
            .try_acquire_at(client(1), now + Duration::from_secs(65))
            .is_ok());
        assert!(limiter
            .try_acquire_at(client(1), now + Duration::from_secs(66))
            .is_err());
    }

    #[test]
    fn clients_are_limited_independently() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.try_acquire_at(client(1), now).is_ok());
        assert!(limiter.try_acquire_at(client(2), now).is_ok());
        assert!(limiter.try_acquire_at(client(1), now).is_err());
    }

    #[test]
    fn clones_share_window_state() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let clone = limiter.clone();
        let now = Instant::now();
        assert!(limiter.try_acquire_at(client(1), now).is_ok());
        assert!(clone.try_acquire_at(client(1), now).is_err());
    }
}
