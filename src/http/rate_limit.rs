use std::fmt;
use std::num::NonZeroU32;

use governor::{
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
    Quota,
};
use log::debug;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

type DirectLimiter = governor::RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Token bucket shared by every request issued through one client.
///
/// Refill is continuous (GCRA): one cell every `1 / rate` seconds, with up to
/// `burst` cells of headroom. Waiters are not queued; whichever caller next
/// finds a free cell takes it.
pub struct RateLimiter {
    rate: NonZeroU32,
    burst: NonZeroU32,
    inner: DirectLimiter,
}

impl fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("rate", &self.rate)
            .field("burst", &self.burst)
            .finish()
    }
}

impl RateLimiter {
    /// A limiter admitting `rate` requests per second with `burst` requests of headroom.
    /// The bucket starts full.
    pub fn new(rate: NonZeroU32, burst: NonZeroU32) -> Self {
        let quota = Quota::per_second(rate).allow_burst(burst);
        Self {
            rate,
            burst,
            inner: governor::RateLimiter::direct(quota),
        }
    }

    pub fn rate(&self) -> NonZeroU32 {
        self.rate
    }

    pub fn burst(&self) -> NonZeroU32 {
        self.burst
    }

    /// Takes one token if available. Never waits.
    pub fn try_acquire(&self) -> bool {
        self.inner.check().is_ok()
    }

    /// Waits until a token can be taken, or until `cancel` fires.
    ///
    /// Call [`try_acquire`](Self::try_acquire) first; this is the slow path.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<()> {
        debug!("rate limiter: out of tokens, waiting");
        tokio::select! {
            _ = cancel.cancelled() => Err(Error::Cancelled),
            _ = self.inner.until_ready() => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn nz(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn burst_then_exhausted() {
        let lim = RateLimiter::new(nz(1), nz(3));
        assert!(lim.try_acquire());
        assert!(lim.try_acquire());
        assert!(lim.try_acquire());
        assert!(!lim.try_acquire());
    }

    #[test]
    fn refills_over_time() {
        let lim = RateLimiter::new(nz(20), nz(1));
        assert!(lim.try_acquire());
        assert!(!lim.try_acquire());
        std::thread::sleep(Duration::from_millis(80));
        assert!(lim.try_acquire());
    }

    #[tokio::test]
    async fn acquire_waits_instead_of_rejecting() {
        let lim = RateLimiter::new(nz(20), nz(1));
        let cancel = CancellationToken::new();
        let start = Instant::now();
        for _ in 0..4 {
            if !lim.try_acquire() {
                lim.acquire(&cancel).await.unwrap();
            }
        }
        // One token up front, three more at 50ms intervals.
        assert!(
            start.elapsed() >= Duration::from_millis(140),
            "elapsed {:?}",
            start.elapsed()
        );
    }

    #[tokio::test]
    async fn acquire_honours_cancellation() {
        let lim = RateLimiter::new(nz(1), nz(1));
        assert!(lim.try_acquire());
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });
        let start = Instant::now();
        let err = lim.acquire(&cancel).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert!(start.elapsed() < Duration::from_millis(900));
    }

    #[tokio::test]
    async fn slowest_rate_with_cancelled_token_returns_cancelled() {
        let lim = RateLimiter::new(nz(1), nz(1));
        assert!(lim.try_acquire());
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = lim.acquire(&cancel).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }
}
