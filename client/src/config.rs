//! Client configuration and the reconnect policy.
//!
//! Reconnection used to be an opaque property of the transport; here it is
//! an explicit, configurable policy so the behavior is verifiable: bounded
//! retries, exponential backoff, a hard cap, and jitter on top.

use std::time::Duration;

use rand::Rng;

/// Fraction of the base backoff added as random jitter, at most.
const JITTER_FRACTION: f64 = 0.2;

/// How a client reconnects after an established connection drops.
#[derive(Clone, Copy, Debug)]
pub struct ReconnectPolicy {
    /// Attempts before giving up and surfacing a terminal event.
    pub max_retries: u32,
    /// Delay before the first attempt.
    pub initial_backoff: Duration,
    /// Upper bound on the delay between attempts.
    pub max_backoff: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(5),
        }
    }
}

impl ReconnectPolicy {
    /// Deterministic backoff for the given attempt (1-based): the initial
    /// delay doubled per attempt, capped at `max_backoff`.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let doublings = attempt.saturating_sub(1).min(16);
        self.initial_backoff
            .saturating_mul(1_u32 << doublings)
            .min(self.max_backoff)
    }

    /// [`Self::backoff`] with up to 20% random jitter added, so a relay
    /// restart does not see every client redial on the same tick.
    #[must_use]
    pub fn jittered_backoff(&self, attempt: u32) -> Duration {
        let base = self.backoff(attempt);
        base.mul_f64(1.0 + rand::rng().random_range(0.0..=JITTER_FRACTION))
    }
}

/// Everything needed to construct a [`crate::net::RelayClient`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Websocket URL of the relay, e.g. `ws://127.0.0.1:3000/ws`.
    pub url: String,
    pub reconnect: ReconnectPolicy,
}

impl ClientConfig {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), reconnect: ReconnectPolicy::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ReconnectPolicy {
        ReconnectPolicy {
            max_retries: 4,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(600),
        }
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = policy();
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
    }

    #[test]
    fn backoff_caps_at_max() {
        let policy = policy();
        assert_eq!(policy.backoff(4), Duration::from_millis(600));
        assert_eq!(policy.backoff(30), Duration::from_millis(600));
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let policy = policy();
        for attempt in 1..=6 {
            let base = policy.backoff(attempt);
            let jittered = policy.jittered_backoff(attempt);
            assert!(jittered >= base);
            assert!(jittered <= base.mul_f64(1.0 + JITTER_FRACTION));
        }
    }

    #[test]
    fn default_policy_is_bounded() {
        let policy = ReconnectPolicy::default();
        assert!(policy.max_retries > 0);
        assert!(policy.backoff(policy.max_retries) <= policy.max_backoff);
    }
}
