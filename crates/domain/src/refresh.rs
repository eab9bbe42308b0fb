use std::time::Duration;

/// Exponent cap keeping `base * 2^attempt` well inside `Duration` range.
const MAX_EXPONENT: u32 = 16;

/// Refresh schedule for a remote-backed database manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdatePolicy {
    pub update_interval: Duration,
    pub retry_base: Duration,
    pub max_retry_interval: Duration,
}

impl UpdatePolicy {
    pub fn new(update_interval: Duration, max_retry_interval: Duration) -> Self {
        Self {
            update_interval,
            retry_base: Duration::from_secs(5),
            max_retry_interval,
        }
    }

    pub fn with_retry_base(mut self, retry_base: Duration) -> Self {
        self.retry_base = retry_base;
        self
    }

    pub fn backoff(&self) -> BackoffPolicy {
        BackoffPolicy::new(self.retry_base, self.max_retry_interval)
    }
}

impl Default for UpdatePolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(86_400), Duration::from_secs(3_600))
    }
}

/// Pure retry-delay rule: `min(base * 2^attempt + jitter, max)`.
///
/// Jitter is supplied by the caller so the policy itself stays deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    base: Duration,
    max: Duration,
}

impl BackoffPolicy {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base: base.min(max),
            max,
        }
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn delay(&self, attempt: u32, jitter: Duration) -> Duration {
        let doubled = self
            .base
            .saturating_mul(1u32 << attempt.min(MAX_EXPONENT));
        doubled.saturating_add(jitter).min(self.max)
    }
}

/// Retry progress owned by the refresh task.
///
/// `delay()` is `None` outside of a retry run, in which case the task sleeps
/// for the regular update interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackoffState {
    attempt: u32,
    delay: Option<Duration>,
}

impl BackoffState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    /// Record a failure and return the next retry delay.
    pub fn advance(&mut self, policy: &BackoffPolicy, jitter: Duration) -> Duration {
        let delay = policy.delay(self.attempt, jitter);
        self.attempt = self.attempt.saturating_add(1);
        self.delay = Some(delay);
        delay
    }

    /// Record a success: back to the regular schedule.
    pub fn reset(&mut self) {
        self.attempt = 0;
        self.delay = None;
    }
}
