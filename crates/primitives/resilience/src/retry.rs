/// Bounded retry strategy with geometric backoff.
///
/// A request is attempted at most [`RetryPolicy::max_attempts`] times. Between two
/// attempts the caller sleeps for the current delay, which starts at
/// [`RetryPolicy::initial_delay`], is multiplied by [`RetryPolicy::backoff_multiplier`]
/// after every sleep and never exceeds [`RetryPolicy::max_delay`].
use std::time::Duration;

/// Rejected [`RetryPolicy`] parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RetryPolicyError {
    #[error("A retry policy needs at least one attempt")]
    ZeroAttempts,
    #[error("Initial delay {initial:?} is greater than the maximum delay {max:?}")]
    InitialExceedsMax { initial: Duration, max: Duration },
    #[error("Backoff multiplier must be a finite number >= 1, got {0}")]
    InvalidMultiplier(f64),
}

/// Configuration for the retry loop
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_attempts: usize,
    initial_delay: Duration,
    max_delay: Duration,
    backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(
        max_attempts: usize,
        initial_delay: Duration,
        max_delay: Duration,
        backoff_multiplier: f64,
    ) -> Result<Self, RetryPolicyError> {
        if max_attempts == 0 {
            return Err(RetryPolicyError::ZeroAttempts);
        }
        if initial_delay > max_delay {
            return Err(RetryPolicyError::InitialExceedsMax { initial: initial_delay, max: max_delay });
        }
        if !backoff_multiplier.is_finite() || backoff_multiplier < 1.0 {
            return Err(RetryPolicyError::InvalidMultiplier(backoff_multiplier));
        }
        Ok(Self { max_attempts, initial_delay, max_delay, backoff_multiplier })
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    pub fn backoff_multiplier(&self) -> f64 {
        self.backoff_multiplier
    }

    /// Delay slept before the 1-based `attempt`.
    ///
    /// Returns [None] for the first attempt (nothing to wait for) and for attempts past the ceiling.
    pub fn delay_before_attempt(&self, attempt: usize) -> Option<Duration> {
        if attempt < 2 || attempt > self.max_attempts {
            return None;
        }
        let mut delay = self.initial_delay;
        for _ in 2..attempt {
            if delay == self.max_delay {
                break;
            }
            delay = self.grow(delay);
        }
        Some(delay)
    }

    fn grow(&self, delay: Duration) -> Duration {
        // Computed on nanoseconds and rounded so integral multipliers stay exact.
        let grown = (delay.as_nanos() as f64 * self.backoff_multiplier).round();
        if grown >= self.max_delay.as_nanos() as f64 {
            self.max_delay
        } else {
            Duration::from_nanos(grown as u64)
        }
    }
}

/// How a failed attempt should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The request itself is at fault, trying again cannot help.
    Terminal,
    /// Transient failure, worth another attempt after backing off.
    Retryable,
}

/// Classify a non-success HTTP status.
///
/// Client errors are terminal, except `404` (the index service lags behind consensus, so a
/// resource created moments ago may not be visible yet) and `429` (rate limiting).
pub fn classify_status(status: u16) -> FailureClass {
    match status {
        404 | 429 => FailureClass::Retryable,
        400..=499 => FailureClass::Terminal,
        _ => FailureClass::Retryable,
    }
}

/// State tracker for the attempts of one logical request
#[derive(Debug, Clone)]
pub struct RetryState {
    policy: RetryPolicy,
    attempt: usize,
    delay: Duration,
}

impl RetryState {
    pub fn new(policy: RetryPolicy) -> Self {
        let delay = policy.initial_delay;
        Self { policy, attempt: 0, delay }
    }

    /// Mark the start of a new attempt and return its 1-based number.
    pub fn begin_attempt(&mut self) -> usize {
        self.attempt += 1;
        self.attempt
    }

    pub fn attempt(&self) -> usize {
        self.attempt
    }

    /// Whether another attempt is still allowed.
    pub fn can_retry(&self) -> bool {
        self.attempt < self.policy.max_attempts
    }

    pub fn is_last_attempt(&self) -> bool {
        !self.can_retry()
    }

    /// Delay to sleep before the next attempt, growing the delay for the one after.
    pub fn advance(&mut self) -> Duration {
        let current = self.delay;
        self.delay = self.policy.grow(current);
        current
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn policy(attempts: usize, initial_ms: u64, max_ms: u64, multiplier: f64) -> RetryPolicy {
        RetryPolicy::new(attempts, Duration::from_millis(initial_ms), Duration::from_millis(max_ms), multiplier)
            .expect("valid policy")
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 5);
        assert_eq!(policy.initial_delay(), Duration::from_secs(2));
        assert_eq!(policy.max_delay(), Duration::from_secs(30));
        assert_eq!(policy.backoff_multiplier(), 2.0);
    }

    #[rstest]
    #[case(0, 1, 2, 2.0, RetryPolicyError::ZeroAttempts)]
    #[case(3, 5, 2, 2.0, RetryPolicyError::InitialExceedsMax { initial: Duration::from_millis(5), max: Duration::from_millis(2) })]
    #[case(3, 1, 2, 0.5, RetryPolicyError::InvalidMultiplier(0.5))]
    fn test_invalid_policies(
        #[case] attempts: usize,
        #[case] initial_ms: u64,
        #[case] max_ms: u64,
        #[case] multiplier: f64,
        #[case] expected: RetryPolicyError,
    ) {
        let res =
            RetryPolicy::new(attempts, Duration::from_millis(initial_ms), Duration::from_millis(max_ms), multiplier);
        assert_eq!(res, Err(expected));
    }

    #[test]
    fn test_nan_multiplier_rejected() {
        let res = RetryPolicy::new(3, Duration::ZERO, Duration::from_secs(1), f64::NAN);
        assert!(matches!(res, Err(RetryPolicyError::InvalidMultiplier(_))));
    }

    #[rstest]
    #[case(2, 100)]
    #[case(3, 200)]
    #[case(4, 400)]
    #[case(5, 800)]
    #[case(6, 1000)]
    #[case(7, 1000)]
    fn test_delay_before_attempt_is_clamped_geometric(#[case] attempt: usize, #[case] expected_ms: u64) {
        let policy = policy(7, 100, 1000, 2.0);
        assert_eq!(policy.delay_before_attempt(attempt), Some(Duration::from_millis(expected_ms)));
    }

    #[test]
    fn test_no_delay_outside_attempt_range() {
        let policy = policy(3, 100, 1000, 2.0);
        assert_eq!(policy.delay_before_attempt(1), None);
        assert_eq!(policy.delay_before_attempt(4), None);
    }

    #[test]
    fn test_state_matches_closed_form() {
        let policy = policy(8, 50, 900, 3.0);
        let mut state = RetryState::new(policy.clone());
        state.begin_attempt();

        while state.can_retry() {
            let slept = state.advance();
            let attempt = state.begin_attempt();
            let closed_form = (50.0 * 3f64.powi(attempt as i32 - 2)).min(900.0);
            assert_eq!(slept, Duration::from_millis(closed_form as u64), "attempt {attempt}");
            assert_eq!(Some(slept), policy.delay_before_attempt(attempt));
        }

        assert_eq!(state.attempt(), 8);
        assert!(state.is_last_attempt());
    }

    #[test]
    fn test_single_attempt_never_retries() {
        let mut state = RetryState::new(policy(1, 10, 10, 1.0));
        assert_eq!(state.begin_attempt(), 1);
        assert!(state.is_last_attempt());
    }

    #[rstest]
    #[case(400, FailureClass::Terminal)]
    #[case(401, FailureClass::Terminal)]
    #[case(403, FailureClass::Terminal)]
    #[case(404, FailureClass::Retryable)]
    #[case(405, FailureClass::Terminal)]
    #[case(422, FailureClass::Terminal)]
    #[case(429, FailureClass::Retryable)]
    #[case(499, FailureClass::Terminal)]
    #[case(500, FailureClass::Retryable)]
    #[case(502, FailureClass::Retryable)]
    #[case(503, FailureClass::Retryable)]
    fn test_classify_status(#[case] status: u16, #[case] expected: FailureClass) {
        assert_eq!(classify_status(status), expected);
    }
}
