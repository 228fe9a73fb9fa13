/// Retry primitives for clients of flaky external services.
///
/// This crate provides the pieces the mirror node client composes into its
/// request loop:
///
/// - **Retry Policy**: attempt ceiling and geometric backoff, validated on construction
/// - **Retry State**: per-call attempt counter and current delay
/// - **Classification**: which HTTP statuses are worth another attempt
///
/// # Example
///
/// ```rust,ignore
/// use mk_resilience::{classify_status, FailureClass, RetryPolicy, RetryState};
///
/// let mut state = RetryState::new(RetryPolicy::default());
///
/// loop {
///     state.begin_attempt();
///     match make_request().await {
///         Ok(result) => return Ok(result),
///         Err(e) if classify(&e) == FailureClass::Terminal => return Err(e),
///         Err(e) if state.is_last_attempt() => return Err(e),
///         Err(_) => tokio::time::sleep(state.advance()).await,
///     }
/// }
/// ```
pub mod retry;

pub use retry::{classify_status, FailureClass, RetryPolicy, RetryPolicyError, RetryState};
