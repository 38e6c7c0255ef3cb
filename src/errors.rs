//! Error classification shared by the client and the callback receiver.

/// Trait for errors that can be classified as transient or permanent.
///
/// The crate never retries on its own: every failed call is surfaced as-is.
/// This trait lets callers build their own retry policy on top of it.
///
/// # Examples
///
/// ```rust
/// use zenvia_sms::RetryableError;
///
/// enum MyError {
///     ConnectionReset,
///     BadCredentials,
/// }
///
/// impl RetryableError for MyError {
///     fn is_retryable(&self) -> bool {
///         matches!(self, MyError::ConnectionReset)
///     }
/// }
///
/// assert!(MyError::ConnectionReset.is_retryable());
/// assert!(MyError::BadCredentials.is_permanent());
/// ```
pub trait RetryableError {
    /// Returns true if this error represents a transient failure
    /// that might succeed when the same request is sent again.
    ///
    /// Examples: connection resets, timeouts, gateway 5xx responses.
    fn is_retryable(&self) -> bool;

    /// Returns true if sending the same request again cannot succeed
    /// until something on the caller side changes (credentials, payload).
    ///
    /// Default implementation is the negation of `is_retryable()`.
    fn is_permanent(&self) -> bool {
        !self.is_retryable()
    }
}
