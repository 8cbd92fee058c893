//! Store error types.

/// Errors from the schedule store.
///
/// "Not found" on a by-id lookup is not an error; store methods return
/// `Ok(None)` for that. These variants all mean the store itself failed,
/// and callers surface them distinctly from bad input.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Establishing the store failed (unreachable, bad snapshot, etc.)
    #[error("store connection failed: {0}")]
    Connection(String),

    /// Establishing the store exceeded the configured bound
    #[error("store connection timed out after {0} ms")]
    ConnectTimeout(u64),

    /// A read against an established store failed
    #[error("store query failed: {0}")]
    Query(String),
}
