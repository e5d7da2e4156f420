//! Engine error types

use thiserror::Error;

/// Errors from the runtime's control surface.
///
/// These cover stale or foreign handles only. Precondition violations inside
/// the engine (a step with interpolations but no target, pool misuse) are
/// programmer errors and panic at the call site instead of being surfaced
/// here.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenError {
    /// The sequence slot was reclaimed (or the key was never issued by this
    /// runtime).
    #[error("sequence handle is stale or unknown to this runtime")]
    StaleSequence,

    /// The timeline key is unknown to this runtime.
    #[error("timeline handle is unknown to this runtime")]
    UnknownTimeline,
}

/// Result type for runtime control operations.
pub type Result<T> = std::result::Result<T, TweenError>;
