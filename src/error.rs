//! Error types, following the `#[derive(thiserror::Error)]` enum-per-crate
//! convention seen in `core/store/src/node_storage/opener.rs`.

use std::error::Error as StdError;
use std::fmt;

/// The one fatal invariant breach the core can raise (spec §7): `shutdown`
/// called while the pending queue is non-empty. A library never aborts the
/// process on the embedder's behalf; the embedder decides how to react,
/// mirroring how `nearcore/src/config_validate.rs` returns validation errors
/// up to `neard`'s `main` instead of aborting inline.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("shutdown called with {pending} request(s) still pending")]
    ShutdownWithPendingRequests { pending: usize },
}

/// Opaque failure signalled by the consumer's `submit` callback (spec §4.2,
/// §7). The scheduler never inspects the cause; it only propagates it to the
/// caller of `dispatch`.
#[derive(Debug)]
pub struct SubmitError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "submit failed: {}", self.0)
    }
}

impl StdError for SubmitError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.0.as_ref())
    }
}

/// Result of a `dispatch` call that was interrupted by a submit failure:
/// how many requests were successfully submitted before the failure, plus
/// the failure itself. The failed request has already been removed from the
/// pending queue (spec §4.2's failure semantics) and is not retried here.
#[derive(Debug)]
pub struct DispatchError {
    pub submitted_before_failure: usize,
    pub cause: SubmitError,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dispatch failed after submitting {} request(s): {}",
            self.submitted_before_failure, self.cause
        )
    }
}

impl StdError for DispatchError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.cause)
    }
}
