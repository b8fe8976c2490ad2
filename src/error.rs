//! Error types.

use futures::task::SpawnError;

/// Failure reported by a position engine for a single request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComputeError {
    #[error("element is detached from the document")]
    Detached,
    #[error("position computation failed: {0}")]
    Failed(String),
}

/// Errors surfaced by spark-floating.
///
/// Compute and spawn failures never reach the caller; the binding logs them
/// at the computation boundary. Parse failures come back from `FromStr`.
#[derive(Debug, thiserror::Error)]
pub enum FloatingError {
    #[error(transparent)]
    Compute(#[from] ComputeError),
    #[error("failed to spawn position request: {0}")]
    Spawn(#[from] SpawnError),
    #[error("unknown placement '{0}'")]
    InvalidPlacement(String),
    #[error("unknown strategy '{0}'")]
    InvalidStrategy(String),
}
