use mfsol_core::RunId;
use thiserror::Error;

/// Errors the Run Coordinator itself can raise, on top of the [`mfsol_core::ErrorKind`]
/// a run settles into once it exists (spec §7).
#[derive(Error, Debug, Clone)]
pub enum CoordinatorError {
    /// A resubmission with an identifier already present in the Run Store
    /// (spec §7 "Retry policy: ... a resubmission with the same identifier
    /// is rejected").
    #[error("run '{0}' already exists")]
    AlreadyExists(RunId),

    /// The Run Store could not be reached; the run's true state is unknown
    /// to the caller (spec §7 `store_unavailable`).
    #[error("run store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("run '{0}' was not found")]
    NotFound(RunId),
}

impl From<CoordinatorError> for mfsol_core::ErrorKind {
    fn from(e: CoordinatorError) -> Self {
        match e {
            CoordinatorError::AlreadyExists(id) => mfsol_core::ErrorKind::InvalidInput(format!("run '{id}' already exists")),
            CoordinatorError::StoreUnavailable(msg) => mfsol_core::ErrorKind::StoreUnavailable(msg),
            CoordinatorError::NotFound(id) => mfsol_core::ErrorKind::Internal(format!("run '{id}' was not found")),
        }
    }
}

impl From<mfsol_store::StoreError> for CoordinatorError {
    fn from(e: mfsol_store::StoreError) -> Self {
        match e {
            mfsol_store::StoreError::NotFound(id) => CoordinatorError::NotFound(id),
            mfsol_store::StoreError::AlreadyExists(id) => CoordinatorError::AlreadyExists(id),
            other => CoordinatorError::StoreUnavailable(other.to_string()),
        }
    }
}

pub type CoordinatorResult<T> = Result<T, CoordinatorError>;
