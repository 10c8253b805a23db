use mfsol_core::RunId;
use thiserror::Error;

/// Errors a [`crate::RunStore`] implementation can raise.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("run '{0}' was not found")]
    NotFound(RunId),

    #[error("run '{0}' already exists")]
    AlreadyExists(RunId),

    #[error("run invariant violated: {0}")]
    InvariantViolation(String),
}

impl From<StoreError> for mfsol_core::ErrorKind {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AlreadyExists(id) => {
                mfsol_core::ErrorKind::InvalidInput(format!("run '{id}' already exists"))
            }
            other => mfsol_core::ErrorKind::Internal(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
