use thiserror::Error;

/// Errors raised while building or solving a [`crate::model::Model`].
///
/// The Model IR never inspects domain semantics (spec §4.1); these variants
/// are the only ways a backend-neutral data structure can be misused.
#[derive(Error, Debug, Clone)]
pub enum IrError {
    #[error("variable '{0}' is already declared")]
    DuplicateVariable(String),

    #[error("constraint '{0}' is already declared")]
    DuplicateConstraint(String),

    #[error("non-finite coefficient or bound in '{0}'")]
    NonFinite(String),

    #[error("unknown parameter key '{0}'")]
    UnknownParameter(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl From<IrError> for mfsol_core::ErrorKind {
    fn from(e: IrError) -> Self {
        match e {
            IrError::Backend(msg) => mfsol_core::ErrorKind::SolverError { code: msg },
            other => mfsol_core::ErrorKind::Internal(other.to_string()),
        }
    }
}

pub type IrResult<T> = Result<T, IrError>;
