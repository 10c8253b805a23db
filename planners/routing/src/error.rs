use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RoutingError {
    #[error("duplicate task id '{0}'")]
    DuplicateTask(String),

    #[error("duplicate inspector id '{0}'")]
    DuplicateInspector(String),

    #[error("task '{0}' has a negative duration")]
    NegativeDuration(String),

    #[error("task '{0}' has an empty time window (tw_start > tw_end)")]
    EmptyTimeWindow(String),

    #[error(transparent)]
    Ir(#[from] mfsol_ir::IrError),
}

impl From<RoutingError> for mfsol_core::ErrorKind {
    fn from(e: RoutingError) -> Self {
        match e {
            RoutingError::Ir(inner) => inner.into(),
            other => mfsol_core::ErrorKind::InvalidInput(other.to_string()),
        }
    }
}

pub type RoutingResult<T> = Result<T, RoutingError>;
