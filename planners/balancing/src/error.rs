use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum BalancingError {
    #[error("duplicate task id '{0}'")]
    DuplicateTask(String),

    #[error("task '{0}' has a non-positive duration")]
    NonPositiveDuration(String),

    #[error("precedence references unknown task id '{0}'")]
    DanglingPrecedence(String),

    #[error("incompatibility references unknown task id '{0}'")]
    DanglingIncompatibility(String),

    #[error("precedence graph contains a cycle")]
    PrecedenceCycle,

    #[error("num_stations must be positive")]
    NonPositiveStations,

    #[error(transparent)]
    Ir(#[from] mfsol_ir::IrError),
}

impl From<BalancingError> for mfsol_core::ErrorKind {
    fn from(e: BalancingError) -> Self {
        match e {
            BalancingError::Ir(inner) => inner.into(),
            other => mfsol_core::ErrorKind::InvalidInput(other.to_string()),
        }
    }
}

pub type BalancingResult<T> = Result<T, BalancingError>;
