use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RosteringError {
    #[error("duplicate employee id '{0}'")]
    DuplicateEmployee(String),

    #[error("duplicate shift id '{0}'")]
    DuplicateShift(String),

    #[error("demand row references unknown shift id '{0}'")]
    DanglingShiftReference(String),

    #[error("empty horizon: horizon_days must be >= 1")]
    EmptyHorizon,

    #[error("shift '{0}' has non-positive length_hours")]
    NonPositiveShiftLength(String),

    #[error(transparent)]
    Ir(#[from] mfsol_ir::IrError),
}

impl From<RosteringError> for mfsol_core::ErrorKind {
    fn from(e: RosteringError) -> Self {
        match e {
            RosteringError::Ir(inner) => inner.into(),
            other => mfsol_core::ErrorKind::InvalidInput(other.to_string()),
        }
    }
}

pub type RosteringResult<T> = Result<T, RosteringError>;
