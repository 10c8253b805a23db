use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ProductionError {
    #[error("seasonal demand does not cover all 12 months (got {0})")]
    IncompleteHorizon(usize),

    #[error("season has zero months")]
    EmptySeason,

    #[error(transparent)]
    Ir(#[from] mfsol_ir::IrError),
}

impl From<ProductionError> for mfsol_core::ErrorKind {
    fn from(e: ProductionError) -> Self {
        match e {
            ProductionError::Ir(inner) => inner.into(),
            other => mfsol_core::ErrorKind::InvalidInput(other.to_string()),
        }
    }
}

pub type ProductionResult<T> = Result<T, ProductionError>;
