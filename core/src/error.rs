use thiserror::Error;

/// A grouped count of the constraint family implicated by an infeasible solve,
/// e.g. `("coverage", 3)` meaning three coverage rows appear in the IIS.
pub type ConstraintFamilyCount = (String, usize);

/// The error kinds of the core, as named in the failure-handling design (spec §7).
///
/// These are not exception types thrown across the stack; they are the
/// terminal classification the Run Coordinator settles a run into, or the
/// synchronous rejection handed back to a submitter before a run is created.
#[derive(Error, Debug, Clone)]
pub enum ErrorKind {
    /// Raised by Dataset Intake before model construction. No run is created.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The solver proved the model infeasible. Carries the IIS constraint
    /// names and a family -> count breakdown for the run's logs.
    #[error("infeasible: {} conflicting constraint(s)", .iis.len())]
    SolverInfeasible {
        iis: Vec<String>,
        by_family: Vec<ConstraintFamilyCount>,
    },

    /// Time limit expired before the backend found any integer incumbent.
    #[error("solver time limit reached with no incumbent")]
    SolverTimeoutNoIncumbent,

    /// The backend proved the model unbounded; this indicates a modeling bug.
    #[error("solver reported the model as unbounded")]
    SolverUnbounded,

    /// The backend itself faulted. The original status code is preserved.
    #[error("solver error (backend status {code})")]
    SolverError { code: String },

    /// The Run Store could not be reached. The run may be in an unknown
    /// state and must be reconciled by the caller on the next `status` query.
    #[error("run store unavailable: {0}")]
    StoreUnavailable(String),

    /// Any unexpected fault inside the coordinator or extractor.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// The terminal run status this error kind settles into, or `None` when
    /// the error is rejected synchronously before a run is ever created.
    pub fn terminal_status(&self) -> Option<crate::run::RunStatus> {
        use crate::run::RunStatus;
        match self {
            ErrorKind::InvalidInput(_) => None,
            ErrorKind::SolverInfeasible { .. } => Some(RunStatus::Infeasible),
            ErrorKind::SolverTimeoutNoIncumbent => Some(RunStatus::NoSolution),
            ErrorKind::SolverUnbounded => Some(RunStatus::Error),
            ErrorKind::SolverError { .. } => Some(RunStatus::Error),
            ErrorKind::StoreUnavailable(_) => None,
            ErrorKind::Internal(_) => Some(RunStatus::Error),
        }
    }
}

pub type CoreResult<T> = Result<T, ErrorKind>;
