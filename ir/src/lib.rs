//! Backend-neutral MILP Model IR: variables, linear constraints, a single
//! linear objective, advisory solver parameters, and the [`SolverBackend`]
//! seam a concrete MILP solver plugs into.

pub mod backend;
pub mod constraint;
pub mod error;
pub mod expr;
pub mod iis;
pub mod model;
pub mod objective;
pub mod var;

pub use backend::{ParamValue, SolveStatus, SolverBackend, SolverResult};
pub use constraint::{Constraint, Sense};
pub use error::{IrError, IrResult};
pub use expr::{LinearExpr, LinearTerm};
pub use iis::group_by_family;
pub use model::Model;
pub use objective::{Direction, Objective};
pub use var::{VarDecl, VarHandle, VarKind};
