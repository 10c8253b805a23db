use std::collections::HashMap;
use std::time::Duration;

use crate::error::IrResult;
use crate::model::Model;
use crate::var::VarHandle;

/// Advisory numeric/boolean parameter a caller can set on a [`Model`]
/// (spec §4.1 `set_parameter`).
#[derive(Clone, Copy, Debug)]
pub enum ParamValue {
    Number(f64),
    Bool(bool),
}

/// The terminal status a backend can report (spec §3 "Solver Result").
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SolveStatus {
    Optimal,
    FeasibleTimeLimit,
    NoSolution,
    Infeasible,
    Unbounded,
    Error,
}

impl SolveStatus {
    pub fn has_incumbent(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::FeasibleTimeLimit)
    }
}

/// Raw outcome handed back by a [`SolverBackend`], before the Solver Driver
/// interprets it into the coordinator's run-status vocabulary (spec §3, §4.6).
#[derive(Clone, Debug)]
pub struct SolverResult {
    pub status: SolveStatus,
    pub primal: Option<HashMap<VarHandle, f64>>,
    pub objective_value: Option<f64>,
    pub mip_gap: Option<f64>,
    pub wall_time: Duration,
    /// Populated only when `status == Infeasible` (spec §3 invariant).
    pub iis: Option<Vec<String>>,
    /// Backend-specific status code, preserved verbatim on `Error` (spec §7 `solver_error`).
    pub backend_code: Option<String>,
}

impl SolverResult {
    pub fn value_of(&self, var: VarHandle) -> Option<f64> {
        self.primal.as_ref().and_then(|p| p.get(&var)).copied()
    }
}

/// The external Solver Backend collaborator (spec §2, §6): accepts a Model
/// IR, returns primal values plus a terminal status, and can compute an IIS
/// on an infeasible model. The core never implements branch-and-bound
/// itself (spec §1 Non-goals) — this trait is the seam a real MILP solver
/// plugs into.
pub trait SolverBackend: Send + Sync {
    fn solve(&self, model: &Model) -> IrResult<SolverResult>;

    /// Computes an irreducible inconsistent subsystem for a model the
    /// backend has just reported infeasible. Returns the implicated
    /// constraint names.
    fn compute_iis(&self, model: &Model) -> IrResult<Vec<String>>;

    /// Requests the backend terminate an in-flight solve (spec §5
    /// "cancellation signals the backend to terminate"). Backends that
    /// cannot be interrupted may ignore this.
    fn cancel(&self) {}
}
