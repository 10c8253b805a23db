use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AssignmentId, RunId};

/// The run lifecycle state machine (spec §4.6): `queued -> processing ->
/// {optimal | feasible | no_solution | infeasible | error}`. Transitions are
/// monotonic; once a terminal status is reached it never changes again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    Processing,
    Optimal,
    Feasible,
    NoSolution,
    Infeasible,
    Error,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RunStatus::Queued | RunStatus::Processing)
    }

    /// Only `optimal`/`feasible` runs carry a non-null objective value and
    /// visible assignments (spec §3 invariant).
    pub fn is_success(self) -> bool {
        matches!(self, RunStatus::Optimal | RunStatus::Feasible)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::Processing => "processing",
            RunStatus::Optimal => "optimal",
            RunStatus::Feasible => "feasible",
            RunStatus::NoSolution => "no_solution",
            RunStatus::Infeasible => "infeasible",
            RunStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable record of a run (spec §3, §6 outbound `Run` columns).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Run {
    pub run_id: RunId,
    pub status: RunStatus,
    pub horizon_start: Option<NaiveDate>,
    pub horizon_days: Option<u32>,
    pub objective_value: Option<f64>,
    /// Opaque JSON blob of the submitted parameters (spec §6: "solver_params
    /// (opaque JSON)"). Builders consume a typed `*Params` struct instead;
    /// this field is the storage-facing projection of it.
    pub solver_params: serde_json::Value,
    pub logs: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Run {
    pub fn new_queued(run_id: RunId, solver_params: serde_json::Value, created_at: DateTime<Utc>) -> Self {
        Run {
            run_id,
            status: RunStatus::Queued,
            horizon_start: None,
            horizon_days: None,
            objective_value: None,
            solver_params,
            logs: None,
            created_at,
            completed_at: None,
        }
    }

    /// Invariant check used by the Run Store and by tests: objective is
    /// non-null only on success, completed_at is non-null iff terminal.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.objective_value.is_some() && !self.status.is_success() {
            return Err(format!(
                "run {} has an objective value but status {} is not a success status",
                self.run_id, self.status
            ));
        }
        if self.status.is_terminal() != self.completed_at.is_some() {
            return Err(format!(
                "run {} has status {} (terminal={}) but completed_at={:?}",
                self.run_id,
                self.status,
                self.status.is_terminal(),
                self.completed_at
            ));
        }
        Ok(())
    }
}

/// Either a calendar date (rostering, production) or a station index
/// (line-balancing). Routing assignments use `Date` for the run's single
/// horizon day, or a sequence index if the caller needs to order stops
/// within a route; the builder always hands the extractor a `Date` when a
/// horizon is defined and otherwise an `Index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    Date(NaiveDate),
    Index(u32),
}

/// A single produced assignment (spec §3, §6 outbound `Assignment` columns).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Option<AssignmentId>,
    pub run_id: RunId,
    pub actor_id: String,
    pub period: Period,
    pub unit_id: String,
    pub hours: f64,
    pub cost: f64,
    pub is_overtime: bool,
}

impl Assignment {
    pub fn new(run_id: RunId, actor_id: impl Into<String>, period: Period, unit_id: impl Into<String>, hours: f64, cost: f64) -> Self {
        Assignment {
            id: None,
            run_id,
            actor_id: actor_id.into(),
            period,
            unit_id: unit_id.into(),
            hours,
            cost,
            is_overtime: false,
        }
    }

    pub fn with_overtime(mut self, is_overtime: bool) -> Self {
        self.is_overtime = is_overtime;
        self
    }
}
