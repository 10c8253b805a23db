use chrono::{DateTime, Utc};
use mfsol_core::{Assignment, Run, RunId, RunStatus};

use crate::error::StoreResult;

/// Durable storage of runs and their assignments, queryable by identifier
/// and by recency (spec §2, §6). The only shared mutable resource in the
/// system (spec §5); every method is expected to serialize per-run so the
/// lifecycle transitions stay atomic from a caller's point of view.
pub trait RunStore: Send + Sync {
    /// Inserts a new `queued` run. Fails with [`crate::StoreError::AlreadyExists`]
    /// if `run.run_id` is already present, so resubmitting an identifier is
    /// rejected rather than silently overwritten (spec §7 retry policy).
    fn create(&self, run: Run) -> StoreResult<()>;

    fn get(&self, run_id: &RunId) -> StoreResult<Run>;

    /// Most recently created runs first, newest `limit` entries.
    fn list_recent(&self, limit: usize) -> StoreResult<Vec<Run>>;

    /// `queued -> processing` transition, recording the horizon a worker
    /// resolved from the submitted dataset.
    fn start_processing(&self, run_id: &RunId, horizon_start: Option<chrono::NaiveDate>, horizon_days: Option<u32>) -> StoreResult<()>;

    /// The single terminal transition. Assignments and the objective value
    /// become visible together with the status change (spec §4.6 "atomic
    /// writes; no intermediate state may be observed partially populated").
    /// Returns the stored assignments with their minted ids.
    fn complete(
        &self,
        run_id: &RunId,
        status: RunStatus,
        objective_value: Option<f64>,
        logs: Option<String>,
        assignments: Vec<Assignment>,
        completed_at: DateTime<Utc>,
    ) -> StoreResult<Vec<Assignment>>;

    fn assignments(&self, run_id: &RunId) -> StoreResult<Vec<Assignment>>;
}
