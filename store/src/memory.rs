use chrono::{DateTime, NaiveDate, Utc};
use mfsol_core::{Assignment, AssignmentId, Run, RunId, RunStatus};
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::RunStore;

struct Entry {
    run: Run,
    order: u64,
    assignments: Vec<Assignment>,
}

/// An in-process [`RunStore`] backed by a single lock, suitable for tests
/// and for the single-process deployment (spec §6 "Run Store" has no
/// transport of its own; a real deployment swaps this for a database-backed
/// implementation of the same trait).
#[derive(Default)]
pub struct InMemoryRunStore {
    inner: RwLock<InnerState>,
}

#[derive(Default)]
struct InnerState {
    entries: std::collections::HashMap<RunId, Entry>,
    next_assignment_id: u64,
    next_order: u64,
}

impl InMemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RunStore for InMemoryRunStore {
    fn create(&self, run: Run) -> StoreResult<()> {
        let mut state = self.inner.write();
        if state.entries.contains_key(&run.run_id) {
            return Err(StoreError::AlreadyExists(run.run_id));
        }
        let order = state.next_order;
        state.next_order += 1;
        debug!(run_id = %run.run_id, "run created");
        state.entries.insert(
            run.run_id.clone(),
            Entry {
                run,
                order,
                assignments: Vec::new(),
            },
        );
        Ok(())
    }

    fn get(&self, run_id: &RunId) -> StoreResult<Run> {
        let state = self.inner.read();
        state
            .entries
            .get(run_id)
            .map(|e| e.run.clone())
            .ok_or_else(|| StoreError::NotFound(run_id.clone()))
    }

    fn list_recent(&self, limit: usize) -> StoreResult<Vec<Run>> {
        let state = self.inner.read();
        let mut entries: Vec<&Entry> = state.entries.values().collect();
        entries.sort_by(|a, b| b.order.cmp(&a.order));
        Ok(entries.into_iter().take(limit).map(|e| e.run.clone()).collect())
    }

    fn start_processing(&self, run_id: &RunId, horizon_start: Option<NaiveDate>, horizon_days: Option<u32>) -> StoreResult<()> {
        let mut state = self.inner.write();
        let entry = state
            .entries
            .get_mut(run_id)
            .ok_or_else(|| StoreError::NotFound(run_id.clone()))?;
        if entry.run.status != RunStatus::Queued {
            return Err(StoreError::InvariantViolation(format!(
                "run {run_id} is {} and cannot move to processing",
                entry.run.status
            )));
        }
        entry.run.status = RunStatus::Processing;
        entry.run.horizon_start = horizon_start;
        entry.run.horizon_days = horizon_days;
        Ok(())
    }

    fn complete(
        &self,
        run_id: &RunId,
        status: RunStatus,
        objective_value: Option<f64>,
        logs: Option<String>,
        assignments: Vec<Assignment>,
        completed_at: DateTime<Utc>,
    ) -> StoreResult<Vec<Assignment>> {
        if !status.is_terminal() {
            return Err(StoreError::InvariantViolation(format!("{status} is not a terminal status")));
        }
        if objective_value.is_some() && !status.is_success() {
            return Err(StoreError::InvariantViolation(format!(
                "objective value supplied for non-success status {status}"
            )));
        }
        let mut state = self.inner.write();
        let next_id = state.next_assignment_id;
        let stamped: Vec<Assignment> = assignments
            .into_iter()
            .enumerate()
            .map(|(i, mut a)| {
                a.id = Some(AssignmentId(next_id + i as u64));
                a
            })
            .collect();
        state.next_assignment_id = next_id + stamped.len() as u64;

        let entry = state
            .entries
            .get_mut(run_id)
            .ok_or_else(|| StoreError::NotFound(run_id.clone()))?;
        if entry.run.status.is_terminal() {
            return Err(StoreError::InvariantViolation(format!(
                "run {run_id} already reached terminal status {}",
                entry.run.status
            )));
        }
        entry.run.status = status;
        entry.run.objective_value = objective_value;
        entry.run.logs = logs;
        entry.run.completed_at = Some(completed_at);
        entry.assignments = stamped.clone();
        debug!(run_id = %run_id, status = %status, "run completed");
        Ok(stamped)
    }

    fn assignments(&self, run_id: &RunId) -> StoreResult<Vec<Assignment>> {
        let state = self.inner.read();
        state
            .entries
            .get(run_id)
            .map(|e| e.assignments.clone())
            .ok_or_else(|| StoreError::NotFound(run_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mfsol_core::Period;

    fn queued_run(id: &str) -> Run {
        Run::new_queued(RunId::from(id), serde_json::json!({}), Utc::now())
    }

    #[test]
    fn rejects_duplicate_run_ids() {
        let store = InMemoryRunStore::new();
        store.create(queued_run("r1")).unwrap();
        let err = store.create(queued_run("r1")).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[test]
    fn complete_mints_sequential_assignment_ids() {
        let store = InMemoryRunStore::new();
        let id = RunId::from("r1");
        store.create(queued_run("r1")).unwrap();
        store.start_processing(&id, None, None).unwrap();
        let assignments = vec![
            Assignment::new(id.clone(), "nurse-1", Period::Index(0), "icu", 8.0, 100.0),
            Assignment::new(id.clone(), "nurse-2", Period::Index(0), "icu", 8.0, 100.0),
        ];
        let stamped = store
            .complete(&id, RunStatus::Optimal, Some(200.0), None, assignments, Utc::now())
            .unwrap();
        assert_eq!(stamped[0].id, Some(AssignmentId(0)));
        assert_eq!(stamped[1].id, Some(AssignmentId(1)));
    }

    #[test]
    fn rejects_objective_on_non_success_status() {
        let store = InMemoryRunStore::new();
        let id = RunId::from("r1");
        store.create(queued_run("r1")).unwrap();
        store.start_processing(&id, None, None).unwrap();
        let err = store
            .complete(&id, RunStatus::Infeasible, Some(1.0), None, vec![], Utc::now())
            .unwrap_err();
        assert!(matches!(err, StoreError::InvariantViolation(_)));
    }

    #[test]
    fn rejects_transition_after_terminal() {
        let store = InMemoryRunStore::new();
        let id = RunId::from("r1");
        store.create(queued_run("r1")).unwrap();
        store.start_processing(&id, None, None).unwrap();
        store
            .complete(&id, RunStatus::NoSolution, None, None, vec![], Utc::now())
            .unwrap();
        let err = store
            .complete(&id, RunStatus::NoSolution, None, None, vec![], Utc::now())
            .unwrap_err();
        assert!(matches!(err, StoreError::InvariantViolation(_)));
    }

    #[test]
    fn list_recent_orders_newest_first() {
        let store = InMemoryRunStore::new();
        store.create(queued_run("r1")).unwrap();
        store.create(queued_run("r2")).unwrap();
        store.create(queued_run("r3")).unwrap();
        let recent = store.list_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].run_id, RunId::from("r3"));
        assert_eq!(recent[1].run_id, RunId::from("r2"));
    }
}
