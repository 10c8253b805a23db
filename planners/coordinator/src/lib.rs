//! Run Coordinator (spec §4.6): owns the lifecycle of a run end to end —
//! allocates its identifier, persists the initial record, dispatches the
//! builder/solver/extractor pipeline to a worker, and writes the terminal
//! transition — over any of the four formulation builders.

pub mod async_store;
pub mod coordinator;
pub mod dispatch;
pub mod error;
pub mod observer;
pub mod submission;

pub use async_store::{AsyncRunStore, BlockingRunStore};
pub use coordinator::RunCoordinator;
pub use dispatch::{execute, Outcome};
pub use error::{CoordinatorError, CoordinatorResult};
pub use observer::{ObserverSet, RunObserver, TracingObserver};
pub use submission::Submission;

#[cfg(test)]
mod tests {
    use super::*;
    use mfsol_balancing::{BalancingInstance, BalancingParams, OptimizationMode, Station, Task};
    use mfsol_core::{RunId, RunStatus};
    use mfsol_store::InMemoryRunStore;
    use mfsol_testkit::ReferenceBackend;
    use std::sync::Arc;

    fn tiny_balancing_submission() -> Submission {
        let instance = BalancingInstance::build(
            vec![Task { id: "T1".into(), duration: 3.0, required_skills: String::new(), setup_time: 0.0 }],
            vec![Station { skills: String::new() }],
            vec![],
            vec![],
        )
        .unwrap();
        Submission::Balancing {
            instance,
            params: BalancingParams {
                optimization_mode: OptimizationMode::MinimizeStations,
                cycle_time: None,
                max_stations: None,
                ..Default::default()
            },
        }
    }

    /// Exercises the full submit -> status pipeline (spec §8 "Round-trip /
    /// idempotence laws") against the in-memory store and reference backend.
    #[test]
    fn submit_sync_settles_a_solvable_run_to_optimal() {
        let store: Arc<dyn mfsol_store::RunStore> = Arc::new(InMemoryRunStore::new());
        let backend: Arc<dyn mfsol_ir::SolverBackend> = Arc::new(ReferenceBackend::new());
        let coordinator = RunCoordinator::new(store, backend, 1);

        let run = coordinator.submit_sync(RunId::from("r1"), tiny_balancing_submission()).unwrap();
        assert_eq!(run.status, RunStatus::Optimal);
        assert!(run.objective_value.is_some());
        assert!(run.completed_at.is_some());
    }

    /// Spec §7 "Retry policy: a resubmission with the same identifier is
    /// rejected."
    #[test]
    fn rejects_resubmission_of_the_same_run_id() {
        let store: Arc<dyn mfsol_store::RunStore> = Arc::new(InMemoryRunStore::new());
        let backend: Arc<dyn mfsol_ir::SolverBackend> = Arc::new(ReferenceBackend::new());
        let coordinator = RunCoordinator::new(store, backend, 1);

        coordinator.submit_sync(RunId::from("r1"), tiny_balancing_submission()).unwrap();
        let err = coordinator.submit_sync(RunId::from("r1"), tiny_balancing_submission()).unwrap_err();
        assert!(matches!(err, CoordinatorError::AlreadyExists(_)));
    }

    /// A queued-then-async-processed run becomes visible through `submit`
    /// once its worker drains the job (spec §4.6 "non-blocking when
    /// asynchronous").
    #[test]
    fn submit_processes_through_the_worker_pool() {
        let store: Arc<dyn mfsol_store::RunStore> = Arc::new(InMemoryRunStore::new());
        let backend: Arc<dyn mfsol_ir::SolverBackend> = Arc::new(ReferenceBackend::new());
        let coordinator = RunCoordinator::new(store, backend, 1);

        let run_id = coordinator.submit(RunId::from("r1"), tiny_balancing_submission()).unwrap();
        // The worker thread may still be draining the queue; poll briefly.
        let mut last = coordinator.status(&run_id).unwrap();
        for _ in 0..200 {
            if last.status.is_terminal() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
            last = coordinator.status(&run_id).unwrap();
        }
        assert_eq!(last.status, RunStatus::Optimal);
    }

    #[tokio::test]
    async fn submit_async_settles_a_solvable_run() {
        let store: Arc<dyn mfsol_store::RunStore> = Arc::new(InMemoryRunStore::new());
        let backend: Arc<dyn mfsol_ir::SolverBackend> = Arc::new(ReferenceBackend::new());
        let coordinator = RunCoordinator::new(store, backend, 1);

        let run = coordinator.submit_async(RunId::from("r1"), tiny_balancing_submission()).await.unwrap();
        assert_eq!(run.status, RunStatus::Optimal);
    }

    /// Spec §8 scenario 5 ("infeasible roster"): over-tight skill demand
    /// settles the run to `infeasible` with a populated conflict explanation
    /// rather than leaving it `processing` or surfacing a panic.
    #[test]
    fn submit_sync_settles_an_unsatisfiable_run_to_infeasible() {
        use mfsol_rostering::{DemandRow, Employee, RosteringInstance, RosteringParams, Shift, ShiftKind};
        use chrono::NaiveDate;

        let shifts = vec![Shift {
            id: "ICU1".into(),
            name: "ICU1".into(),
            start_time: "07:00".into(),
            end_time: "15:00".into(),
            length_hours: 8.0,
            kind: ShiftKind::Day,
        }];
        let employees = vec![Employee {
            id: "E01".into(),
            skills: "RN".into(),
            hourly_cost: 30.0,
            max_hours: 40.0,
            availability: Default::default(),
        }];
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let demand = vec![DemandRow { date: start, shift_id: "ICU1".into(), skill: "ICU".into(), required: 1 }];
        let instance = RosteringInstance::build(employees, shifts, demand, start, 1).unwrap();
        let params = RosteringParams { allow_uncovered_demand: false, ..Default::default() };

        let store: Arc<dyn mfsol_store::RunStore> = Arc::new(InMemoryRunStore::new());
        let backend: Arc<dyn mfsol_ir::SolverBackend> = Arc::new(ReferenceBackend::new());
        let coordinator = RunCoordinator::new(store, backend, 1);

        let run = coordinator.submit_sync(RunId::from("r1"), Submission::Rostering { instance, params }).unwrap();
        assert_eq!(run.status, RunStatus::Infeasible);
        assert!(run.logs.unwrap().contains("conflicting constraints"));
    }

    /// Spec §7 "querying a run identifier that was never submitted" is
    /// reported as a store-level not-found rather than panicking.
    #[test]
    fn status_of_an_unknown_run_id_is_not_found() {
        let store: Arc<dyn mfsol_store::RunStore> = Arc::new(InMemoryRunStore::new());
        let backend: Arc<dyn mfsol_ir::SolverBackend> = Arc::new(ReferenceBackend::new());
        let coordinator = RunCoordinator::new(store, backend, 1);

        let err = coordinator.status(&RunId::from("never-submitted")).unwrap_err();
        assert!(matches!(err, CoordinatorError::NotFound(_)));
    }
}
