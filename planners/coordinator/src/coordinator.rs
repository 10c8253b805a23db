use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::Context;
use chrono::Utc;
use crossbeam_channel::{Sender, unbounded};
use mfsol_core::{Run, RunId};
use mfsol_ir::SolverBackend;
use mfsol_store::RunStore;
use tracing::{info, warn};

use crate::dispatch::execute;
use crate::error::{CoordinatorError, CoordinatorResult};
use crate::observer::ObserverSet;
use crate::submission::Submission;

struct Job {
    run_id: RunId,
    submission: Submission,
}

/// Owns the run lifecycle (spec §4.6): allocates identifiers, persists the
/// initial record, dispatches builder/solver work to a worker, and writes
/// the terminal transition. Workers are a fixed-size pool of OS threads
/// pulling off a `crossbeam-channel` queue, the way the teacher's parallel
/// search pool (`solver/src/solver/parallel/parallel_solver.rs`) fans work
/// out to a fixed set of long-lived threads rather than spawning one per job.
pub struct RunCoordinator {
    store: Arc<dyn RunStore>,
    backend: Arc<dyn SolverBackend>,
    observers: Arc<ObserverSet>,
    job_tx: Sender<Job>,
    _workers: Vec<JoinHandle<()>>,
}

impl RunCoordinator {
    pub fn new(store: Arc<dyn RunStore>, backend: Arc<dyn SolverBackend>, num_workers: usize) -> Self {
        Self::with_observers(store, backend, num_workers, ObserverSet::default())
    }

    pub fn with_observers(store: Arc<dyn RunStore>, backend: Arc<dyn SolverBackend>, num_workers: usize, observers: ObserverSet) -> Self {
        let (job_tx, job_rx) = unbounded::<Job>();
        let observers = Arc::new(observers);

        let workers = (0..num_workers.max(1))
            .map(|worker_index| {
                let job_rx = job_rx.clone();
                let store = store.clone();
                let backend = backend.clone();
                let observers = observers.clone();
                std::thread::Builder::new()
                    .name(format!("mfsol-worker-{worker_index}"))
                    .spawn(move || {
                        for job in job_rx {
                            run_job(&store, backend.as_ref(), &observers, job);
                        }
                    })
                    .expect("failed to spawn run-coordinator worker thread")
            })
            .collect();

        RunCoordinator {
            store,
            backend,
            observers,
            job_tx,
            _workers: workers,
        }
    }

    /// Non-blocking submission (spec §4.6 "non-blocking when the caller
    /// requests asynchronous execution"): creates the `queued` record and
    /// hands the job to the worker pool, returning as soon as the record is
    /// durable.
    pub fn submit(&self, run_id: RunId, submission: Submission) -> CoordinatorResult<RunId> {
        self.create_queued(&run_id, &submission)?;
        self.observers.notify(&run_id, "queued");
        // An unbounded channel whose only receivers are this pool's own
        // worker threads never disconnects while `self` is alive.
        self.job_tx.send(Job { run_id: run_id.clone(), submission }).expect("worker pool receiver dropped");
        Ok(run_id)
    }

    /// Blocking submission (spec §4.6 "synchronous otherwise"): runs the
    /// full builder -> solve -> extract pipeline on the calling thread before
    /// returning, for short interactive jobs.
    pub fn submit_sync(&self, run_id: RunId, submission: Submission) -> CoordinatorResult<Run> {
        self.create_queued(&run_id, &submission)?;
        run_job(&self.store, self.backend.as_ref(), &self.observers, Job { run_id: run_id.clone(), submission });
        self.status(&run_id)
    }

    /// `async` submission sharing the same pipeline, for services whose
    /// `RunStore`/`SolverBackend` are I/O-bound (spec §9 "Global solver
    /// singletons → per-run handles" extended to an async-capable driver:
    /// the teacher mixes `tokio` with blocking reasoner work via
    /// `spawn_blocking` rather than inventing a bespoke async solver loop).
    pub async fn submit_async(&self, run_id: RunId, submission: Submission) -> CoordinatorResult<Run> {
        self.create_queued(&run_id, &submission)?;
        let store = self.store.clone();
        let backend = self.backend.clone();
        let observers = self.observers.clone();
        let job_run_id = run_id.clone();
        tokio::task::spawn_blocking(move || {
            run_job(&store, backend.as_ref(), &observers, Job { run_id: job_run_id, submission });
        })
        .await
        .map_err(|e| CoordinatorError::StoreUnavailable(format!("worker task panicked: {e}")))?;
        self.status(&run_id)
    }

    pub fn status(&self, run_id: &RunId) -> CoordinatorResult<Run> {
        Ok(self.store.get(run_id)?)
    }

    pub fn list_recent(&self, limit: usize) -> CoordinatorResult<Vec<Run>> {
        Ok(self.store.list_recent(limit)?)
    }

    fn create_queued(&self, run_id: &RunId, submission: &Submission) -> CoordinatorResult<()> {
        let run = Run::new_queued(run_id.clone(), submission.params_json(), Utc::now());
        self.store.create(run)?;
        Ok(())
    }
}

fn run_job(store: &Arc<dyn RunStore>, backend: &dyn SolverBackend, observers: &ObserverSet, job: Job) {
    let Job { run_id, submission } = job;
    let (horizon_start, horizon_days) = submission.horizon();
    if let Err(e) = store
        .start_processing(&run_id, horizon_start, horizon_days)
        .with_context(|| format!("marking run {run_id} processing"))
    {
        warn!(run_id = %run_id, error = %format!("{e:#}"), "run dropped before it could start");
        return;
    }
    observers.notify(&run_id, &format!("processing ({})", submission.kind()));

    let outcome = execute(&run_id, &submission, backend);
    let assignments = outcome
        .assignments
        .into_iter()
        .map(|mut a| {
            a.run_id = run_id.clone();
            a
        })
        .collect();

    observers.notify(&run_id, &format!("settled: {}", outcome.status));
    let completion = store
        .complete(&run_id, outcome.status, outcome.objective_value, outcome.logs, assignments, Utc::now())
        .with_context(|| format!("persisting terminal status {} for run {run_id}", outcome.status));
    match completion {
        Ok(_) => info!(run_id = %run_id, status = %outcome.status, "run completed"),
        Err(e) => warn!(run_id = %run_id, error = %format!("{e:#}"), "failed to persist run completion"),
    }
}

