use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use mfsol_core::{Assignment, Run, RunId, RunStatus};
use mfsol_store::{RunStore, StoreResult};

/// An async-capable counterpart to [`mfsol_store::RunStore`] (SPEC_FULL
/// §4.6): lets an I/O-bound store adapter (a SQL connection pool, say)
/// suspend instead of blocking a worker thread, the way the teacher mixes
/// `tokio` with `async-trait` for `aries_planning`'s gRPC server trait
/// boundary rather than making every reasoner call asynchronous.
#[async_trait]
pub trait AsyncRunStore: Send + Sync {
    async fn create(&self, run: Run) -> StoreResult<()>;
    async fn get(&self, run_id: &RunId) -> StoreResult<Run>;
    async fn list_recent(&self, limit: usize) -> StoreResult<Vec<Run>>;
    async fn start_processing(&self, run_id: &RunId, horizon_start: Option<NaiveDate>, horizon_days: Option<u32>) -> StoreResult<()>;
    #[allow(clippy::too_many_arguments)]
    async fn complete(
        &self,
        run_id: &RunId,
        status: RunStatus,
        objective_value: Option<f64>,
        logs: Option<String>,
        assignments: Vec<Assignment>,
        completed_at: DateTime<Utc>,
    ) -> StoreResult<Vec<Assignment>>;
}

/// Adapts any synchronous [`RunStore`] into an [`AsyncRunStore`] by running
/// each call on Tokio's blocking thread pool, so a caller built around the
/// async trait can still target [`mfsol_store::InMemoryRunStore`] in tests.
pub struct BlockingRunStore<S>(pub Arc<S>);

#[async_trait]
impl<S: RunStore + 'static> AsyncRunStore for BlockingRunStore<S> {
    async fn create(&self, run: Run) -> StoreResult<()> {
        let store = self.0.clone();
        tokio::task::spawn_blocking(move || store.create(run)).await.expect("blocking store task panicked")
    }

    async fn get(&self, run_id: &RunId) -> StoreResult<Run> {
        let store = self.0.clone();
        let run_id = run_id.clone();
        tokio::task::spawn_blocking(move || store.get(&run_id)).await.expect("blocking store task panicked")
    }

    async fn list_recent(&self, limit: usize) -> StoreResult<Vec<Run>> {
        let store = self.0.clone();
        tokio::task::spawn_blocking(move || store.list_recent(limit)).await.expect("blocking store task panicked")
    }

    async fn start_processing(&self, run_id: &RunId, horizon_start: Option<NaiveDate>, horizon_days: Option<u32>) -> StoreResult<()> {
        let store = self.0.clone();
        let run_id = run_id.clone();
        tokio::task::spawn_blocking(move || store.start_processing(&run_id, horizon_start, horizon_days))
            .await
            .expect("blocking store task panicked")
    }

    async fn complete(
        &self,
        run_id: &RunId,
        status: RunStatus,
        objective_value: Option<f64>,
        logs: Option<String>,
        assignments: Vec<Assignment>,
        completed_at: DateTime<Utc>,
    ) -> StoreResult<Vec<Assignment>> {
        let store = self.0.clone();
        let run_id = run_id.clone();
        tokio::task::spawn_blocking(move || store.complete(&run_id, status, objective_value, logs, assignments, completed_at))
            .await
            .expect("blocking store task panicked")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mfsol_store::InMemoryRunStore;
    use serde_json::json;

    #[tokio::test]
    async fn blocking_adapter_round_trips_through_a_sync_store() {
        let store = BlockingRunStore(Arc::new(InMemoryRunStore::new()));
        let run_id = RunId::from("r1");
        store.create(Run::new_queued(run_id.clone(), json!({}), Utc::now())).await.unwrap();
        let fetched = store.get(&run_id).await.unwrap();
        assert_eq!(fetched.status, RunStatus::Queued);
    }
}
