use mfsol_core::RunId;

/// Replaces the source's monkey-patched logger with an explicit fan-out
/// target (spec §9 "Monkey-patching logger → observer interface"): the
/// coordinator calls every registered observer as it progresses a run
/// instead of a global logging singleton reaching back into GUI state.
pub trait RunObserver: Send + Sync {
    fn on_event(&self, run_id: &RunId, message: &str);
}

/// The default observer: events still flow through `tracing`, just with no
/// additional subscriber attached.
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn on_event(&self, run_id: &RunId, message: &str) {
        tracing::info!(run_id = %run_id, "{message}");
    }
}

/// Fans a single event out to every registered observer, in registration
/// order.
pub struct ObserverSet(Vec<Box<dyn RunObserver>>);

impl Default for ObserverSet {
    fn default() -> Self {
        ObserverSet(vec![Box::new(TracingObserver)])
    }
}

impl ObserverSet {
    pub fn new(observers: Vec<Box<dyn RunObserver>>) -> Self {
        ObserverSet(observers)
    }

    pub fn notify(&self, run_id: &RunId, message: &str) {
        for observer in &self.0 {
            observer.on_event(run_id, message);
        }
    }
}
