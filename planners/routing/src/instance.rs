use std::collections::BTreeSet;

use mfsol_core::parse_skills;
use serde::{Deserialize, Serialize};

use crate::error::{RoutingError, RoutingResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Depot {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Inspector {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub skills: String,
    pub avail_start: u32,
    pub avail_end: u32,
    pub max_work_hours: Option<f64>,
}

impl Inspector {
    pub fn skill_set(&self) -> BTreeSet<String> {
        parse_skills(&self.skills)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub duration: f64,
    pub tw_start: u32,
    pub tw_end: u32,
    pub required_skill: String,
}

/// A validated routing instance (spec §4.3). `tasks[i]` occupies node
/// `i + 1`; node `0` is each inspector's own start (its location, or the
/// depot when `use_depot_start` is set).
#[derive(Clone, Debug)]
pub struct RoutingInstance {
    pub inspectors: Vec<Inspector>,
    pub tasks: Vec<Task>,
    pub depot: Depot,
}

impl RoutingInstance {
    pub fn build(inspectors: Vec<Inspector>, tasks: Vec<Task>, depot: Depot) -> RoutingResult<Self> {
        let mut seen_inspectors = BTreeSet::new();
        for i in &inspectors {
            if !seen_inspectors.insert(i.id.clone()) {
                return Err(RoutingError::DuplicateInspector(i.id.clone()));
            }
        }
        let mut seen_tasks = BTreeSet::new();
        for t in &tasks {
            if !seen_tasks.insert(t.id.clone()) {
                return Err(RoutingError::DuplicateTask(t.id.clone()));
            }
            if t.duration < 0.0 {
                return Err(RoutingError::NegativeDuration(t.id.clone()));
            }
            if t.tw_start > t.tw_end {
                return Err(RoutingError::EmptyTimeWindow(t.id.clone()));
            }
        }
        Ok(RoutingInstance { inspectors, tasks, depot })
    }

    /// `1 + tasks.len()`: node 0 is the per-inspector start.
    pub fn num_nodes(&self) -> usize {
        1 + self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, tw_start: u32, tw_end: u32) -> Task {
        Task {
            id: id.to_string(),
            x: 0.0,
            y: 0.0,
            duration: 0.5,
            tw_start,
            tw_end,
            required_skill: "electrical".into(),
        }
    }

    #[test]
    fn rejects_empty_time_window() {
        let err = RoutingInstance::build(vec![], vec![task("T1", 10, 8)], Depot { x: 0.0, y: 0.0 }).unwrap_err();
        assert!(matches!(err, RoutingError::EmptyTimeWindow(_)));
    }

    #[test]
    fn rejects_duplicate_task_ids() {
        let err = RoutingInstance::build(vec![], vec![task("T1", 8, 18), task("T1", 8, 18)], Depot { x: 0.0, y: 0.0 }).unwrap_err();
        assert!(matches!(err, RoutingError::DuplicateTask(_)));
    }
}
