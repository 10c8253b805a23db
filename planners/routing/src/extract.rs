use mfsol_core::{Assignment, Period, RunId};
use mfsol_ir::SolverResult;

use crate::instance::RoutingInstance;
use crate::model::RoutingVars;

/// Cost broken down the way the routing objective is composed (spec §4.3
/// objective: travel + load-balance penalty).
#[derive(Clone, Debug, Default)]
pub struct RoutingKpis {
    pub total_travel_hours: f64,
    pub max_tasks_assigned: f64,
    pub unrouted_tasks: u32,
}

pub struct RoutingSolution {
    pub assignments: Vec<Assignment>,
    pub kpis: RoutingKpis,
}

const ON_THRESHOLD: f64 = 0.5;

/// Reconstructs an inspector's route by following the unique outgoing arc
/// with `x ~= 1` from node 0 until node 0 is reached again (spec §4.3 "Route
/// reconstruction").
fn reconstruct_route(instance: &RoutingInstance, vars: &RoutingVars, result: &SolverResult, k: usize) -> Vec<usize> {
    let n = instance.num_nodes();
    let mut route = Vec::new();
    let mut current = 0usize;
    for _ in 0..=n {
        let next = (0..n).find(|&j| {
            j != current
                && vars
                    .x
                    .get(&(current, j, k))
                    .and_then(|&h| result.value_of(h))
                    .map(|v| v > ON_THRESHOLD)
                    .unwrap_or(false)
        });
        match next {
            Some(0) | None => break,
            Some(j) => {
                route.push(j);
                current = j;
            }
        }
    }
    route
}

/// Reads primal values for `x`/`y`/`T` and reconstructs routes (spec §4.3).
pub fn extract(run_id: &RunId, instance: &RoutingInstance, vars: &RoutingVars, result: &SolverResult) -> RoutingSolution {
    let mut assignments = Vec::new();
    let mut total_travel_hours = 0.0;
    let mut routed_task_count = 0u32;

    for (k, inspector) in instance.inspectors.iter().enumerate() {
        let route = reconstruct_route(instance, vars, result, k);
        let mut prev = 0usize;
        for (seq, &node) in route.iter().enumerate() {
            total_travel_hours += vars.distances[k][prev][node];
            let task = &instance.tasks[node - 1];
            routed_task_count += 1;
            assignments.push(Assignment::new(
                run_id.clone(),
                inspector.id.clone(),
                Period::Index(seq as u32),
                task.id.clone(),
                task.duration,
                0.0,
            ));
            prev = node;
        }
        if !route.is_empty() {
            total_travel_hours += vars.distances[k][prev][0];
        }
    }

    let max_tasks_assigned = result.value_of(vars.max_tasks).unwrap_or(0.0);
    let unrouted_tasks = (instance.tasks.len() as u32).saturating_sub(routed_task_count);

    RoutingSolution {
        assignments,
        kpis: RoutingKpis {
            total_travel_hours,
            max_tasks_assigned,
            unrouted_tasks,
        },
    }
}
