use mfsol_core::{Assignment, Period, RunId};
use mfsol_ir::SolverResult;

use crate::instance::BalancingInstance;
use crate::model::BalancingVars;

/// Per-used-station summary (spec §4.4 "Solution extractor").
#[derive(Clone, Debug)]
pub struct StationPlan {
    pub station_index: usize,
    pub task_ids: Vec<String>,
    pub total_time: f64,
    pub idle: f64,
    pub efficiency: f64,
}

#[derive(Clone, Debug, Default)]
pub struct BalancingKpis {
    pub cycle_time: f64,
    pub stations_used: u32,
    pub overall_efficiency: f64,
}

pub struct BalancingSolution {
    pub assignments: Vec<Assignment>,
    pub station_plans: Vec<StationPlan>,
    pub kpis: BalancingKpis,
}

const ON_THRESHOLD: f64 = 0.5;

/// Reads primal values for `a`/`u`/`load`/`cycle` and reconstructs station
/// plans (spec §4.4).
pub fn extract(run_id: &RunId, instance: &BalancingInstance, vars: &BalancingVars, result: &SolverResult) -> BalancingSolution {
    let cycle = result.value_of(vars.cycle).unwrap_or(0.0);
    let mut assignments = Vec::new();
    let mut station_plans = Vec::new();
    let num_stations = vars.u.len();

    let mut total_busy_time = 0.0;
    for j in 0..num_stations {
        let used = vars.u.get(&j).and_then(|&h| result.value_of(h)).map(|v| v > ON_THRESHOLD).unwrap_or(false);
        if !used {
            continue;
        }
        let mut task_ids = Vec::new();
        let mut total_time = 0.0;
        for (i, task) in instance.tasks.iter().enumerate() {
            let Some(&h) = vars.a.get(&(i, j)) else { continue };
            let Some(v) = result.value_of(h) else { continue };
            if v <= ON_THRESHOLD {
                continue;
            }
            task_ids.push(task.id.clone());
            total_time += task.duration;
            assignments.push(Assignment::new(run_id.clone(), format!("station_{j}"), Period::Index(j as u32), task.id.clone(), task.duration, 0.0));
        }
        total_busy_time += total_time;
        let idle = (cycle - total_time).max(0.0);
        let efficiency = if cycle > 0.0 { total_time / cycle } else { 0.0 };
        station_plans.push(StationPlan {
            station_index: j,
            task_ids,
            total_time,
            idle,
            efficiency,
        });
    }

    let stations_used = station_plans.len() as u32;
    let overall_efficiency = if cycle > 0.0 && stations_used > 0 {
        total_busy_time / (cycle * stations_used as f64)
    } else {
        0.0
    };

    BalancingSolution {
        assignments,
        station_plans,
        kpis: BalancingKpis {
            cycle_time: cycle,
            stations_used,
            overall_efficiency,
        },
    }
}
