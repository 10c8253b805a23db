use std::collections::HashMap;

use mfsol_ir::{Direction, LinearExpr, Model, ParamValue, Sense, VarHandle, VarKind};
use tracing::debug;

use crate::error::RoutingResult;
use crate::instance::RoutingInstance;
use crate::params::{RoutingParams, LOAD_BALANCE_WEIGHT, SEQUENCING_BIG_M};

/// Variable handles the Solution Extractor needs back, keyed the way the
/// builder names them (spec §4.3 node model: node 0 is the per-inspector
/// start, nodes 1..n-1 are tasks).
pub struct RoutingVars {
    pub x: HashMap<(usize, usize, usize), VarHandle>,
    pub y: HashMap<(usize, usize), VarHandle>,
    pub t: HashMap<(usize, usize), VarHandle>,
    pub max_tasks: VarHandle,
    /// One matrix per inspector, same values the builder constrained on;
    /// kept for the extractor so it doesn't recompute geometry.
    pub distances: Vec<Vec<Vec<f64>>>,
}

fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// One distance matrix per inspector (spec §4.3). Node 0 is either the
/// shared depot (`use_depot_start`) or the inspector's own location.
fn distance_matrix(instance: &RoutingInstance, params: &RoutingParams, k: usize) -> Vec<Vec<f64>> {
    let n = instance.num_nodes();
    let mut locations = Vec::with_capacity(n);
    if params.use_depot_start {
        locations.push((instance.depot.x, instance.depot.y));
    } else {
        let insp = &instance.inspectors[k];
        locations.push((insp.x, insp.y));
    }
    for t in &instance.tasks {
        locations.push((t.x, t.y));
    }

    let mut dist = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i != j {
                dist[i][j] = euclidean(locations[i], locations[j]) / params.speed_kmh;
            }
        }
    }
    dist
}

/// Builds the Model IR for a routing instance (spec §4.3).
pub fn build_model(instance: &RoutingInstance, params: &RoutingParams) -> RoutingResult<(Model, RoutingVars)> {
    let mut model = Model::new("routing");
    let n = instance.num_nodes();
    let m = instance.inspectors.len();
    let big_m = SEQUENCING_BIG_M.get();

    let distances: Vec<Vec<Vec<f64>>> = (0..m).map(|k| distance_matrix(instance, params, k)).collect();

    let mut x = HashMap::new();
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            for k in 0..m {
                let h = model.add_var(format!("x_{i}_{j}_{k}"), VarKind::Binary, None, None)?;
                x.insert((i, j, k), h);
            }
        }
    }
    // No self-loops (constraint 10): simply never materialized as variables.

    let mut y = HashMap::new();
    for i in 0..n {
        for k in 0..m {
            let h = model.add_var(format!("y_{i}_{k}"), VarKind::Binary, None, None)?;
            y.insert((i, k), h);
        }
    }

    let mut t = HashMap::new();
    for i in 0..n {
        for k in 0..m {
            let h = model.add_var(format!("T_{i}_{k}"), VarKind::Continuous, Some(0.0), Some(24.0))?;
            t.insert((i, k), h);
        }
    }

    let max_tasks = model.add_var("max_tasks", VarKind::Continuous, Some(0.0), Some((n - 1) as f64))?;

    // 1. Single assignment.
    for i in 1..n {
        let mut expr = LinearExpr::zero();
        for k in 0..m {
            expr += y[&(i, k)];
        }
        model.add_linear_constraint(format!("assign_task_{i}"), expr, Sense::Eq, 1.0)?;
    }

    // 2. Flow conservation at tasks.
    for k in 0..m {
        for i in 1..n {
            let mut out_expr = LinearExpr::zero();
            let mut in_expr = LinearExpr::zero();
            for j in 0..n {
                if j == i {
                    continue;
                }
                out_expr += x[&(i, j, k)];
                in_expr += x[&(j, i, k)];
            }
            model.add_linear_constraint(format!("flow_out_{i}_{k}"), out_expr - y[&(i, k)], Sense::Eq, 0.0)?;
            model.add_linear_constraint(format!("flow_in_{i}_{k}"), in_expr - y[&(i, k)], Sense::Eq, 0.0)?;
        }
    }

    // 3. Depot flow.
    for k in 0..m {
        let mut n_k = LinearExpr::zero();
        for i in 1..n {
            n_k += y[&(i, k)];
        }
        let mut depart = LinearExpr::zero();
        let mut arrive = LinearExpr::zero();
        for j in 1..n {
            depart += x[&(0, j, k)];
            arrive += x[&(j, 0, k)];
        }
        model.add_linear_constraint(format!("start_depart_{k}"), depart - n_k.clone(), Sense::Eq, 0.0)?;
        model.add_linear_constraint(format!("start_return_{k}"), arrive - n_k, Sense::Eq, 0.0)?;
    }

    // 4. Skill compatibility.
    for (k, insp) in instance.inspectors.iter().enumerate() {
        let skills = insp.skill_set();
        for (idx, task) in instance.tasks.iter().enumerate() {
            let i = idx + 1;
            if !skills.contains(&task.required_skill) {
                model.add_linear_constraint(format!("skill_mismatch_{i}_{k}"), LinearExpr::from(y[&(i, k)]), Sense::Eq, 0.0)?;
            }
        }
    }

    // 5. Sequencing (Big-M).
    for k in 0..m {
        let dist = &distances[k];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                if j == 0 {
                    continue;
                }
                let travel = dist[i][j];
                let arc = x[&(i, j, k)];
                if i == 0 {
                    let mut expr = LinearExpr::from(t[&(j, k)]);
                    expr -= (big_m, arc);
                    model.add_linear_constraint(format!("time_seq_{i}_{j}_{k}"), expr, Sense::Ge, travel - big_m)?;
                } else {
                    let duration = instance.tasks[i - 1].duration;
                    let mut expr = LinearExpr::from(t[&(j, k)]) - t[&(i, k)];
                    expr -= (big_m, arc);
                    model.add_linear_constraint(format!("time_seq_{i}_{j}_{k}"), expr, Sense::Ge, duration + travel - big_m)?;
                }
            }
        }
    }

    // 6. Task time windows.
    for k in 0..m {
        for (idx, task) in instance.tasks.iter().enumerate() {
            let i = idx + 1;
            let y_ik = y[&(i, k)];
            let t_ik = t[&(i, k)];
            let mut lower = LinearExpr::from(t_ik);
            lower -= (big_m, y_ik);
            model.add_linear_constraint(format!("tw_lower_{i}_{k}"), lower, Sense::Ge, task.tw_start as f64 - big_m)?;
            let mut upper = LinearExpr::from(t_ik);
            upper += (big_m, y_ik);
            model.add_linear_constraint(format!("tw_upper_{i}_{k}"), upper, Sense::Le, task.tw_end as f64 - task.duration + big_m)?;
        }
    }

    // 7. Inspector availability.
    for (k, insp) in instance.inspectors.iter().enumerate() {
        for (idx, task) in instance.tasks.iter().enumerate() {
            let i = idx + 1;
            let y_ik = y[&(i, k)];
            let t_ik = t[&(i, k)];
            let mut lower = LinearExpr::from(t_ik);
            lower -= (big_m, y_ik);
            model.add_linear_constraint(format!("avail_start_{i}_{k}"), lower, Sense::Ge, insp.avail_start as f64 - big_m)?;
            let mut upper = LinearExpr::from(t_ik);
            upper += (big_m, y_ik);
            model.add_linear_constraint(format!("avail_end_{i}_{k}"), upper, Sense::Le, insp.avail_end as f64 - task.duration + big_m)?;
        }
    }

    // 8. Total duration within availability window.
    for (k, insp) in instance.inspectors.iter().enumerate() {
        let mut total = LinearExpr::zero();
        let dist = &distances[k];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                total += (dist[i][j], x[&(i, j, k)]);
            }
        }
        for (idx, task) in instance.tasks.iter().enumerate() {
            let i = idx + 1;
            total += (task.duration, y[&(i, k)]);
        }
        let max_route = (insp.avail_end - insp.avail_start) as f64;
        model.add_linear_constraint(format!("total_route_duration_{k}"), total, Sense::Le, max_route)?;
    }

    // 9. Max work hours.
    for (k, insp) in instance.inspectors.iter().enumerate() {
        let Some(max_hours) = insp.max_work_hours else {
            continue;
        };
        let mut total = LinearExpr::zero();
        let dist = &distances[k];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                total += (dist[i][j], x[&(i, j, k)]);
            }
        }
        for (idx, task) in instance.tasks.iter().enumerate() {
            let i = idx + 1;
            total += (task.duration, y[&(i, k)]);
        }
        model.add_linear_constraint(format!("max_work_hours_{k}"), total, Sense::Le, max_hours)?;
    }

    // 11. Load-balance definition.
    for k in 0..m {
        let mut expr = LinearExpr::zero();
        for i in 1..n {
            expr += y[&(i, k)];
        }
        model.add_linear_constraint(format!("max_tasks_bound_{k}"), expr - max_tasks, Sense::Le, 0.0)?;
    }

    // Objective: travel + load-balance penalty.
    let mut travel = LinearExpr::zero();
    for k in 0..m {
        let dist = &distances[k];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                travel += (dist[i][j], x[&(i, j, k)]);
            }
        }
    }
    let objective = travel + LinearExpr::from(max_tasks) * LOAD_BALANCE_WEIGHT.get();
    model.set_objective(objective, Direction::Minimize)?;

    model.set_parameter("time_limit_seconds", ParamValue::Number(params.time_limit))?;
    model.set_parameter("mip_gap", ParamValue::Number(0.0))?;
    model.set_parameter("silent", ParamValue::Bool(true))?;

    debug!(vars = model.vars().len(), constraints = model.constraints().len(), "routing model built");
    Ok((model, RoutingVars { x, y, t, max_tasks, distances }))
}
