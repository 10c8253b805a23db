use std::collections::HashMap;

use mfsol_ir::{Direction, LinearExpr, Model, ParamValue, Sense, VarHandle, VarKind};
use tracing::debug;

use crate::error::BalancingResult;
use crate::instance::{BalancingInstance, OptimizationMode};
use crate::params::BalancingParams;

/// Variable handles the Solution Extractor needs back (spec §4.4).
pub struct BalancingVars {
    pub a: HashMap<(usize, usize), VarHandle>,
    pub u: HashMap<usize, VarHandle>,
    pub load: HashMap<usize, VarHandle>,
    pub cycle: VarHandle,
}

/// Builds the Model IR for a line-balancing instance (spec §4.4).
pub fn build_model(instance: &BalancingInstance, params: &BalancingParams) -> BalancingResult<(Model, BalancingVars)> {
    let mut model = Model::new("balancing");
    let num_stations = params.max_stations.unwrap_or_else(|| instance.num_stations()).min(instance.num_stations());
    let stations: Vec<_> = instance.stations.iter().take(num_stations).collect();
    let total_duration: f64 = instance.tasks.iter().map(|t| t.duration).sum();
    let max_duration = instance.tasks.iter().map(|t| t.duration).fold(0.0_f64, f64::max);

    let mut a = HashMap::new();
    for (i, _) in instance.tasks.iter().enumerate() {
        for j in 0..stations.len() {
            let h = model.add_var(format!("a_{i}_{j}"), VarKind::Binary, None, None)?;
            a.insert((i, j), h);
        }
    }

    let mut u = HashMap::new();
    for j in 0..stations.len() {
        let h = model.add_var(format!("u_{j}"), VarKind::Binary, None, None)?;
        u.insert(j, h);
    }

    let mut load = HashMap::new();
    for j in 0..stations.len() {
        // A station's load can never usefully exceed the sum of every task's
        // duration; bounding it here keeps the variable finite.
        let h = model.add_var(format!("load_{j}"), VarKind::Continuous, Some(0.0), Some(total_duration))?;
        load.insert(j, h);
    }

    let cycle_upper = total_duration.max(max_duration);
    let cycle = model.add_var("cycle", VarKind::Continuous, Some(0.0), Some(cycle_upper))?;

    // 1. Every task assigned exactly once.
    for (i, task) in instance.tasks.iter().enumerate() {
        let mut expr = LinearExpr::zero();
        for j in 0..stations.len() {
            expr += a[&(i, j)];
        }
        model.add_linear_constraint(format!("assign_task_{}", task.id), expr, Sense::Eq, 1.0)?;
    }

    // 2. Precedence.
    for (p, q) in &instance.precedences {
        let pi = instance.tasks.iter().position(|t| &t.id == p).expect("validated task id");
        let qi = instance.tasks.iter().position(|t| &t.id == q).expect("validated task id");
        let mut p_expr = LinearExpr::zero();
        let mut q_expr = LinearExpr::zero();
        for j in 0..stations.len() {
            p_expr += (j as f64, a[&(pi, j)]);
            q_expr += (j as f64, a[&(qi, j)]);
        }
        model.add_linear_constraint(format!("precedence_{p}_{q}"), p_expr - q_expr, Sense::Le, 0.0)?;
    }

    // 3. Load definition.
    for j in 0..stations.len() {
        let mut expr = LinearExpr::from(load[&j]);
        for (i, task) in instance.tasks.iter().enumerate() {
            expr -= (task.duration, a[&(i, j)]);
        }
        model.add_linear_constraint(format!("time_station_{j}"), expr, Sense::Ge, 0.0)?;
    }

    // 4. Cycle bound.
    for j in 0..stations.len() {
        model.add_linear_constraint(format!("cycle_time_limit_{j}"), LinearExpr::from(load[&j]) - cycle, Sense::Le, 0.0)?;
    }

    // 5. Station-used linking.
    for j in 0..stations.len() {
        let mut expr = LinearExpr::zero();
        for i in 0..instance.tasks.len() {
            expr += a[&(i, j)];
        }
        expr -= (instance.tasks.len() as f64, u[&j]);
        model.add_linear_constraint(format!("station_used_{j}"), expr, Sense::Le, 0.0)?;
    }

    // 6. Cycle-time policy.
    if params.optimization_mode == OptimizationMode::MinimizeStations {
        if let Some(target) = params.cycle_time {
            model.add_linear_constraint("fixed_cycle_time", LinearExpr::from(cycle), Sense::Eq, target)?;
        } else {
            model.add_linear_constraint("min_cycle_time", LinearExpr::from(cycle), Sense::Ge, max_duration)?;
        }
    } else {
        model.add_linear_constraint("min_cycle_time", LinearExpr::from(cycle), Sense::Ge, max_duration)?;
    }

    // 7. Skill availability.
    for (i, task) in instance.tasks.iter().enumerate() {
        let required = task.required_skill_set();
        if required.is_empty() {
            continue;
        }
        for (j, station) in stations.iter().enumerate() {
            let covers = required.is_subset(&station.skill_set());
            if !covers {
                model.add_linear_constraint(format!("skill_constraint_{}_{j}", task.id), LinearExpr::from(a[&(i, j)]), Sense::Eq, 0.0)?;
            }
        }
    }

    // 8. Incompatibility.
    for (t1, t2) in &instance.incompatibilities {
        let i1 = instance.tasks.iter().position(|t| &t.id == t1).expect("validated task id");
        let i2 = instance.tasks.iter().position(|t| &t.id == t2).expect("validated task id");
        for j in 0..stations.len() {
            let expr = LinearExpr::from(a[&(i1, j)]) + a[&(i2, j)];
            model.add_linear_constraint(format!("incompatibility_{t1}_{t2}_{j}"), expr, Sense::Le, 1.0)?;
        }
    }

    // 9. Symmetry breaking.
    for j in 0..stations.len().saturating_sub(1) {
        model.add_linear_constraint(format!("symmetry_{j}"), LinearExpr::from(u[&j]) - u[&(j + 1)], Sense::Ge, 0.0)?;
    }

    let objective = match params.optimization_mode {
        OptimizationMode::MinimizeStations => {
            let mut expr = LinearExpr::zero();
            for j in 0..stations.len() {
                expr += u[&j];
            }
            expr
        }
        OptimizationMode::MinimizeCycleTime => LinearExpr::from(cycle),
    };
    model.set_objective(objective, Direction::Minimize)?;

    model.set_parameter("time_limit_seconds", ParamValue::Number(params.time_limit))?;
    model.set_parameter("mip_gap", ParamValue::Number(params.mip_gap))?;
    model.set_parameter("silent", ParamValue::Bool(true))?;

    debug!(vars = model.vars().len(), constraints = model.constraints().len(), "balancing model built");
    Ok((model, BalancingVars { a, u, load, cycle }))
}
