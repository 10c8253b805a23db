use mfsol_ir::{Direction, LinearExpr, Model, ParamValue, Sense, VarHandle, VarKind};
use tracing::debug;

use crate::error::ProductionResult;
use crate::instance::{ProductionInstance, PERIODS};
use crate::params::ProductionParams;

/// Per-period variable handles the Solution Extractor needs back (spec
/// §4.5).
pub struct ProductionVars {
    pub prod: [VarHandle; PERIODS],
    pub stock: [VarHandle; PERIODS],
    pub overtime: [VarHandle; PERIODS],
    pub workers: [VarHandle; PERIODS],
    pub hired: [VarHandle; PERIODS],
    pub fired: [VarHandle; PERIODS],
}

/// Builds the Model IR for a seasonal production instance (spec §4.5).
pub fn build_model(instance: &ProductionInstance, params: &ProductionParams) -> ProductionResult<(Model, ProductionVars)> {
    let mut model = Model::new("production");
    let demand = instance.monthly_demand();
    let total_demand: f64 = demand.iter().sum();

    // Generous but finite bounds (reference-backend compatibility, same
    // idiom as the rostering builder's slack variables): nothing in an
    // optimal plan ever needs to exceed producing/storing/staffing for the
    // whole horizon's demand at once.
    let prod_upper = total_demand + params.desired_final_stock;
    let stock_upper = total_demand + params.initial_stock;
    let workers_upper = params.initial_workers + total_demand;
    let overtime_upper = params.max_overtime_hours * workers_upper;

    let mut prod = [VarHandle::from_index(0); PERIODS];
    let mut stock = [VarHandle::from_index(0); PERIODS];
    let mut overtime = [VarHandle::from_index(0); PERIODS];
    let mut workers = [VarHandle::from_index(0); PERIODS];
    let mut hired = [VarHandle::from_index(0); PERIODS];
    let mut fired = [VarHandle::from_index(0); PERIODS];

    for t in 0..PERIODS {
        prod[t] = model.add_var(format!("Prod_{t}"), VarKind::Continuous, Some(0.0), Some(prod_upper))?;
        stock[t] = model.add_var(format!("Stock_{t}"), VarKind::Continuous, Some(0.0), Some(stock_upper))?;
        overtime[t] = model.add_var(format!("OT_{t}"), VarKind::Continuous, Some(0.0), Some(overtime_upper))?;
        workers[t] = model.add_var(format!("Workers_{t}"), VarKind::Integer, Some(0.0), Some(workers_upper))?;
        hired[t] = model.add_var(format!("Hired_{t}"), VarKind::Integer, Some(0.0), Some(workers_upper))?;
        fired[t] = model.add_var(format!("Fired_{t}"), VarKind::Integer, Some(0.0), Some(workers_upper))?;
    }

    // 1. Stock balance.
    {
        let expr = LinearExpr::from(stock[0]) - prod[0];
        model.add_linear_constraint("stock_balance_0", expr, Sense::Eq, params.initial_stock - demand[0])?;
    }
    for t in 1..PERIODS {
        let expr = LinearExpr::from(stock[t]) - stock[t - 1] - prod[t];
        model.add_linear_constraint(format!("stock_balance_{t}"), expr, Sense::Eq, -demand[t])?;
    }

    // 2. Labor balance.
    for t in 0..PERIODS {
        let mut expr = LinearExpr::zero();
        expr += (params.regular_hours, workers[t]);
        expr += overtime[t];
        expr -= (params.hours_per_unit, prod[t]);
        model.add_linear_constraint(format!("labor_balance_{t}"), expr, Sense::Eq, 0.0)?;
    }

    // 3. Overtime cap.
    for t in 0..PERIODS {
        let mut expr = LinearExpr::from(overtime[t]);
        expr -= (params.max_overtime_hours, workers[t]);
        model.add_linear_constraint(format!("overtime_cap_{t}"), expr, Sense::Le, 0.0)?;
    }

    // 4. Workforce balance. workers[-1] is the initial-workforce constant.
    {
        let expr = LinearExpr::from(workers[0]) - hired[0] + fired[0];
        model.add_linear_constraint("workforce_balance_0", expr, Sense::Eq, params.initial_workers)?;
    }
    for t in 1..PERIODS {
        let expr = LinearExpr::from(workers[t]) - workers[t - 1] - hired[t] + fired[t];
        model.add_linear_constraint(format!("workforce_balance_{t}"), expr, Sense::Eq, 0.0)?;
    }

    // 5. Final stock.
    model.add_linear_constraint("final_stock", LinearExpr::from(stock[PERIODS - 1]), Sense::Ge, params.desired_final_stock)?;

    // Objective.
    let mut objective = LinearExpr::zero();
    for t in 0..PERIODS {
        objective += (params.salary, workers[t]);
        objective += (params.ot_rate, overtime[t]);
        objective += (params.material_cost, prod[t]);
        objective += (params.storage_cost, stock[t]);
        objective += (params.hire_cost, hired[t]);
        objective += (params.layoff_cost, fired[t]);
    }
    model.set_objective(objective, Direction::Minimize)?;

    model.set_parameter("time_limit_seconds", ParamValue::Number(params.time_limit))?;
    model.set_parameter("mip_gap", ParamValue::Number(params.mip_gap))?;
    model.set_parameter("silent", ParamValue::Bool(true))?;

    debug!(vars = model.vars().len(), constraints = model.constraints().len(), "production model built");
    Ok((
        model,
        ProductionVars {
            prod,
            stock,
            overtime,
            workers,
            hired,
            fired,
        },
    ))
}
