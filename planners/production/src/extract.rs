use mfsol_core::{Assignment, Period, RunId};
use mfsol_ir::SolverResult;

use crate::instance::{ProductionInstance, PERIODS};
use crate::model::ProductionVars;
use crate::params::ProductionParams;

/// One month's plan (spec §4.7 "production plans (per month -> prod/workers
/// /overtime/stock/cost)").
#[derive(Clone, Debug)]
pub struct MonthlyPlan {
    pub month_index: u32,
    pub demand: f64,
    pub production: f64,
    pub workers: f64,
    pub hired: f64,
    pub fired: f64,
    pub overtime: f64,
    pub stock: f64,
    pub cost: f64,
}

#[derive(Clone, Debug, Default)]
pub struct ProductionKpis {
    pub annual_cost: f64,
}

pub struct ProductionSolution {
    pub assignments: Vec<Assignment>,
    pub monthly_plans: Vec<MonthlyPlan>,
    pub kpis: ProductionKpis,
}

/// Reads primal values per period and reconstructs the monthly plan (spec
/// §4.5, §4.7).
pub fn extract(run_id: &RunId, instance: &ProductionInstance, params: &ProductionParams, vars: &ProductionVars, result: &SolverResult) -> ProductionSolution {
    let demand = instance.monthly_demand();
    let mut monthly_plans = Vec::with_capacity(PERIODS);
    let mut assignments = Vec::with_capacity(PERIODS);
    let mut annual_cost = 0.0;

    for t in 0..PERIODS {
        let production = result.value_of(vars.prod[t]).unwrap_or(0.0);
        let workers = result.value_of(vars.workers[t]).unwrap_or(0.0);
        let hired = result.value_of(vars.hired[t]).unwrap_or(0.0);
        let fired = result.value_of(vars.fired[t]).unwrap_or(0.0);
        let overtime = result.value_of(vars.overtime[t]).unwrap_or(0.0);
        let stock = result.value_of(vars.stock[t]).unwrap_or(0.0);
        let cost =
            params.salary * workers + params.ot_rate * overtime + params.material_cost * production + params.storage_cost * stock + params.hire_cost * hired + params.layoff_cost * fired;
        annual_cost += cost;

        assignments.push(Assignment::new(run_id.clone(), "plant".to_string(), Period::Index(t as u32), "production".to_string(), production, cost).with_overtime(overtime > 0.0));
        monthly_plans.push(MonthlyPlan {
            month_index: t as u32,
            demand: demand[t],
            production,
            workers,
            hired,
            fired,
            overtime,
            stock,
            cost,
        });
    }

    ProductionSolution {
        assignments,
        monthly_plans,
        kpis: ProductionKpis { annual_cost },
    }
}
