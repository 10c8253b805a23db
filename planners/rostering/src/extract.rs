use mfsol_core::{Assignment, Period, RunId};
use mfsol_ir::SolverResult;

use crate::instance::RosteringInstance;
use crate::model::RosterVars;

/// Cost broken down the way the rostering objective is composed (spec §4.7
/// "cost breakdown for rostering").
#[derive(Clone, Debug, Default)]
pub struct RosteringKpis {
    pub labor_cost: f64,
    pub uncovered_demand: f64,
    pub preference_violations: u32,
}

pub struct RosteringSolution {
    pub assignments: Vec<Assignment>,
    pub kpis: RosteringKpis,
}

const ON_THRESHOLD: f64 = 0.5;

/// Reads primal values for `x`/`y` and reconstructs a roster (spec §4.7).
pub fn extract(run_id: &RunId, instance: &RosteringInstance, vars: &RosterVars, result: &SolverResult) -> RosteringSolution {
    let mut assignments = Vec::new();
    let mut labor_cost = 0.0;

    for ((e_id, date, s_id), &h) in &vars.x {
        let Some(value) = result.value_of(h) else { continue };
        if value <= ON_THRESHOLD {
            continue;
        }
        let emp = instance.employees.iter().find(|e| &e.id == e_id).expect("employee exists");
        let shift = instance.shifts.iter().find(|s| &s.id == s_id).expect("shift exists");
        let cost = emp.hourly_cost * shift.length_hours;
        labor_cost += cost;
        assignments.push(Assignment::new(run_id.clone(), e_id.clone(), Period::Date(*date), s_id.clone(), shift.length_hours, cost));
    }

    let uncovered_demand: f64 = vars.y.values().filter_map(|&h| result.value_of(h)).sum();

    let shift_kind_str = |kind: crate::instance::ShiftKind| match kind {
        crate::instance::ShiftKind::Day => "day",
        crate::instance::ShiftKind::Night => "night",
    };
    let mut preference_violations = 0u32;
    for a in &assignments {
        let Period::Date(date) = a.period else { continue };
        let emp = instance.employees.iter().find(|e| e.id == a.actor_id).expect("employee exists");
        let date_str = date.format("%Y-%m-%d").to_string();
        for target in emp.avoid_tokens(&date_str) {
            let shift = instance.shifts.iter().find(|s| s.id == a.unit_id).expect("shift exists");
            if shift.id == target || shift_kind_str(shift.kind) == target {
                preference_violations += 1;
            }
        }
    }

    RosteringSolution {
        assignments,
        kpis: RosteringKpis {
            labor_cost,
            uncovered_demand,
            preference_violations,
        },
    }
}
