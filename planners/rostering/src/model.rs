use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Weekday};
use mfsol_ir::{Direction, LinearExpr, Model, ParamValue, Sense, VarHandle, VarKind};
use tracing::debug;

use crate::error::RosteringResult;
use crate::instance::{RosteringInstance, ShiftKind};
use crate::params::RosteringParams;

/// Variable handles keyed the way the builder names them, kept around for
/// the Solution Extractor (spec §4.7) to read primal values back out.
pub struct RosterVars {
    pub x: HashMap<(String, NaiveDate, String), VarHandle>,
    pub y: HashMap<(NaiveDate, String, String), VarHandle>,
}

/// Shift pairs forbidden on consecutive days: either the clock rest gap is
/// below `min_rest_hours`, or it's a night shift followed by a "morning"
/// shift. The domain's shift type vocabulary is only {day, night} (spec
/// §4.2 Inputs), so the night->morning clause never actually fires — the
/// same dead clause exists in the source this was distilled from.
fn forbidden_pairs(shifts: &[crate::instance::Shift], min_rest_hours: u32) -> HashSet<(String, String)> {
    let mut forbidden = HashSet::new();
    for s1 in shifts {
        for s2 in shifts {
            let mut end1 = s1.end_time.split(':').next().unwrap_or("0").parse::<i64>().unwrap_or(0);
            let start2 = s2.start_time.split(':').next().unwrap_or("0").parse::<i64>().unwrap_or(0);
            if s1.kind == ShiftKind::Night && end1 < 12 {
                end1 += 24;
            }
            let gap = (24 - end1) + start2;
            if gap < min_rest_hours as i64 {
                forbidden.insert((s1.id.clone(), s2.id.clone()));
            }
        }
    }
    forbidden
}

fn shift_kind_str(kind: ShiftKind) -> &'static str {
    match kind {
        ShiftKind::Day => "day",
        ShiftKind::Night => "night",
    }
}

/// Builds the Model IR for a rostering instance (spec §4.2). Returns the
/// model plus the variable index the extractor needs.
pub fn build_model(instance: &RosteringInstance, params: &RosteringParams) -> RosteringResult<(Model, RosterVars)> {
    let mut model = Model::new("rostering");
    let dates = instance.dates();
    let all_skills = instance.all_skills();

    let mut x = HashMap::new();
    for e in &instance.employees {
        for t in &dates {
            let t_str = t.format("%Y-%m-%d").to_string();
            if e.is_unavailable(&t_str) {
                continue;
            }
            for s in &instance.shifts {
                let name = format!("x_{}_{}_{}", e.id, t_str, s.id);
                let h = model.add_var(name, VarKind::Binary, None, None)?;
                x.insert((e.id.clone(), *t, s.id.clone()), h);
            }
        }
    }

    let mut y = HashMap::new();
    for t in &dates {
        let t_str = t.format("%Y-%m-%d").to_string();
        for s in &instance.shifts {
            for u in &all_skills {
                // A slack cell can never usefully exceed the demand it covers
                // (workers >= 0, so the minimal y is max(0, required - workers)
                // <= required); bounding it here keeps the variable finite for
                // backends that require finite domains, without changing the
                // optimum.
                let required: u32 = instance
                    .demand
                    .iter()
                    .filter(|d| d.date == *t && d.shift_id == s.id && &d.skill == u)
                    .map(|d| d.required)
                    .sum();
                let name = format!("y_{}_{}_{}", t_str, s.id, u);
                let h = model.add_var(name, VarKind::Continuous, Some(0.0), Some(required as f64))?;
                y.insert((*t, s.id.clone(), u.clone()), h);
                if !params.allow_uncovered_demand {
                    model.add_linear_constraint(format!("y_zero_{}_{}_{}", t_str, s.id, u), LinearExpr::from(h), Sense::Le, 0.0)?;
                }
            }
        }
    }

    // C1: coverage (elastic)
    for t in &dates {
        let t_str = t.format("%Y-%m-%d").to_string();
        for s in &instance.shifts {
            for u in &all_skills {
                let required: u32 = instance
                    .demand
                    .iter()
                    .filter(|d| d.date == *t && d.shift_id == s.id && &d.skill == u)
                    .map(|d| d.required)
                    .sum();
                if required == 0 {
                    continue;
                }
                let mut expr = LinearExpr::zero();
                for e in &instance.employees {
                    if !e.has_skill(u) {
                        continue;
                    }
                    if let Some(&h) = x.get(&(e.id.clone(), *t, s.id.clone())) {
                        expr += h;
                    }
                }
                expr += y[&(*t, s.id.clone(), u.clone())];
                model.add_linear_constraint(format!("cov_{}_{}_{}", t_str, s.id, u), expr, Sense::Ge, required as f64)?;
            }
        }
    }

    // C2: one shift per day
    for e in &instance.employees {
        for t in &dates {
            let t_str = t.format("%Y-%m-%d").to_string();
            let mut expr = LinearExpr::zero();
            let mut any = false;
            for s in &instance.shifts {
                if let Some(&h) = x.get(&(e.id.clone(), *t, s.id.clone())) {
                    expr += h;
                    any = true;
                }
            }
            if any {
                model.add_linear_constraint(format!("one_shift_{}_{}", e.id, t_str), expr, Sense::Le, 1.0)?;
            }
        }
    }

    // C3: capacity
    for e in &instance.employees {
        let mut expr = LinearExpr::zero();
        for t in &dates {
            for s in &instance.shifts {
                if let Some(&h) = x.get(&(e.id.clone(), *t, s.id.clone())) {
                    expr += (s.length_hours, h);
                }
            }
        }
        model.add_linear_constraint(format!("max_hours_{}", e.id), expr, Sense::Le, e.max_hours)?;
    }

    // C4: rest & forward rotation
    let forbidden = forbidden_pairs(&instance.shifts, params.min_rest_hours);
    for e in &instance.employees {
        for window in dates.windows(2) {
            let (t_curr, t_next) = (window[0], window[1]);
            let t_str = t_curr.format("%Y-%m-%d").to_string();
            for (s1, s2) in &forbidden {
                let (Some(&h1), Some(&h2)) = (
                    x.get(&(e.id.clone(), t_curr, s1.clone())),
                    x.get(&(e.id.clone(), t_next, s2.clone())),
                ) else {
                    continue;
                };
                let expr = LinearExpr::from(h1) + h2;
                model.add_linear_constraint(format!("rest_rot_{}_{}_{}_{}", e.id, t_str, s1, s2), expr, Sense::Le, 1.0)?;
            }
        }
    }

    // C5: max consecutive working days
    let max_consec = params.max_consecutive_days as usize;
    if dates.len() > max_consec {
        for e in &instance.employees {
            for (i, window) in dates.windows(max_consec + 1).enumerate() {
                let mut expr = LinearExpr::zero();
                for t in window {
                    for s in &instance.shifts {
                        if let Some(&h) = x.get(&(e.id.clone(), *t, s.id.clone())) {
                            expr += h;
                        }
                    }
                }
                model.add_linear_constraint(format!("max_consec_{}_{}", e.id, i), expr, Sense::Le, max_consec as f64)?;
            }
        }
    }

    // C6: ICU ratio rule
    let icu_shifts: Vec<_> = instance.shifts.iter().filter(|s| s.is_icu()).collect();
    for t in &dates {
        let t_str = t.format("%Y-%m-%d").to_string();
        for s in &icu_shifts {
            let mut seniors = LinearExpr::zero();
            let mut juniors = LinearExpr::zero();
            let mut any = false;
            for e in &instance.employees {
                let Some(&h) = x.get(&(e.id.clone(), *t, s.id.clone())) else {
                    continue;
                };
                let skills: BTreeSet<String> = e.skill_set().iter().map(|s| s.to_uppercase()).collect();
                if skills.contains("SENIOR") {
                    seniors += h;
                    any = true;
                } else if skills.contains("JUNIOR") {
                    juniors += h;
                    any = true;
                }
            }
            if any {
                model.add_linear_constraint(format!("ratio_icu_{}_{}", t_str, s.id), seniors - juniors, Sense::Ge, 0.0)?;
            }
        }
    }

    // C7: max night shifts
    let night_shifts: Vec<_> = instance.shifts.iter().filter(|s| s.kind == ShiftKind::Night).collect();
    if !night_shifts.is_empty() {
        for e in &instance.employees {
            let mut expr = LinearExpr::zero();
            let mut any = false;
            for t in &dates {
                for s in &night_shifts {
                    if let Some(&h) = x.get(&(e.id.clone(), *t, s.id.clone())) {
                        expr += h;
                        any = true;
                    }
                }
            }
            if any {
                model.add_linear_constraint(format!("max_nights_{}", e.id), expr, Sense::Le, params.max_night_shifts as f64)?;
            }
        }
    }

    // C8: minimum shifts
    if params.min_shifts_per_employee > 0 {
        for e in &instance.employees {
            let mut expr = LinearExpr::zero();
            let mut any = false;
            for t in &dates {
                for s in &instance.shifts {
                    if let Some(&h) = x.get(&(e.id.clone(), *t, s.id.clone())) {
                        expr += h;
                        any = true;
                    }
                }
            }
            if any {
                model.add_linear_constraint(format!("min_shifts_{}", e.id), expr, Sense::Ge, params.min_shifts_per_employee as f64)?;
            }
        }
    }

    // C9: complete weekends
    if params.require_complete_weekends {
        for t in &dates {
            if t.weekday() != Weekday::Sat {
                continue;
            }
            let sunday = *t + chrono::Duration::days(1);
            if !dates.contains(&sunday) {
                continue;
            }
            let t_str = t.format("%Y-%m-%d").to_string();
            for e in &instance.employees {
                let mut sat_expr = LinearExpr::zero();
                let mut sat_any = false;
                let mut sun_expr = LinearExpr::zero();
                let mut sun_any = false;
                for s in &instance.shifts {
                    if let Some(&h) = x.get(&(e.id.clone(), *t, s.id.clone())) {
                        sat_expr += h;
                        sat_any = true;
                    }
                    if let Some(&h) = x.get(&(e.id.clone(), sunday, s.id.clone())) {
                        sun_expr += h;
                        sun_any = true;
                    }
                }
                if sat_any && sun_any {
                    model.add_linear_constraint(format!("complete_weekend_{}_{}", e.id, t_str), sat_expr - sun_expr, Sense::Eq, 0.0)?;
                }
            }
        }
    }

    // Objective: W1*cost + W2*uncovered + W3*preference
    let mut cost = LinearExpr::zero();
    for ((e_id, _t, s_id), &h) in &x {
        let emp = instance.employees.iter().find(|e| &e.id == e_id).expect("employee exists");
        let shift = instance.shifts.iter().find(|s| &s.id == s_id).expect("shift exists");
        cost += (emp.hourly_cost * shift.length_hours, h);
    }
    let mut uncovered = LinearExpr::zero();
    for &h in y.values() {
        uncovered += h;
    }
    let mut preference = LinearExpr::zero();
    for e in &instance.employees {
        for t in &dates {
            let t_str = t.format("%Y-%m-%d").to_string();
            for target in e.avoid_tokens(&t_str) {
                for s in &instance.shifts {
                    if s.id == target || shift_kind_str(s.kind) == target {
                        if let Some(&h) = x.get(&(e.id.clone(), *t, s.id.clone())) {
                            preference += h;
                        }
                    }
                }
            }
        }
    }

    let objective = cost + (uncovered * params.penalty_uncovered) + (preference * params.weight_preference);
    model.set_objective(objective, Direction::Minimize)?;

    model.set_parameter("time_limit_seconds", ParamValue::Number(params.solver_time_limit))?;
    model.set_parameter("mip_gap", ParamValue::Number(0.0))?;
    model.set_parameter("silent", ParamValue::Bool(true))?;

    debug!(vars = model.vars().len(), constraints = model.constraints().len(), "rostering model built");
    Ok((model, RosterVars { x, y }))
}
