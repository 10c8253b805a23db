//! A small, deterministic reference [`SolverBackend`] for exercising the
//! submit -> solve -> extract pipeline in tests without a production MILP
//! solver (spec's "no custom branch-and-bound implementation" Non-goal
//! binds production code, not test fixtures — analogous to the teacher's
//! `examples/scheduling` crate, which builds its own toy search harness to
//! exercise `aries_solver` rather than depending on a real one).
//!
//! [`ReferenceBackend`] enumerates every variable's domain exhaustively, so
//! it only scales to the small instances an end-to-end test cares about; it
//! refuses models whose enumeration would exceed `max_enumerated` rather
//! than silently running for a long time.

use itertools::Itertools;
use mfsol_ir::{
    Constraint, Direction, IrError, IrResult, LinearExpr, Model, Sense, SolveStatus, SolverBackend,
    SolverResult, VarDecl, VarHandle, VarKind,
};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

const EPSILON: f64 = 1e-6;

/// Exhaustive-search reference backend. Not a production solver: every
/// variable must have finite bounds and the full Cartesian product of
/// domains must stay under `max_enumerated`.
pub struct ReferenceBackend {
    /// Grid step used to discretize a `Continuous` variable's domain.
    pub continuous_step: f64,
    /// Upper bound on the number of points enumerated before giving up.
    pub max_enumerated: u64,
}

impl Default for ReferenceBackend {
    fn default() -> Self {
        ReferenceBackend {
            continuous_step: 1.0,
            max_enumerated: 500_000,
        }
    }
}

impl ReferenceBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_continuous_step(mut self, step: f64) -> Self {
        self.continuous_step = step;
        self
    }

    fn domain(&self, decl: &VarDecl) -> IrResult<Vec<f64>> {
        if !decl.lower.is_finite() || !decl.upper.is_finite() {
            return Err(IrError::Backend(format!(
                "reference backend requires finite bounds, variable '{}' has [{}, {}]",
                decl.name, decl.lower, decl.upper
            )));
        }
        let values = match decl.kind {
            VarKind::Binary => vec![0.0, 1.0],
            VarKind::Integer => {
                let lo = decl.lower.round() as i64;
                let hi = decl.upper.round() as i64;
                (lo..=hi).map(|v| v as f64).collect()
            }
            VarKind::Continuous => {
                let mut v = decl.lower;
                let mut out = Vec::new();
                while v <= decl.upper + EPSILON {
                    out.push(v.min(decl.upper));
                    v += self.continuous_step;
                }
                if out.is_empty() {
                    out.push(decl.lower);
                }
                out
            }
        };
        Ok(values)
    }

    /// Builds the Cartesian product of every variable's domain, bailing out
    /// before materializing it if that would exceed `max_enumerated`.
    fn candidate_points(&self, model: &Model) -> IrResult<Vec<Vec<f64>>> {
        let domains: Vec<Vec<f64>> = model
            .vars()
            .iter()
            .map(|decl| self.domain(decl))
            .collect::<IrResult<_>>()?;
        let total: u64 = domains.iter().map(|d| d.len() as u64).product::<u64>().max(1);
        if total > self.max_enumerated {
            return Err(IrError::Backend(format!(
                "model has {total} candidate points, exceeding the reference backend's cap of {}",
                self.max_enumerated
            )));
        }
        if domains.is_empty() {
            return Ok(vec![vec![]]);
        }
        Ok(domains.into_iter().multi_cartesian_product().collect())
    }

    fn violated_constraints<'a>(&self, constraints: &'a [Constraint], point: &[f64]) -> Vec<&'a Constraint> {
        constraints
            .iter()
            .filter(|c| !satisfies(c, point))
            .collect()
    }
}

fn eval(expr: &LinearExpr, point: &[f64]) -> f64 {
    expr.terms()
        .iter()
        .map(|t| t.coefficient * point[t.var.index()])
        .sum::<f64>()
        + expr.constant
}

fn satisfies(c: &Constraint, point: &[f64]) -> bool {
    let lhs = eval(&c.expr, point);
    match c.sense {
        Sense::Le => lhs <= c.rhs + EPSILON,
        Sense::Ge => lhs >= c.rhs - EPSILON,
        Sense::Eq => (lhs - c.rhs).abs() <= EPSILON,
    }
}

fn to_primal(model: &Model, point: &[f64]) -> HashMap<VarHandle, f64> {
    (0..model.vars().len())
        .map(|i| (VarHandle::from_index(i as u32), point[i]))
        .collect()
}

impl SolverBackend for ReferenceBackend {
    fn solve(&self, model: &Model) -> IrResult<SolverResult> {
        let start = Instant::now();
        let points = self.candidate_points(model)?;
        let constraints = model.constraints();
        let objective = model.objective();

        let mut best: Option<(f64, &Vec<f64>)> = None;
        for point in &points {
            if !constraints.iter().all(|c| satisfies(c, point)) {
                continue;
            }
            let value = eval(&objective.expr, point);
            let better = match best {
                None => true,
                Some((best_value, _)) => match objective.direction {
                    Direction::Minimize => value < best_value - EPSILON,
                    Direction::Maximize => value > best_value + EPSILON,
                },
            };
            if better {
                best = Some((value, point));
            }
        }

        let wall_time = start.elapsed();
        match best {
            Some((value, point)) => {
                debug!(objective = value, "reference backend found optimum by exhaustive search");
                Ok(SolverResult {
                    status: SolveStatus::Optimal,
                    primal: Some(to_primal(model, point)),
                    objective_value: Some(value),
                    mip_gap: Some(0.0),
                    wall_time,
                    iis: None,
                    backend_code: None,
                })
            }
            None if points.is_empty() || model.vars().is_empty() => Ok(SolverResult {
                status: SolveStatus::NoSolution,
                primal: None,
                objective_value: None,
                mip_gap: None,
                wall_time,
                iis: None,
                backend_code: None,
            }),
            None => Ok(SolverResult {
                status: SolveStatus::Infeasible,
                primal: None,
                objective_value: None,
                mip_gap: None,
                wall_time,
                iis: None,
                backend_code: None,
            }),
        }
    }

    /// Finds the candidate point violating the fewest constraints and
    /// reports those as the conflicting set. Not a minimal IIS in the
    /// classical sense, but deterministic and good enough to drive the
    /// grouped infeasibility report in tests.
    fn compute_iis(&self, model: &Model) -> IrResult<Vec<String>> {
        let points = self.candidate_points(model)?;
        let constraints = model.constraints();
        if constraints.is_empty() {
            return Ok(vec![]);
        }
        let mut best: Option<(usize, Vec<&Constraint>)> = None;
        for point in &points {
            let violated = self.violated_constraints(constraints, point);
            if best.as_ref().map(|(n, _)| violated.len() < *n).unwrap_or(true) {
                let n = violated.len();
                best = Some((n, violated));
                if n == 0 {
                    break;
                }
            }
        }
        Ok(best
            .map(|(_, cs)| cs.into_iter().map(|c| c.name.clone()).collect())
            .unwrap_or_else(|| constraints.iter().map(|c| c.name.clone()).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mfsol_ir::{Sense, VarKind};

    #[test]
    fn solves_a_trivial_minimization() {
        let mut model = Model::new("t");
        let x = model.add_var("x", VarKind::Integer, Some(0.0), Some(5.0)).unwrap();
        model
            .add_linear_constraint("c1", LinearExpr::from(x), Sense::Ge, 3.0)
            .unwrap();
        model.set_objective(LinearExpr::from(x), Direction::Minimize).unwrap();

        let result = model.solve(&ReferenceBackend::new()).unwrap();
        assert_eq!(result.status, SolveStatus::Optimal);
        assert_eq!(result.objective_value, Some(3.0));
    }

    #[test]
    fn detects_infeasible_model_and_reports_iis() {
        let mut model = Model::new("t");
        let x = model.add_var("x", VarKind::Binary, None, None).unwrap();
        model
            .add_linear_constraint("lower", LinearExpr::from(x), Sense::Ge, 2.0)
            .unwrap();

        let result = model.solve(&ReferenceBackend::new()).unwrap();
        assert_eq!(result.status, SolveStatus::Infeasible);
        assert_eq!(result.iis.unwrap(), vec!["lower".to_string()]);
    }

    #[test]
    fn refuses_unbounded_variables() {
        let mut model = Model::new("t");
        model.add_var("x", VarKind::Continuous, None, None).unwrap();
        let err = ReferenceBackend::new().solve(&model).unwrap_err();
        assert!(matches!(err, IrError::Backend(_)));
    }
}
