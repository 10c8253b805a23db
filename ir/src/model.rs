use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::backend::{ParamValue, SolverBackend, SolverResult};
use crate::constraint::{Constraint, Sense};
use crate::error::{IrError, IrResult};
use crate::expr::LinearExpr;
use crate::objective::{Direction, Objective};
use crate::var::{VarDecl, VarHandle, VarKind};

/// A backend-neutral MILP model: a variable table, a constraint table, a
/// single linear objective, and a bag of advisory solver parameters (spec
/// §4.1). Every domain builder (rostering, routing, balancing, production)
/// targets this type instead of a concrete solver SDK.
#[derive(Clone, Debug, Default)]
pub struct Model {
    name: String,
    vars: Vec<VarDecl>,
    var_names: HashMap<String, VarHandle>,
    constraints: Vec<Constraint>,
    constraint_names: HashMap<String, usize>,
    objective: Objective,
    params: HashMap<&'static str, ParamValue>,
}

/// Parameter keys a backend is guaranteed to receive (spec §4.1
/// `set_parameter`). Unknown keys are rejected at the call site so a typo in
/// a builder surfaces immediately instead of being silently ignored.
const KNOWN_PARAMS: &[&str] = &["time_limit_seconds", "mip_gap", "silent"];

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Model {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares a variable and returns a stable handle to it. `lower`/`upper`
    /// of `None` fall back to [`VarDecl::default_bounds`].
    pub fn add_var(
        &mut self,
        name: impl Into<String>,
        kind: VarKind,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> IrResult<VarHandle> {
        let name = name.into();
        if self.var_names.contains_key(&name) {
            return Err(IrError::DuplicateVariable(name));
        }
        let (default_lo, default_hi) = VarDecl::default_bounds(kind);
        let lower = lower.unwrap_or(default_lo);
        let upper = upper.unwrap_or(default_hi);
        if !lower.is_finite() && lower != f64::NEG_INFINITY || !upper.is_finite() && upper != f64::INFINITY {
            return Err(IrError::NonFinite(name));
        }
        let handle = VarHandle(self.vars.len() as u32);
        self.var_names.insert(name.clone(), handle);
        self.vars.push(VarDecl { name, kind, lower, upper });
        Ok(handle)
    }

    pub fn var_decl(&self, handle: VarHandle) -> &VarDecl {
        &self.vars[handle.index()]
    }

    pub fn vars(&self) -> &[VarDecl] {
        &self.vars
    }

    pub fn var_by_name(&self, name: &str) -> Option<VarHandle> {
        self.var_names.get(name).copied()
    }

    /// Adds a row `expr sense rhs`. Rejects non-finite coefficients, the
    /// constant folded into `rhs`, and duplicate constraint names (spec
    /// §4.1 edge cases).
    pub fn add_linear_constraint(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        sense: Sense,
        rhs: f64,
    ) -> IrResult<()> {
        let name = name.into();
        if self.constraint_names.contains_key(&name) {
            return Err(IrError::DuplicateConstraint(name));
        }
        if expr.has_non_finite() || !rhs.is_finite() {
            return Err(IrError::NonFinite(name));
        }
        let rhs = rhs - expr.constant;
        self.constraint_names.insert(name.clone(), self.constraints.len());
        self.constraints.push(Constraint { name, expr, sense, rhs });
        Ok(())
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn set_objective(&mut self, expr: LinearExpr, direction: Direction) -> IrResult<()> {
        if expr.has_non_finite() {
            return Err(IrError::NonFinite("objective".into()));
        }
        self.objective = Objective { expr, direction };
        Ok(())
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// Sets an advisory backend parameter. Rejected if `key` is not one of
    /// [`KNOWN_PARAMS`], so a misspelled key fails the build rather than
    /// silently changing nothing about the solve.
    pub fn set_parameter(&mut self, key: &str, value: ParamValue) -> IrResult<()> {
        let known = KNOWN_PARAMS
            .iter()
            .find(|k| **k == key)
            .ok_or_else(|| IrError::UnknownParameter(key.to_string()))?;
        self.params.insert(known, value);
        Ok(())
    }

    pub fn parameter(&self, key: &str) -> Option<ParamValue> {
        self.params.get(key).copied()
    }

    pub fn parameters(&self) -> impl Iterator<Item = (&'static str, ParamValue)> + '_ {
        self.params.iter().map(|(k, v)| (*k, *v))
    }

    /// Hands the model to `backend` for a single call-out (spec §4.1
    /// guarantee: "the Model IR never branches on domain semantics, it only
    /// performs a single call-out to the injected backend"). On an
    /// infeasible result the driver requests a conflict subset so the
    /// caller gets the IIS without a second round trip.
    #[instrument(level = "debug", skip(self, backend), fields(model = %self.name))]
    pub fn solve(&self, backend: &dyn SolverBackend) -> IrResult<SolverResult> {
        let mut result = backend.solve(self)?;
        if result.status == crate::backend::SolveStatus::Infeasible && result.iis.is_none() {
            debug!("model reported infeasible, requesting IIS");
            result.iis = Some(backend.compute_iis(self)?);
        }
        Ok(result)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "model {} ({} vars, {} constraints)", self.name, self.vars.len(), self.constraints.len())?;
        for v in &self.vars {
            writeln!(f, "  var {} : {:?} [{}, {}]", v.name, v.kind, v.lower, v.upper)?;
        }
        for c in &self.constraints {
            writeln!(f, "  {} : <row> {} {}", c.name, c.sense.symbol(), c.rhs)?;
        }
        writeln!(f, "  objective: {:?}", self.objective.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SolveStatus;
    use std::time::Duration;

    struct AlwaysOptimal;

    impl SolverBackend for AlwaysOptimal {
        fn solve(&self, model: &Model) -> IrResult<SolverResult> {
            let mut primal = HashMap::new();
            for (i, _) in model.vars().iter().enumerate() {
                primal.insert(VarHandle(i as u32), 1.0);
            }
            Ok(SolverResult {
                status: SolveStatus::Optimal,
                primal: Some(primal),
                objective_value: Some(0.0),
                mip_gap: Some(0.0),
                wall_time: Duration::from_millis(1),
                iis: None,
                backend_code: None,
            })
        }

        fn compute_iis(&self, _model: &Model) -> IrResult<Vec<String>> {
            Ok(vec![])
        }
    }

    #[test]
    fn rejects_duplicate_variable_names() {
        let mut m = Model::new("t");
        m.add_var("x", VarKind::Binary, None, None).unwrap();
        let err = m.add_var("x", VarKind::Binary, None, None).unwrap_err();
        assert!(matches!(err, IrError::DuplicateVariable(_)));
    }

    #[test]
    fn binary_default_bounds_are_zero_one() {
        let mut m = Model::new("t");
        let h = m.add_var("x", VarKind::Binary, None, None).unwrap();
        let d = m.var_decl(h);
        assert_eq!((d.lower, d.upper), (0.0, 1.0));
    }

    #[test]
    fn rejects_unknown_parameter_key() {
        let mut m = Model::new("t");
        let err = m.set_parameter("bogus", ParamValue::Bool(true)).unwrap_err();
        assert!(matches!(err, IrError::UnknownParameter(_)));
    }

    #[test]
    fn constraint_constant_folds_into_rhs() {
        let mut m = Model::new("t");
        let x = m.add_var("x", VarKind::Continuous, None, None).unwrap();
        let expr = LinearExpr::from(x) + 2.0;
        m.add_linear_constraint("c1", expr, Sense::Le, 5.0).unwrap();
        assert_eq!(m.constraints()[0].rhs, 3.0);
    }

    #[test]
    fn solve_populates_iis_on_infeasible() {
        struct AlwaysInfeasible;
        impl SolverBackend for AlwaysInfeasible {
            fn solve(&self, _model: &Model) -> IrResult<SolverResult> {
                Ok(SolverResult {
                    status: SolveStatus::Infeasible,
                    primal: None,
                    objective_value: None,
                    mip_gap: None,
                    wall_time: Duration::from_millis(1),
                    iis: None,
                    backend_code: None,
                })
            }
            fn compute_iis(&self, _model: &Model) -> IrResult<Vec<String>> {
                Ok(vec!["c1".to_string(), "c2".to_string()])
            }
        }
        let m = Model::new("t");
        let result = m.solve(&AlwaysInfeasible).unwrap();
        assert_eq!(result.iis.unwrap().len(), 2);
    }

    #[test]
    fn solve_delegates_to_backend() {
        let mut m = Model::new("t");
        m.add_var("x", VarKind::Binary, None, None).unwrap();
        let result = m.solve(&AlwaysOptimal).unwrap();
        assert_eq!(result.status, SolveStatus::Optimal);
    }
}
