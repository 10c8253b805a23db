use crate::var::VarHandle;
use smallvec::SmallVec;

/// A single `coefficient * variable` term of a linear expression.
#[derive(Clone, Copy, Debug)]
pub struct LinearTerm {
    pub coefficient: f64,
    pub var: VarHandle,
}

impl From<VarHandle> for LinearTerm {
    fn from(var: VarHandle) -> Self {
        LinearTerm { coefficient: 1.0, var }
    }
}

impl From<(f64, VarHandle)> for LinearTerm {
    fn from((coefficient, var): (f64, VarHandle)) -> Self {
        LinearTerm { coefficient, var }
    }
}

impl std::ops::Neg for LinearTerm {
    type Output = LinearTerm;
    fn neg(self) -> Self::Output {
        LinearTerm {
            coefficient: -self.coefficient,
            var: self.var,
        }
    }
}

/// A sparse sum of [`LinearTerm`]s plus a constant, backend-neutral the way
/// the teacher's `LinearSum` is (`solver/src/model/lang/linear.rs`), adapted
/// from rational/integer arithmetic to plain `f64` coefficients since spec
/// §3 requires model coefficients to be finite doubles.
///
/// Terms sharing the same variable are *not* merged eagerly; `add_var`
/// guarantees variable names are unique but a `LinearExpr` may reference the
/// same variable more than once (e.g. when a builder accumulates terms in a
/// loop) and the backend sums duplicates when it ingests the row.
#[derive(Clone, Debug, Default)]
pub struct LinearExpr {
    terms: SmallVec<[LinearTerm; 4]>,
    pub constant: f64,
}

impl LinearExpr {
    pub fn zero() -> Self {
        LinearExpr::default()
    }

    pub fn constant(c: f64) -> Self {
        LinearExpr {
            terms: SmallVec::new(),
            constant: c,
        }
    }

    pub fn terms(&self) -> &[LinearTerm] {
        &self.terms
    }

    pub fn push(&mut self, term: impl Into<LinearTerm>) {
        self.terms.push(term.into());
    }

    /// Returns every non-finite coefficient encountered, for the "finite
    /// doubles" validation required before a model is handed to the backend
    /// (spec §4.1: "non-finite values fail the build").
    pub fn has_non_finite(&self) -> bool {
        !self.constant.is_finite() || self.terms.iter().any(|t| !t.coefficient.is_finite())
    }
}

impl From<VarHandle> for LinearExpr {
    fn from(var: VarHandle) -> Self {
        LinearExpr {
            terms: SmallVec::from_elem(LinearTerm::from(var), 1),
            constant: 0.0,
        }
    }
}

impl From<f64> for LinearExpr {
    fn from(c: f64) -> Self {
        LinearExpr::constant(c)
    }
}

impl<T: Into<LinearTerm>> std::iter::FromIterator<T> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut e = LinearExpr::zero();
        for t in iter {
            e.push(t);
        }
        e
    }
}

impl<T: Into<LinearExpr>> std::ops::Add<T> for LinearExpr {
    type Output = LinearExpr;
    fn add(mut self, rhs: T) -> Self::Output {
        let rhs = rhs.into();
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl<T: Into<LinearExpr>> std::ops::Sub<T> for LinearExpr {
    type Output = LinearExpr;
    fn sub(mut self, rhs: T) -> Self::Output {
        let rhs = rhs.into();
        self.terms.extend(rhs.terms.into_iter().map(|t| -t));
        self.constant -= rhs.constant;
        self
    }
}

impl<T: Into<LinearTerm>> std::ops::AddAssign<T> for LinearExpr {
    fn add_assign(&mut self, rhs: T) {
        self.terms.push(rhs.into());
    }
}

impl<T: Into<LinearTerm>> std::ops::SubAssign<T> for LinearExpr {
    fn sub_assign(&mut self, rhs: T) {
        self.terms.push(-rhs.into());
    }
}

impl std::ops::Neg for LinearExpr {
    type Output = LinearExpr;
    fn neg(mut self) -> Self::Output {
        for t in &mut self.terms {
            *t = -*t;
        }
        self.constant = -self.constant;
        self
    }
}

impl std::ops::Mul<f64> for LinearExpr {
    type Output = LinearExpr;
    fn mul(mut self, rhs: f64) -> Self::Output {
        for t in &mut self.terms {
            t.coefficient *= rhs;
        }
        self.constant *= rhs;
        self
    }
}

impl std::ops::Mul<f64> for VarHandle {
    type Output = LinearTerm;
    fn mul(self, rhs: f64) -> Self::Output {
        LinearTerm { coefficient: rhs, var: self }
    }
}

impl std::ops::Mul<VarHandle> for f64 {
    type Output = LinearTerm;
    fn mul(self, rhs: VarHandle) -> Self::Output {
        LinearTerm { coefficient: self, var: rhs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(i: u32) -> VarHandle {
        VarHandle(i)
    }

    #[test]
    fn sum_accumulates_terms_and_constants() {
        let e = LinearExpr::from(h(0)) + LinearExpr::from(h(1)) + 3.0;
        assert_eq!(e.terms().len(), 2);
        assert_eq!(e.constant, 3.0);
    }

    #[test]
    fn sub_negates_rhs_terms() {
        let e = LinearExpr::from(h(0)) - (2.0 * h(1));
        assert_eq!(e.terms()[0].coefficient, 1.0);
        assert_eq!(e.terms()[1].coefficient, -2.0);
    }

    #[test]
    fn neg_flips_everything() {
        let e = -(LinearExpr::from(h(0)) + 5.0);
        assert_eq!(e.terms()[0].coefficient, -1.0);
        assert_eq!(e.constant, -5.0);
    }

    #[test]
    fn detects_non_finite_coefficients() {
        let mut e = LinearExpr::from(h(0));
        e.push((f64::NAN, h(1)));
        assert!(e.has_non_finite());
    }
}
