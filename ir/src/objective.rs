use crate::expr::LinearExpr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    Minimize,
    Maximize,
}

#[derive(Clone, Debug)]
pub struct Objective {
    pub expr: LinearExpr,
    pub direction: Direction,
}

impl Default for Objective {
    fn default() -> Self {
        Objective {
            expr: LinearExpr::zero(),
            direction: Direction::Minimize,
        }
    }
}
