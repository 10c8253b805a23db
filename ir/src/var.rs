use std::fmt;

/// The three variable kinds a backend must support (spec §4.1, §6).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VarKind {
    Binary,
    Integer,
    Continuous,
}

/// An opaque, dense handle into a [`crate::model::Model`]'s variable table.
///
/// Mirrors the teacher's `IVar`/`VarRef` newtype pattern: callers never see
/// the raw index, only an opaque, `Copy` handle returned by `add_var`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct VarHandle(pub(crate) u32);

impl VarHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Reconstructs a handle from a variable's position in
    /// [`crate::model::Model::vars`]. Used by backends to build a primal
    /// map without holding onto the handles `add_var` returned.
    pub fn from_index(index: u32) -> Self {
        VarHandle(index)
    }
}

impl fmt::Display for VarHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct VarDecl {
    pub name: String,
    pub kind: VarKind,
    pub lower: f64,
    pub upper: f64,
}

impl VarDecl {
    /// Default bounds for a kind when the caller does not override them
    /// (spec §4.1: "defaults: binary -> [0,1], integer/continuous -> [0, +inf)").
    pub fn default_bounds(kind: VarKind) -> (f64, f64) {
        match kind {
            VarKind::Binary => (0.0, 1.0),
            VarKind::Integer | VarKind::Continuous => (0.0, f64::INFINITY),
        }
    }
}
