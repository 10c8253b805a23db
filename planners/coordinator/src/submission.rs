use chrono::NaiveDate;
use mfsol_balancing::{BalancingInstance, BalancingParams};
use mfsol_production::{ProductionInstance, ProductionParams};
use mfsol_rostering::{RosteringInstance, RosteringParams};
use mfsol_routing::{RoutingInstance, RoutingParams};

/// A validated Problem Instance of one planner kind, paired with its typed
/// parameter set (spec §4.6 `submit(problem_kind, instance, parameters)`).
///
/// Each `*Instance::build` has already run Dataset Intake validation (spec
/// §7 `invalid_input`) before a `Submission` is constructed, so the
/// coordinator never rejects one synchronously — by the time it sees a
/// `Submission`, the only remaining failure modes are solver-time ones.
pub enum Submission {
    Rostering { instance: RosteringInstance, params: RosteringParams },
    Routing { instance: RoutingInstance, params: RoutingParams },
    Balancing { instance: BalancingInstance, params: BalancingParams },
    Production { instance: ProductionInstance, params: ProductionParams },
}

impl Submission {
    pub fn kind(&self) -> &'static str {
        match self {
            Submission::Rostering { .. } => "rostering",
            Submission::Routing { .. } => "routing",
            Submission::Balancing { .. } => "balancing",
            Submission::Production { .. } => "production",
        }
    }

    /// The Run's `horizon_start`/`horizon_days` columns (spec §6), when the
    /// submission's domain carries a genuine temporal horizon. Only
    /// rostering instances have one; the other three planners leave both
    /// `None`.
    pub fn horizon(&self) -> (Option<NaiveDate>, Option<u32>) {
        match self {
            Submission::Rostering { instance, .. } => (Some(instance.horizon_start), Some(instance.horizon_days)),
            Submission::Routing { .. } | Submission::Balancing { .. } | Submission::Production { .. } => (None, None),
        }
    }

    /// The opaque JSON projection of the submitted parameters, for the Run
    /// Store's `solver_params` column (spec §6 "opaque JSON").
    pub fn params_json(&self) -> serde_json::Value {
        match self {
            Submission::Rostering { params, .. } => serde_json::to_value(params),
            Submission::Routing { params, .. } => serde_json::to_value(params),
            Submission::Balancing { params, .. } => serde_json::to_value(params),
            Submission::Production { params, .. } => serde_json::to_value(params),
        }
        .unwrap_or(serde_json::Value::Null)
    }
}
