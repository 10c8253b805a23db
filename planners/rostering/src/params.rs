use serde::{Deserialize, Serialize};

/// The rostering parameter surface (spec §6). Unknown JSON keys are
/// rejected by `serde(deny_unknown_fields)` the same way the Model IR
/// rejects an unknown `set_parameter` key.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosteringParams {
    #[serde(default = "default_time_limit")]
    pub solver_time_limit: f64,
    #[serde(default)]
    pub allow_uncovered_demand: bool,
    #[serde(default = "default_penalty_uncovered")]
    pub penalty_uncovered: f64,
    #[serde(default = "default_weight_preference")]
    pub weight_preference: f64,
    #[serde(default = "default_max_consecutive_days")]
    pub max_consecutive_days: u32,
    #[serde(default = "default_min_rest_hours")]
    pub min_rest_hours: u32,
    #[serde(default = "default_max_night_shifts")]
    pub max_night_shifts: u32,
    #[serde(default)]
    pub min_shifts_per_employee: u32,
    #[serde(default)]
    pub require_complete_weekends: bool,
}

fn default_time_limit() -> f64 {
    TIME_LIMIT_SECONDS.get()
}
fn default_penalty_uncovered() -> f64 {
    PENALTY_UNCOVERED.get()
}
fn default_weight_preference() -> f64 {
    WEIGHT_PREFERENCE.get()
}
fn default_max_consecutive_days() -> u32 {
    5
}
fn default_min_rest_hours() -> u32 {
    11
}
fn default_max_night_shifts() -> u32 {
    u32::MAX
}

impl Default for RosteringParams {
    fn default() -> Self {
        RosteringParams {
            solver_time_limit: default_time_limit(),
            allow_uncovered_demand: true,
            penalty_uncovered: default_penalty_uncovered(),
            weight_preference: default_weight_preference(),
            max_consecutive_days: default_max_consecutive_days(),
            min_rest_hours: default_min_rest_hours(),
            max_night_shifts: default_max_night_shifts(),
            min_shifts_per_employee: 0,
            require_complete_weekends: false,
        }
    }
}

/// Default objective weights, tunable without a code change the way the
/// teacher exposes solver knobs through `env_param::EnvParam` statics.
pub static TIME_LIMIT_SECONDS: env_param::EnvParam<f64> =
    env_param::EnvParam::new("MFSOL_ROSTERING_TIME_LIMIT_SECONDS", "30.0");
pub static PENALTY_UNCOVERED: env_param::EnvParam<f64> =
    env_param::EnvParam::new("MFSOL_ROSTERING_PENALTY_UNCOVERED", "1000.0");
pub static WEIGHT_PREFERENCE: env_param::EnvParam<f64> =
    env_param::EnvParam::new("MFSOL_ROSTERING_WEIGHT_PREFERENCE", "5.0");
