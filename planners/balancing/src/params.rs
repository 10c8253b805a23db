use serde::{Deserialize, Serialize};

use crate::instance::OptimizationMode;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BalancingParams {
    #[serde(default = "default_optimization_mode")]
    pub optimization_mode: OptimizationMode,
    pub cycle_time: Option<f64>,
    /// Caps how many of the instance's candidate stations the builder uses
    /// (leading prefix); `None` uses every station the instance provides.
    pub max_stations: Option<usize>,
    #[serde(default = "default_time_limit")]
    pub time_limit: f64,
    #[serde(default = "default_mip_gap")]
    pub mip_gap: f64,
}

fn default_optimization_mode() -> OptimizationMode {
    OptimizationMode::MinimizeStations
}
fn default_time_limit() -> f64 {
    TIME_LIMIT_SECONDS.get()
}
fn default_mip_gap() -> f64 {
    MIP_GAP.get()
}

impl Default for BalancingParams {
    fn default() -> Self {
        BalancingParams {
            optimization_mode: default_optimization_mode(),
            cycle_time: None,
            max_stations: None,
            time_limit: default_time_limit(),
            mip_gap: default_mip_gap(),
        }
    }
}

pub static TIME_LIMIT_SECONDS: env_param::EnvParam<f64> = env_param::EnvParam::new("MFSOL_BALANCING_TIME_LIMIT_SECONDS", "60.0");
pub static MIP_GAP: env_param::EnvParam<f64> = env_param::EnvParam::new("MFSOL_BALANCING_MIP_GAP", "0.01");
