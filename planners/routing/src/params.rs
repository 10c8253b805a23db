use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingParams {
    #[serde(default = "default_time_limit")]
    pub time_limit: f64,
    #[serde(default = "default_speed_kmh")]
    pub speed_kmh: f64,
    #[serde(default)]
    pub use_depot_start: bool,
}

fn default_time_limit() -> f64 {
    TIME_LIMIT_SECONDS.get()
}
fn default_speed_kmh() -> f64 {
    SPEED_KMH.get()
}

impl Default for RoutingParams {
    fn default() -> Self {
        RoutingParams {
            time_limit: default_time_limit(),
            speed_kmh: default_speed_kmh(),
            use_depot_start: false,
        }
    }
}

/// Sequencing Big-M (spec §9 "Big-M values"): tight for a 24-hour clock.
/// Infeasibility caused by this constant rather than the data is a known,
/// numerical failure mode, not a structural one — diagnose it via IIS.
pub static SEQUENCING_BIG_M: env_param::EnvParam<f64> = env_param::EnvParam::new("MFSOL_ROUTING_BIG_M", "10000.0");
pub static TIME_LIMIT_SECONDS: env_param::EnvParam<f64> = env_param::EnvParam::new("MFSOL_ROUTING_TIME_LIMIT_SECONDS", "60.0");
pub static SPEED_KMH: env_param::EnvParam<f64> = env_param::EnvParam::new("MFSOL_ROUTING_SPEED_KMH", "40.0");
/// Weight of the load-balance term relative to travel time in the objective.
pub static LOAD_BALANCE_WEIGHT: env_param::EnvParam<f64> = env_param::EnvParam::new("MFSOL_ROUTING_LOAD_BALANCE_WEIGHT", "0.1");
