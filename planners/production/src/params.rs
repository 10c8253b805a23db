use serde::{Deserialize, Serialize};

/// The plant/economics parameter surface (spec §6 "13 numeric plant/economics
/// parameters"; the 13th, season count, is implied by the instance's season
/// list rather than carried here).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductionParams {
    pub initial_workers: f64,
    pub initial_stock: f64,
    pub hours_per_unit: f64,
    pub regular_hours: f64,
    pub max_overtime_hours: f64,
    pub salary: f64,
    pub ot_rate: f64,
    pub material_cost: f64,
    pub storage_cost: f64,
    pub hire_cost: f64,
    pub layoff_cost: f64,
    pub desired_final_stock: f64,
    #[serde(default = "default_time_limit")]
    pub time_limit: f64,
    #[serde(default = "default_mip_gap")]
    pub mip_gap: f64,
}

fn default_time_limit() -> f64 {
    TIME_LIMIT_SECONDS.get()
}
fn default_mip_gap() -> f64 {
    MIP_GAP.get()
}

pub static TIME_LIMIT_SECONDS: env_param::EnvParam<f64> = env_param::EnvParam::new("MFSOL_PRODUCTION_TIME_LIMIT_SECONDS", "60.0");
pub static MIP_GAP: env_param::EnvParam<f64> = env_param::EnvParam::new("MFSOL_PRODUCTION_MIP_GAP", "0.0");
