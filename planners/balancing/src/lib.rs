//! Line-balancing builder (spec §4.4): assigns tasks to ordered stations
//! under precedence, skill, and incompatibility constraints.

pub mod error;
pub mod extract;
pub mod instance;
pub mod model;
pub mod params;

pub use error::{BalancingError, BalancingResult};
pub use extract::{extract, BalancingKpis, BalancingSolution, StationPlan};
pub use instance::{BalancingInstance, OptimizationMode, Station, Task};
pub use model::{build_model, BalancingVars};
pub use params::BalancingParams;

#[cfg(test)]
mod tests {
    use super::*;
    use mfsol_core::RunId;
    use mfsol_testkit::ReferenceBackend;

    fn task(id: &str, duration: f64) -> Task {
        Task {
            id: id.to_string(),
            duration,
            required_skills: String::new(),
            setup_time: 0.0,
        }
    }

    fn station() -> Station {
        Station { skills: String::new() }
    }

    /// Spec §8 scenario 3 ("Balancing precedence chain"), scaled down to
    /// three tasks with a single precedence arc.
    #[test]
    fn precedence_is_respected_in_station_index() {
        let instance = BalancingInstance::build(
            vec![task("T1", 4.0), task("T2", 3.0), task("T3", 2.0)],
            vec![station(), station()],
            vec![("T1".into(), "T2".into())],
            vec![],
        )
        .unwrap();
        let params = BalancingParams {
            cycle_time: Some(6.0),
            ..Default::default()
        };

        let (model, vars) = build_model(&instance, &params).unwrap();
        let result = model.solve(&ReferenceBackend::new()).unwrap();
        assert_eq!(result.status, mfsol_ir::SolveStatus::Optimal);

        let solution = extract(&RunId::from("r1"), &instance, &vars, &result);
        let station_of = |id: &str| -> usize {
            solution
                .station_plans
                .iter()
                .find(|p| p.task_ids.iter().any(|t| t == id))
                .unwrap()
                .station_index
        };
        assert!(station_of("T1") <= station_of("T2"));
    }

    /// Boundary behavior (spec §8): a single task whose duration exceeds a
    /// *fixed* cycle-time target is infeasible.
    #[test]
    fn duration_over_fixed_cycle_target_is_infeasible() {
        let instance = BalancingInstance::build(vec![task("T1", 10.0)], vec![station()], vec![], vec![]).unwrap();
        let params = BalancingParams {
            cycle_time: Some(5.0),
            ..Default::default()
        };

        let (model, _vars) = build_model(&instance, &params).unwrap();
        let result = model.solve(&ReferenceBackend::new()).unwrap();
        assert_eq!(result.status, mfsol_ir::SolveStatus::Infeasible);
    }
}
