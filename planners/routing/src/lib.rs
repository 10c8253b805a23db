//! Inspector routing builder (spec §4.3): assigns inspection tasks to
//! inspectors and sequences them under skill, time-window, and availability
//! constraints.

pub mod error;
pub mod extract;
pub mod instance;
pub mod model;
pub mod params;

pub use error::{RoutingError, RoutingResult};
pub use extract::{extract, RoutingKpis, RoutingSolution};
pub use instance::{Depot, Inspector, RoutingInstance, Task};
pub use model::{build_model, RoutingVars};
pub use params::RoutingParams;

#[cfg(test)]
mod tests {
    use super::*;
    use mfsol_core::RunId;
    use mfsol_testkit::ReferenceBackend;

    fn inspector(id: &str, x: f64, y: f64, skills: &str) -> Inspector {
        Inspector {
            id: id.to_string(),
            x,
            y,
            skills: skills.to_string(),
            avail_start: 0,
            avail_end: 24,
            max_work_hours: None,
        }
    }

    fn task(id: &str, x: f64, y: f64, skill: &str) -> Task {
        Task {
            id: id.to_string(),
            x,
            y,
            duration: 1.0,
            tw_start: 0,
            tw_end: 24,
            required_skill: skill.to_string(),
        }
    }

    /// Spec §8 scenario 2 ("Routing tiny"), scaled down to one inspector and
    /// one task so the reference backend's exhaustive search stays small.
    #[test]
    fn single_inspector_covers_the_one_matching_task() {
        let instance = RoutingInstance::build(
            vec![inspector("I1", 0.0, 0.0, "electrical")],
            vec![task("T1", 0.0, 0.0, "electrical")],
            Depot { x: 0.0, y: 0.0 },
        )
        .unwrap();
        let params = RoutingParams {
            use_depot_start: false,
            ..Default::default()
        };

        let (model, vars) = build_model(&instance, &params).unwrap();
        let result = model.solve(&ReferenceBackend::new()).unwrap();
        assert_eq!(result.status, mfsol_ir::SolveStatus::Optimal);

        let solution = extract(&RunId::from("r1"), &instance, &vars, &result);
        assert_eq!(solution.assignments.len(), 1);
        assert_eq!(solution.assignments[0].actor_id, "I1");
        assert_eq!(solution.assignments[0].unit_id, "T1");
        assert_eq!(solution.kpis.unrouted_tasks, 0);
    }

    /// Spec §8 scenario 6 ("Routing with depot-start but unreachable
    /// tasks"): a depot far enough away that the round trip can never fit in
    /// the inspector's availability window.
    #[test]
    fn unreachable_depot_start_is_infeasible() {
        let instance = RoutingInstance::build(
            vec![inspector("I1", 0.0, 0.0, "electrical")],
            vec![task("T1", 0.0, 0.0, "electrical")],
            Depot { x: 1000.0, y: 0.0 },
        )
        .unwrap();
        let params = RoutingParams {
            use_depot_start: true,
            ..Default::default()
        };

        let (model, _vars) = build_model(&instance, &params).unwrap();
        let result = model.solve(&ReferenceBackend::new()).unwrap();
        assert_eq!(result.status, mfsol_ir::SolveStatus::Infeasible);
        assert!(result.iis.is_some());
    }
}
