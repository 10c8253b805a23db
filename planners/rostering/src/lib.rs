//! Hospital nurse rostering formulation builder (spec §4.2): assigns
//! employees to shifts across a horizon under skill, rest, fairness, and
//! demand constraints.

pub mod error;
pub mod extract;
pub mod instance;
pub mod model;
pub mod params;

pub use error::{RosteringError, RosteringResult};
pub use extract::{extract, RosteringKpis, RosteringSolution};
pub use instance::{DemandRow, Employee, RosteringInstance, Shift, ShiftKind};
pub use model::{build_model, RosterVars};
pub use params::RosteringParams;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mfsol_core::RunId;
    use mfsol_testkit::ReferenceBackend;
    use std::collections::HashMap;

    fn shift(id: &str, start: &str, end: &str, hours: f64, kind: ShiftKind) -> Shift {
        Shift {
            id: id.to_string(),
            name: id.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            length_hours: hours,
            kind,
        }
    }

    fn employee(id: &str, skills: &str, cost: f64, max_hours: f64) -> Employee {
        Employee {
            id: id.to_string(),
            skills: skills.to_string(),
            hourly_cost: cost,
            max_hours,
            availability: HashMap::new(),
        }
    }

    /// Spec §8 scenario 1 ("Roster tiny"), scaled down to two days so the
    /// reference backend's exhaustive search stays small.
    #[test]
    fn tiny_roster_covers_icu_demand_with_the_icu_skilled_employee() {
        let shifts = vec![
            shift("S1", "07:00", "15:00", 8.0, ShiftKind::Day),
            shift("S2", "15:00", "23:00", 8.0, ShiftKind::Day),
        ];
        let employees = vec![
            employee("E01", "RN", 30.0, 40.0),
            employee("E02", "RN|ICU", 45.0, 40.0),
        ];
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let demand = vec![
            DemandRow { date: start, shift_id: "S1".into(), skill: "RN".into(), required: 1 },
            DemandRow { date: start, shift_id: "S1".into(), skill: "ICU".into(), required: 1 },
        ];
        let instance = RosteringInstance::build(employees, shifts, demand, start, 1).unwrap();
        let params = RosteringParams {
            allow_uncovered_demand: false,
            max_night_shifts: 0,
            ..Default::default()
        };

        let (model, vars) = build_model(&instance, &params).unwrap();
        let result = model.solve(&ReferenceBackend::new()).unwrap();
        assert_eq!(result.status, mfsol_ir::SolveStatus::Optimal);

        let solution = extract(&RunId::from("r1"), &instance, &vars, &result);
        assert_eq!(solution.kpis.uncovered_demand, 0.0);
        let icu_assignment = solution.assignments.iter().find(|a| a.actor_id == "E02").unwrap();
        assert_eq!(icu_assignment.unit_id, "S1");
    }

    #[test]
    fn removing_the_icu_skilled_employee_makes_icu_demand_infeasible() {
        let shifts = vec![shift("ICU1", "07:00", "15:00", 8.0, ShiftKind::Day)];
        let employees = vec![employee("E01", "RN", 30.0, 40.0)];
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let demand = vec![DemandRow { date: start, shift_id: "ICU1".into(), skill: "ICU".into(), required: 1 }];
        let instance = RosteringInstance::build(employees, shifts, demand, start, 1).unwrap();
        let params = RosteringParams {
            allow_uncovered_demand: false,
            ..Default::default()
        };

        let (model, _vars) = build_model(&instance, &params).unwrap();
        let result = model.solve(&ReferenceBackend::new()).unwrap();
        assert_eq!(result.status, mfsol_ir::SolveStatus::Infeasible);
        assert!(result.iis.unwrap().iter().any(|name| name.starts_with("cov_")));
    }
}
