use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use mfsol_core::parse_skills;
use serde::{Deserialize, Serialize};

use crate::error::{RosteringError, RosteringResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftKind {
    Day,
    Night,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub skills: String,
    pub hourly_cost: f64,
    pub max_hours: f64,
    /// Per-day tokens (`"unavailable"`, `"avoid_S3"`, `"avoid_night"`), keyed
    /// by ISO date string exactly as the source's JSON availability map is.
    pub availability: HashMap<String, Vec<String>>,
}

impl Employee {
    pub fn skill_set(&self) -> BTreeSet<String> {
        parse_skills(&self.skills)
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skill_set().contains(skill)
    }

    fn day_tokens(&self, date: &str) -> &[String] {
        self.availability.get(date).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn is_unavailable(&self, date: &str) -> bool {
        self.day_tokens(date).iter().any(|t| t == "unavailable")
    }

    pub fn avoid_tokens(&self, date: &str) -> impl Iterator<Item = &str> {
        self.day_tokens(date)
            .iter()
            .filter_map(|t| t.strip_prefix("avoid_"))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Shift {
    pub id: String,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub length_hours: f64,
    pub kind: ShiftKind,
}

impl Shift {
    pub fn is_icu(&self) -> bool {
        self.name.to_uppercase().contains("ICU") || self.id.to_uppercase().contains("ICU")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DemandRow {
    pub date: NaiveDate,
    pub shift_id: String,
    pub skill: String,
    pub required: u32,
}

/// A validated, immutable rostering instance (spec §4.2): Dataset Intake's
/// output, ready for the builder.
#[derive(Clone, Debug)]
pub struct RosteringInstance {
    pub employees: Vec<Employee>,
    pub shifts: Vec<Shift>,
    pub demand: Vec<DemandRow>,
    pub horizon_start: NaiveDate,
    pub horizon_days: u32,
}

impl RosteringInstance {
    /// Validates raw input records and assembles the instance (spec §4.2
    /// Dataset Intake supplement): duplicate ids, dangling shift references,
    /// an empty horizon, and non-positive shift lengths all fail here,
    /// before any variable is declared.
    pub fn build(
        employees: Vec<Employee>,
        shifts: Vec<Shift>,
        demand: Vec<DemandRow>,
        horizon_start: NaiveDate,
        horizon_days: u32,
    ) -> RosteringResult<Self> {
        if horizon_days == 0 {
            return Err(RosteringError::EmptyHorizon);
        }

        let mut seen_employees = BTreeSet::new();
        for e in &employees {
            if !seen_employees.insert(e.id.clone()) {
                return Err(RosteringError::DuplicateEmployee(e.id.clone()));
            }
        }

        let mut seen_shifts = BTreeSet::new();
        for s in &shifts {
            if !seen_shifts.insert(s.id.clone()) {
                return Err(RosteringError::DuplicateShift(s.id.clone()));
            }
            if s.length_hours <= 0.0 {
                return Err(RosteringError::NonPositiveShiftLength(s.id.clone()));
            }
        }

        for d in &demand {
            if !seen_shifts.contains(&d.shift_id) {
                return Err(RosteringError::DanglingShiftReference(d.shift_id.clone()));
            }
        }

        Ok(RosteringInstance {
            employees,
            shifts,
            demand,
            horizon_start,
            horizon_days,
        })
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        mfsol_core::date::horizon_dates(self.horizon_start, self.horizon_days)
    }

    pub fn all_skills(&self) -> BTreeSet<String> {
        self.demand.iter().map(|d| d.skill.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(id: &str) -> Shift {
        Shift {
            id: id.to_string(),
            name: id.to_string(),
            start_time: "07:00".into(),
            end_time: "15:00".into(),
            length_hours: 8.0,
            kind: ShiftKind::Day,
        }
    }

    #[test]
    fn rejects_empty_horizon() {
        let err = RosteringInstance::build(vec![], vec![], vec![], NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 0)
            .unwrap_err();
        assert!(matches!(err, RosteringError::EmptyHorizon));
    }

    #[test]
    fn rejects_dangling_demand_shift_reference() {
        let demand = vec![DemandRow {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            shift_id: "S9".into(),
            skill: "RN".into(),
            required: 1,
        }];
        let err = RosteringInstance::build(vec![], vec![shift("S1")], demand, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 1)
            .unwrap_err();
        assert!(matches!(err, RosteringError::DanglingShiftReference(_)));
    }

    #[test]
    fn rejects_duplicate_employee_ids() {
        let e = Employee {
            id: "E1".into(),
            skills: "RN".into(),
            hourly_cost: 10.0,
            max_hours: 40.0,
            availability: HashMap::new(),
        };
        let err = RosteringInstance::build(vec![e.clone(), e], vec![], vec![], NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 1)
            .unwrap_err();
        assert!(matches!(err, RosteringError::DuplicateEmployee(_)));
    }
}
