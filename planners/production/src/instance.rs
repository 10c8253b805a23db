use serde::{Deserialize, Serialize};

use crate::error::{ProductionError, ProductionResult};

pub const PERIODS: usize = 12;

/// One season's total demand, spread evenly across its months (spec §4.5
/// "season demands divided evenly across their months").
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Season {
    pub total_demand: f64,
    pub months: u32,
}

/// A validated 12-month production instance (spec §4.5).
#[derive(Clone, Debug)]
pub struct ProductionInstance {
    pub seasons: Vec<Season>,
}

impl ProductionInstance {
    pub fn build(seasons: Vec<Season>) -> ProductionResult<Self> {
        let mut total_months = 0u32;
        for s in &seasons {
            if s.months == 0 {
                return Err(ProductionError::EmptySeason);
            }
            total_months += s.months;
        }
        if total_months as usize != PERIODS {
            return Err(ProductionError::IncompleteHorizon(total_months as usize));
        }
        Ok(ProductionInstance { seasons })
    }

    /// Expands seasonal totals into the 12 monthly demand figures the
    /// builder works with.
    pub fn monthly_demand(&self) -> [f64; PERIODS] {
        let mut out = [0.0; PERIODS];
        let mut idx = 0;
        for season in &self.seasons {
            let per_month = season.total_demand / season.months as f64;
            for _ in 0..season.months {
                out[idx] = per_month;
                idx += 1;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_a_horizon_that_does_not_cover_twelve_months() {
        let err = ProductionInstance::build(vec![Season { total_demand: 100.0, months: 6 }]).unwrap_err();
        assert!(matches!(err, ProductionError::IncompleteHorizon(6)));
    }

    #[test]
    fn splits_season_demand_evenly_across_its_months() {
        let instance = ProductionInstance::build(vec![
            Season { total_demand: 30000.0, months: 3 },
            Season { total_demand: 30000.0, months: 3 },
            Season { total_demand: 50000.0, months: 3 },
            Season { total_demand: 30000.0, months: 3 },
        ])
        .unwrap();
        let demand = instance.monthly_demand();
        assert_eq!(demand[0], 10000.0);
        assert_eq!(demand[6], 50000.0 / 3.0);
    }
}
