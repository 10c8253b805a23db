use std::collections::{BTreeSet, HashMap, HashSet};

use mfsol_core::parse_skills;
use serde::{Deserialize, Serialize};

use crate::error::{BalancingError, BalancingResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub duration: f64,
    pub required_skills: String,
    /// Parsed and carried for forward-compatibility; not materialized as a
    /// constraint or objective term (spec's explicit Open Question on
    /// setup-times).
    #[serde(default)]
    pub setup_time: f64,
}

impl Task {
    pub fn required_skill_set(&self) -> BTreeSet<String> {
        parse_skills(&self.required_skills)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Station {
    pub skills: String,
}

impl Station {
    pub fn skill_set(&self) -> BTreeSet<String> {
        parse_skills(&self.skills)
    }
}

/// Optimization objective selector (spec §4.4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationMode {
    MinimizeStations,
    MinimizeCycleTime,
}

/// A validated line-balancing instance (spec §4.4).
#[derive(Clone, Debug)]
pub struct BalancingInstance {
    pub tasks: Vec<Task>,
    pub stations: Vec<Station>,
    pub precedences: Vec<(String, String)>,
    pub incompatibilities: Vec<(String, String)>,
}

impl BalancingInstance {
    pub fn build(
        tasks: Vec<Task>,
        stations: Vec<Station>,
        precedences: Vec<(String, String)>,
        incompatibilities: Vec<(String, String)>,
    ) -> BalancingResult<Self> {
        if stations.is_empty() {
            return Err(BalancingError::NonPositiveStations);
        }
        let mut seen = BTreeSet::new();
        for t in &tasks {
            if !seen.insert(t.id.clone()) {
                return Err(BalancingError::DuplicateTask(t.id.clone()));
            }
            if t.duration <= 0.0 {
                return Err(BalancingError::NonPositiveDuration(t.id.clone()));
            }
        }
        for (p, q) in &precedences {
            if !seen.contains(p) {
                return Err(BalancingError::DanglingPrecedence(p.clone()));
            }
            if !seen.contains(q) {
                return Err(BalancingError::DanglingPrecedence(q.clone()));
            }
        }
        for (a, b) in &incompatibilities {
            if !seen.contains(a) {
                return Err(BalancingError::DanglingIncompatibility(a.clone()));
            }
            if !seen.contains(b) {
                return Err(BalancingError::DanglingIncompatibility(b.clone()));
            }
        }
        let instance = BalancingInstance { tasks, stations, precedences, incompatibilities };
        instance.check_acyclic()?;
        Ok(instance)
    }

    fn check_acyclic(&self) -> BalancingResult<()> {
        let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
        for (p, q) in &self.precedences {
            adj.entry(p.as_str()).or_default().push(q.as_str());
        }
        let mut visiting: HashSet<&str> = HashSet::new();
        let mut done: HashSet<&str> = HashSet::new();

        fn visit<'a>(
            node: &'a str,
            adj: &HashMap<&'a str, Vec<&'a str>>,
            visiting: &mut HashSet<&'a str>,
            done: &mut HashSet<&'a str>,
        ) -> bool {
            if done.contains(node) {
                return true;
            }
            if !visiting.insert(node) {
                return false;
            }
            if let Some(children) = adj.get(node) {
                for &child in children {
                    if !visit(child, adj, visiting, done) {
                        return false;
                    }
                }
            }
            visiting.remove(node);
            done.insert(node);
            true
        }

        for t in &self.tasks {
            if !visit(t.id.as_str(), &adj, &mut visiting, &mut done) {
                return Err(BalancingError::PrecedenceCycle);
            }
        }
        Ok(())
    }

    pub fn num_stations(&self) -> usize {
        self.stations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn rejects_precedence_cycles() {
        let err = BalancingInstance::build(
            vec![task("T1", 1.0), task("T2", 1.0)],
            vec![station()],
            vec![("T1".into(), "T2".into()), ("T2".into(), "T1".into())],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, BalancingError::PrecedenceCycle));
    }

    #[test]
    fn rejects_dangling_precedence() {
        let err = BalancingInstance::build(vec![task("T1", 1.0)], vec![station()], vec![("T1".into(), "TX".into())], vec![]).unwrap_err();
        assert!(matches!(err, BalancingError::DanglingPrecedence(_)));
    }
}
