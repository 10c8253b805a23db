use mfsol_core::{Assignment, ErrorKind, RunId, RunStatus};
use mfsol_ir::{group_by_family, Model, SolveStatus, SolverBackend, SolverResult};

use crate::submission::Submission;

/// The outcome of running one submission's builder -> solve -> extract
/// pipeline through to a terminal status (spec §4.6 failure policy).
pub struct Outcome {
    pub status: RunStatus,
    pub objective_value: Option<f64>,
    pub logs: Option<String>,
    pub assignments: Vec<Assignment>,
}

type Extractor = Box<dyn FnOnce(&SolverResult) -> Vec<Assignment>>;

fn build(run_id: &RunId, submission: &Submission) -> Result<(Model, Extractor), ErrorKind> {
    match submission {
        Submission::Rostering { instance, params } => {
            let (model, vars) = mfsol_rostering::build_model(instance, params).map_err(Into::<ErrorKind>::into)?;
            let (run_id, instance) = (run_id.clone(), instance.clone());
            Ok((model, Box::new(move |result| mfsol_rostering::extract(&run_id, &instance, &vars, result).assignments)))
        }
        Submission::Routing { instance, params } => {
            let (model, vars) = mfsol_routing::build_model(instance, params).map_err(Into::<ErrorKind>::into)?;
            let (run_id, instance) = (run_id.clone(), instance.clone());
            Ok((model, Box::new(move |result| mfsol_routing::extract(&run_id, &instance, &vars, result).assignments)))
        }
        Submission::Balancing { instance, params } => {
            let (model, vars) = mfsol_balancing::build_model(instance, params).map_err(Into::<ErrorKind>::into)?;
            let (run_id, instance) = (run_id.clone(), instance.clone());
            Ok((model, Box::new(move |result| mfsol_balancing::extract(&run_id, &instance, &vars, result).assignments)))
        }
        Submission::Production { instance, params } => {
            let (model, vars) = mfsol_production::build_model(instance, params).map_err(Into::<ErrorKind>::into)?;
            let (run_id, instance, params) = (run_id.clone(), instance.clone(), params.clone());
            Ok((model, Box::new(move |result| mfsol_production::extract(&run_id, &instance, &params, &vars, result).assignments)))
        }
    }
}

/// Runs one submission to a terminal outcome against a concrete backend
/// (spec §4.6 state machine, §7 error kinds): build the Model IR, solve it,
/// and translate the Solver Result into the run status the coordinator
/// writes to the Run Store.
pub fn execute(run_id: &RunId, submission: &Submission, backend: &dyn SolverBackend) -> Outcome {
    let (model, extract) = match build(run_id, submission) {
        Ok(pair) => pair,
        Err(kind) => return settled(kind),
    };

    let result = match model.solve(backend) {
        Ok(result) => result,
        Err(ir_err) => return settled(ir_err.into()),
    };

    match result.status {
        SolveStatus::Optimal | SolveStatus::FeasibleTimeLimit => {
            let status = if result.status == SolveStatus::Optimal { RunStatus::Optimal } else { RunStatus::Feasible };
            let objective_value = result.objective_value;
            let assignments = extract(&result);
            Outcome {
                status,
                objective_value,
                logs: None,
                assignments,
            }
        }
        SolveStatus::NoSolution => Outcome {
            status: RunStatus::NoSolution,
            objective_value: None,
            logs: Some("solver time limit reached with no incumbent".to_string()),
            assignments: vec![],
        },
        SolveStatus::Infeasible => {
            // `Model::solve` already requested the IIS on an infeasible
            // result (spec §4.1 "on infeasible, the driver internally
            // requests a conflict subset").
            let iis = result.iis.unwrap_or_default();
            let by_family = group_by_family(&iis);
            let summary = by_family.iter().map(|(family, count)| format!("{family}:{count}")).collect::<Vec<_>>().join(", ");
            Outcome {
                status: RunStatus::Infeasible,
                objective_value: None,
                logs: Some(format!("infeasible; conflicting constraints [{}] ({summary})", iis.join(", "))),
                assignments: vec![],
            }
        }
        SolveStatus::Unbounded => Outcome {
            status: RunStatus::Error,
            objective_value: None,
            logs: Some("solver reported the model as unbounded".to_string()),
            assignments: vec![],
        },
        SolveStatus::Error => Outcome {
            status: RunStatus::Error,
            objective_value: None,
            logs: Some(format!("solver error (backend status {:?})", result.backend_code)),
            assignments: vec![],
        },
    }
}

fn settled(kind: ErrorKind) -> Outcome {
    Outcome {
        status: kind.terminal_status().unwrap_or(RunStatus::Error),
        objective_value: None,
        logs: Some(kind.to_string()),
        assignments: vec![],
    }
}
