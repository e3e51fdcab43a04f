use serde::{Deserialize, Serialize};

use crate::ilsa::{SolveResult, Status};
use crate::{FractureState, PumpingSchedule};

/// Summary of one converged time step.
///
/// Lengths and volumes cover both wings of the fracture. Volumes are per unit height.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub time: f64,
    pub fracture_length: f64,
    pub fracture_volume: f64,
    pub injected_volume: f64,
    /// Half length of the fracture.
    pub front_location: f64,
    pub front_iterations: u32,
    pub front_error: f64,
    pub converged: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshData {
    pub xc: Vec<f64>,
    pub dx: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    pub effective_width: Vec<f64>,
    pub fluid_pressure: Vec<f64>,
}

/// Result record delivered to the notifier after each converged time step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub summary: Summary,
    pub mesh: MeshData,
    pub results: FieldData,
}

impl StepReport {
    pub fn new(
        fracture: &FractureState,
        schedule: &PumpingSchedule,
        solve_result: &SolveResult,
    ) -> Self {
        let mesh = fracture.mesh();
        StepReport {
            summary: Summary {
                time: fracture.time(),
                fracture_length: 2.0 * fracture.front_location(),
                fracture_volume: 2.0 * fracture.fracture_volume(),
                injected_volume: schedule.injected_volume(schedule.time_start(), fracture.time()),
                front_location: fracture.front_location(),
                front_iterations: solve_result.iterations,
                front_error: solve_result.error,
                converged: solve_result.status == Status::Success,
            },
            mesh: MeshData {
                xc: mesh.xc().to_vec(),
                dx: mesh.dx().to_vec(),
            },
            results: FieldData {
                effective_width: fracture.width().to_vec(),
                fluid_pressure: fracture.pressure().to_vec(),
            },
        }
    }
}
