//! Run configuration.
//!
//! Field names follow the external input format, e.g.
//!
//! ```json
//! {
//!     "CaseName": "reference",
//!     "MeshProperties": { "xmax": 100.0, "nx": 200 },
//!     "ReservoirProperties": {
//!         "PayZoneHeight": 20.0, "YoungModulus": 2e9, "PoissonRatio": 0.3,
//!         "Toughness": 5e6, "LeakoffCoefficient": 0.0
//!     },
//!     "PumpingSchedule": { "Duration": 700.0, "Flowrate": 0.05 },
//!     "SolverSettings": {
//!         "TimeStep": 5.0, "FrontTolerance": 1e-4,
//!         "FrontMaxIter": 200, "FrontRelaxationCoeff": 0.7
//!     }
//! }
//! ```
//!
//! The pumping schedule may instead be given in stages as
//! `{ "Schedule": [t0, t1, ..., tn], "Flowrate": [q0, ..., qn-1] }`.

use serde::{Deserialize, Serialize};

use crate::{Error, Mesh, PumpingSchedule, ReservoirProperties, SolverParams};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshProperties {
    pub xmax: f64,
    pub nx: usize,
}

/// Injection schedule in one of the two accepted forms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PumpingScheduleConfig {
    /// Constant rate starting at time zero.
    Constant {
        #[serde(rename = "Duration")]
        duration: f64,
        #[serde(rename = "Flowrate")]
        flowrate: f64,
    },
    /// Piecewise constant rate with one rate per stage.
    Staged {
        #[serde(rename = "Schedule")]
        schedule: Vec<f64>,
        #[serde(rename = "Flowrate")]
        flowrate: Vec<f64>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SolverSettings {
    pub time_step: f64,
    pub front_tolerance: f64,
    pub front_max_iter: u32,
    pub front_relaxation_coeff: f64,
}

fn default_case_name() -> String {
    String::from("case")
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// Name of the case, used by front ends to name output.
    #[serde(default = "default_case_name")]
    pub case_name: String,
    pub mesh_properties: MeshProperties,
    pub reservoir_properties: ReservoirProperties,
    pub pumping_schedule: PumpingScheduleConfig,
    pub solver_settings: SolverSettings,
}

impl Config {
    /// Check every parameter without building the solver.
    pub fn validate(&self) -> Result<(), Error> {
        self.mesh()?;
        self.reservoir_properties.validate()?;
        self.schedule()?;
        self.solver_params().validate()?;
        let dt = self.solver_settings.time_step;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(Error::invalid("TimeStep"));
        }
        Ok(())
    }

    pub fn mesh(&self) -> Result<Mesh, Error> {
        Mesh::new(self.mesh_properties.xmax, self.mesh_properties.nx)
    }

    /// Normalize either schedule form into a [`PumpingSchedule`].
    pub fn schedule(&self) -> Result<PumpingSchedule, Error> {
        let height = self.reservoir_properties.pay_zone_height;
        match &self.pumping_schedule {
            PumpingScheduleConfig::Constant { duration, flowrate } => {
                PumpingSchedule::constant(*duration, *flowrate, height)
            }
            PumpingScheduleConfig::Staged { schedule, flowrate } => {
                PumpingSchedule::piecewise(schedule.clone(), flowrate.clone(), height)
            }
        }
    }

    pub fn solver_params(&self) -> SolverParams {
        let settings = &self.solver_settings;
        SolverParams {
            front_tolerance: settings.front_tolerance,
            max_iterations: settings.front_max_iter,
            relaxation: settings.front_relaxation_coeff,
        }
    }

    pub fn time_step(&self) -> f64 {
        self.solver_settings.time_step
    }
}
