//! Planar (PKN) hydraulic fracture propagation driven by the Implicit Level-Set Algorithm.
//!
//! The crate is organized leaves first: a uniform [`Mesh`], the [`ReservoirProperties`] and
//! [`PumpingSchedule`] describing the physical setup, the [`ElasticityKernel`] and
//! [`TipAsymptotic`] relations, the per-step [`FractureState`] and finally the
//! [`ilsa::Solver`] that advances it in time. A [`Runner`] wires all of these together from a
//! [`Config`].

pub mod config;
pub mod elasticity;
pub mod fracture;
pub mod ilsa;
pub mod io;
pub mod mesh;
pub mod notifier;
pub mod report;
pub mod reservoir;
pub mod runner;
pub mod schedule;
pub mod tip;

pub mod test_utils;

pub use self::config::*;
pub use self::elasticity::{ellipe, ElasticityKernel, KernelType};
pub use self::fracture::FractureState;
pub use self::ilsa::{SolveResult, Solver, SolverParams, Status};
pub use self::io::{load_config, LoadConfigError};
pub use self::mesh::Mesh;
pub use self::notifier::{Notifier, NotifyError};
pub use self::report::StepReport;
pub use self::reservoir::ReservoirProperties;
pub use self::runner::Runner;
pub use self::schedule::PumpingSchedule;
pub use self::tip::TipAsymptotic;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid parameter: {name:?}")]
    InvalidParameter { name: String },
    #[error(
        "Survey index is invalid at front location {front_location}. \
         Probably the fracture length is less than element size."
    )]
    InvalidSurveyIndex { front_location: f64 },
    #[error("Fracture front at {front_location} reached the end of the mesh at {xmax}")]
    FrontOutsideMesh { front_location: f64, xmax: f64 },
    #[error("Size mismatch: array of size {len} does not fit a mesh with {nx} cells")]
    SizeMismatch { len: usize, nx: usize },
    #[error("Singular elasticity system of size {size}")]
    SingularElasticity { size: usize },
    #[error("Non-finite elasticity solution at time {time}")]
    NonFiniteSolution { time: f64 },
    #[error("Notifier failed: {source}")]
    Notifier {
        #[source]
        source: NotifyError,
    },
}

impl Error {
    pub(crate) fn invalid(name: impl Into<String>) -> Self {
        Error::InvalidParameter { name: name.into() }
    }
}
