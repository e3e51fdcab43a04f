//! Implicit Level-Set Algorithm.
//!
//! Each time step jointly determines the front location, width and pressure by a relaxed fixed
//! point iteration on the front location. Every iterate solves the elasticity equation on the
//! open part of the fracture subject to global volume balance and the tip asymptotic width.

mod reduced;
pub mod solver;

pub use solver::*;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Parameters of the front iteration.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverParams {
    /// Tolerance on the relative change of the front location between iterates.
    pub front_tolerance: f64,
    /// Maximum number of front iterations per time step.
    pub max_iterations: u32,
    /// Weight of the new front candidate; `1` disables relaxation.
    pub relaxation: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            front_tolerance: 1e-4,
            max_iterations: 50,
            relaxation: 1.0,
        }
    }
}

impl SolverParams {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.front_tolerance.is_finite() && self.front_tolerance > 0.0) {
            return Err(Error::invalid("FrontTolerance"));
        }
        if self.max_iterations == 0 {
            return Err(Error::invalid("FrontMaxIter"));
        }
        if !(self.relaxation > 0.0 && self.relaxation <= 1.0) {
            return Err(Error::invalid("FrontRelaxationCoeff"));
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The relative front change dropped below the tolerance.
    Success,
    /// The iteration budget ran out. The last iterate is used regardless.
    MaximumIterationsExceeded,
}

/// Outcome of the front iteration in one time step.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Number of front iterations performed.
    pub iterations: u32,
    /// Relative front change at the last iteration.
    pub error: f64,
    pub status: Status,
}

impl std::fmt::Display for SolveResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} after {} iterations (error {:e})",
            self.status, self.iterations, self.error
        )
    }
}
