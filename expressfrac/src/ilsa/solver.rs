use std::sync::Arc;

use super::reduced::ReducedSystem;
use super::{SolveResult, SolverParams, Status};
use crate::notifier::Notifier;
use crate::{
    ElasticityKernel, Error, FractureState, KernelType, Mesh, PumpingSchedule,
    ReservoirProperties, StepReport, TipAsymptotic,
};

/// ILSA time stepping engine.
///
/// Owns the elasticity matrix and the tip asymptotic model, both fixed for the lifetime of the
/// solver.
pub struct Solver {
    mesh: Arc<Mesh>,
    reservoir: ReservoirProperties,
    schedule: PumpingSchedule,
    /// Elasticity matrix scaled by the plane strain modulus.
    elasticity: na::DMatrix<f64>,
    asymptotic: TipAsymptotic,
    params: SolverParams,
}

impl Solver {
    pub fn new(
        mesh: Arc<Mesh>,
        reservoir: ReservoirProperties,
        schedule: PumpingSchedule,
        params: SolverParams,
    ) -> Result<Self, Error> {
        reservoir.validate()?;
        params.validate()?;

        let e_prime = reservoir.e_prime();
        let kernel = ElasticityKernel::new(
            &mesh,
            reservoir.pay_zone_height,
            KernelType::Symmetric,
        );
        let elasticity = kernel.into_matrix() * e_prime;
        let asymptotic = TipAsymptotic::new(e_prime, reservoir.k_prime());

        Ok(Solver {
            mesh,
            reservoir,
            schedule,
            elasticity,
            asymptotic,
            params,
        })
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn reservoir(&self) -> &ReservoirProperties {
        &self.reservoir
    }

    pub fn schedule(&self) -> &PumpingSchedule {
        &self.schedule
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn asymptotic(&self) -> &TipAsymptotic {
        &self.asymptotic
    }

    /// Elasticity matrix relating width to net pressure.
    pub fn elasticity(&self) -> &na::DMatrix<f64> {
        &self.elasticity
    }

    /// Advance `initial` with time step `dt` until the end of the pumping schedule.
    ///
    /// The notifier receives a report after every converged step. The last step is shortened
    /// to end exactly at the end of the schedule. Returns the final state.
    pub fn solve<N>(
        &self,
        initial: &FractureState,
        dt: f64,
        notifier: &mut N,
    ) -> Result<FractureState, Error>
    where
        N: Notifier + ?Sized,
    {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(Error::invalid("TimeStep"));
        }
        if initial.mesh().as_ref() != self.mesh.as_ref() {
            return Err(Error::SizeMismatch {
                len: initial.mesh().nx(),
                nx: self.mesh.nx(),
            });
        }
        if initial.tip_ind() == 0 {
            return Err(Error::InvalidSurveyIndex {
                front_location: initial.front_location(),
            });
        }

        let init_volume = initial.fracture_volume();
        let time_start = initial.time();
        let time_end = self.schedule.time_end();
        let mut system = ReducedSystem::new(&self.elasticity);

        let mut fracture = initial.clone();
        let mut step = 0u64;
        let mut current_time = time_start;
        while current_time < time_end {
            step += 1;
            current_time = (time_start + step as f64 * dt).min(time_end);

            let (next, result) =
                self.solve_time_step(current_time, &fracture, init_volume, &mut system)?;
            log::info!(
                "Time {}: front at {} ({})",
                current_time,
                next.front_location(),
                result
            );

            notifier
                .notify(StepReport::new(&next, &self.schedule, &result))
                .map_err(|source| Error::Notifier { source })?;
            // The front never retreats, so smaller blocks are not needed again.
            system.release_below(next.tip_ind() + 1);
            fracture = next;
        }

        Ok(fracture)
    }

    /// Compute the fracture at `time` from the previous converged state.
    fn solve_time_step(
        &self,
        time: f64,
        previous: &FractureState,
        init_volume: f64,
        system: &mut ReducedSystem,
    ) -> Result<(FractureState, SolveResult), Error> {
        let SolverParams {
            front_tolerance,
            max_iterations,
            relaxation,
        } = self.params;
        let dx = self.mesh.dx();
        let xc = self.mesh.xc();

        let mut fracture = previous.clone();
        fracture.update_time(time);
        // Only one of the two symmetric wings is meshed.
        let frac_volume = init_volume
            + 0.5
                * self
                    .schedule
                    .injected_volume(self.schedule.time_start(), time);
        let max_tip_width = frac_volume / (2.0 * dx[0]);

        let mut error = f64::INFINITY;
        let mut iterations = 0;
        let mut front_prev = fracture.front_location();
        while error > front_tolerance && iterations < max_iterations {
            fracture.update_front_location(front_prev)?;
            let tip_ind = fracture.tip_ind();

            let tip_width = (self.asymptotic.volume(fracture.tip_distance()) / dx[tip_ind])
                .min(max_tip_width);

            let open = system.solve(&dx[..=tip_ind], tip_width, frac_volume, time)?;
            fracture.update_width(&open.width)?;
            fracture.update_pressure(&open.pressure)?;

            let survey_ind = fracture.survey_ind().ok_or(Error::InvalidSurveyIndex {
                front_location: fracture.front_location(),
            })?;
            let front_candidate =
                xc[survey_ind] + self.asymptotic.distance(fracture.width()[survey_ind]);

            // The front never retreats behind the last converged position.
            let front_new = (relaxation * front_candidate + (1.0 - relaxation) * front_prev)
                .max(previous.front_location());

            error = ((front_new - front_prev) / front_prev).abs();
            iterations += 1;
            log::debug!(
                "Front iteration {}: {} -> {} (error {:e})",
                iterations,
                front_prev,
                front_new,
                error
            );
            front_prev = front_new;
        }

        let status = if error <= front_tolerance {
            Status::Success
        } else {
            log::warn!(
                "Front iteration did not converge at time {} after {} iterations (error {:e})",
                time,
                iterations,
                error
            );
            Status::MaximumIterationsExceeded
        };

        Ok((
            fracture,
            SolveResult {
                iterations,
                error,
                status,
            },
        ))
    }
}
