use std::path::Path;
use std::sync::Arc;

use crate::io::{load_config, LoadConfigError};
use crate::notifier::{CountingNotifier, Notifier};
use crate::{Config, Error, FractureState, Mesh, Solver};

/// Seed half-length in units of the first cell size.
const SEED_FRONT_CELLS: f64 = 1.5;
/// Width of the seed fracture on the first fully open cell and the tip cell.
const SEED_WIDTH: [f64; 2] = [1e-8, 1e-8];

/// Builds a solver from a [`Config`] and runs it from a small seed fracture.
pub struct Runner {
    solver: Solver,
    seed: FractureState,
    time_step: f64,
    case_name: String,
    notified: usize,
}

impl Runner {
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;
        let mesh = Arc::new(config.mesh()?);
        let seed = Self::seed(&mesh)?;
        let solver = Solver::new(
            mesh,
            config.reservoir_properties,
            config.schedule()?,
            config.solver_params(),
        )?;
        log::debug!(
            "Built solver for case {:?} with {} cells",
            config.case_name,
            solver.mesh().nx()
        );
        Ok(Runner {
            solver,
            seed,
            time_step: config.time_step(),
            case_name: config.case_name.clone(),
            notified: 0,
        })
    }

    /// Load the configuration at `path` and build a runner from it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadConfigError> {
        let config = load_config(path)?;
        Ok(Runner::new(&config)?)
    }

    fn seed(mesh: &Arc<Mesh>) -> Result<FractureState, Error> {
        let mut seed = FractureState::new(Arc::clone(mesh));
        seed.update_front_location(SEED_FRONT_CELLS * mesh.dx()[0])?;
        seed.update_width(&SEED_WIDTH)?;
        Ok(seed)
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    /// State the run starts from.
    pub fn initial_state(&self) -> &FractureState {
        &self.seed
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn case_name(&self) -> &str {
        &self.case_name
    }

    /// Number of reports delivered over all runs so far.
    pub fn notifications(&self) -> usize {
        self.notified
    }

    /// Run the whole schedule, forwarding every converged step to `notifier`.
    pub fn solve<N>(&mut self, notifier: &mut N) -> Result<FractureState, Error>
    where
        N: Notifier + ?Sized,
    {
        let mut counting = CountingNotifier {
            inner: notifier,
            count: &mut self.notified,
        };
        self.solver
            .solve(&self.seed, self.time_step, &mut counting)
    }
}
