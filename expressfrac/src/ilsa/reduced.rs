//! Elasticity solve restricted to the open part of the fracture.
//!
//! The width on the first `m` cells is a superposition `w = p0 e1 + Δp e2` of the responses to
//! a uniform unit pressure (`C e1 = 1`) and to a unit pressure on the tip cell alone
//! (`C e2 = δ_{m-1}`). The two coefficients follow from volume balance and the prescribed tip
//! width. The responses depend only on `m`, so they are computed once per sub-block size.

use crate::Error;

/// Unit responses of the leading `m × m` block of the elasticity matrix.
#[derive(Clone, Debug)]
struct Superposition {
    e1: na::DVector<f64>,
    e2: na::DVector<f64>,
}

impl Superposition {
    fn new(elasticity: &na::DMatrix<f64>, m: usize) -> Result<Self, Error> {
        log::debug!("Factoring elasticity block of size {}", m);
        let block = elasticity.view((0, 0), (m, m)).clone_owned();
        let mut rhs = na::DMatrix::zeros(m, 2);
        rhs.column_mut(0).fill(1.0);
        rhs[(m - 1, 1)] = 1.0;

        let solution = block
            .lu()
            .solve(&rhs)
            .ok_or(Error::SingularElasticity { size: m })?;
        if solution.iter().any(|x| !x.is_finite()) {
            return Err(Error::SingularElasticity { size: m });
        }

        Ok(Superposition {
            e1: solution.column(0).into_owned(),
            e2: solution.column(1).into_owned(),
        })
    }
}

/// Width and pressure on the open part of the fracture.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct OpenFields {
    pub width: Vec<f64>,
    pub pressure: Vec<f64>,
}

/// Cache of unit responses indexed by sub-block size.
pub(crate) struct ReducedSystem<'a> {
    elasticity: &'a na::DMatrix<f64>,
    responses: Vec<Option<Superposition>>,
}

impl<'a> ReducedSystem<'a> {
    pub fn new(elasticity: &'a na::DMatrix<f64>) -> Self {
        ReducedSystem {
            elasticity,
            responses: vec![None; elasticity.nrows() + 1],
        }
    }

    fn responses(&mut self, m: usize) -> Result<&Superposition, Error> {
        if m == 0 || m >= self.responses.len() {
            return Err(Error::SizeMismatch {
                len: m,
                nx: self.elasticity.nrows(),
            });
        }
        let slot = &mut self.responses[m];
        let responses = match slot.take() {
            Some(responses) => responses,
            None => Superposition::new(self.elasticity, m)?,
        };
        Ok(slot.insert(responses))
    }

    /// Drop the cached responses of all blocks smaller than `m`.
    pub fn release_below(&mut self, m: usize) {
        let end = m.min(self.responses.len());
        let released = self.responses[..end]
            .iter_mut()
            .filter_map(Option::take)
            .count();
        if released > 0 {
            log::debug!("Released {} elasticity blocks below size {}", released, m);
        }
    }

    /// Solve for the fields on the first `dx.len()` cells, matching the total volume
    /// `frac_volume` (per unit height) and the width `tip_width` in the last cell.
    ///
    /// `time` is only used to report failures.
    pub fn solve(
        &mut self,
        dx: &[f64],
        tip_width: f64,
        frac_volume: f64,
        time: f64,
    ) -> Result<OpenFields, Error> {
        let m = dx.len();
        let Superposition { e1, e2 } = self.responses(m)?;

        let volume_of = |e: &na::DVector<f64>| -> f64 {
            e.iter().zip(dx.iter()).map(|(e, dx)| e * dx).sum()
        };
        let coeffs = na::Matrix2::new(volume_of(e1), volume_of(e2), e1[m - 1], e2[m - 1]);
        let rhs = na::Vector2::new(frac_volume, tip_width);
        let solution = coeffs
            .lu()
            .solve(&rhs)
            .ok_or(Error::SingularElasticity { size: 2 })?;
        let (p0, dp_tip) = (solution[0], solution[1]);
        if !(p0.is_finite() && dp_tip.is_finite()) {
            return Err(Error::NonFiniteSolution { time });
        }

        let width = e1
            .iter()
            .zip(e2.iter())
            .map(|(e1, e2)| p0 * e1 + dp_tip * e2)
            .collect();
        let mut pressure = vec![p0; m];
        // The tip pressure perturbation cannot pull the faces together.
        pressure[m - 1] = dp_tip.max(0.0);

        Ok(OpenFields { width, pressure })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElasticityKernel, KernelType, Mesh};
    use approx::*;

    fn elasticity() -> (Mesh, na::DMatrix<f64>) {
        let mesh = Mesh::new(10.0, 20).unwrap();
        let kernel = ElasticityKernel::new(&mesh, 4.0, KernelType::Symmetric);
        (mesh, kernel.into_matrix() * 1e9)
    }

    #[test]
    fn volume_and_tip_width_are_matched() {
        let (mesh, c) = elasticity();
        let mut system = ReducedSystem::new(&c);
        let dx = &mesh.dx()[..6];
        let fields = system.solve(dx, 1e-4, 2e-3, 0.0).unwrap();

        let volume: f64 = fields.width.iter().zip(dx).map(|(w, dx)| w * dx).sum();
        assert_relative_eq!(volume, 2e-3, max_relative = 1e-10);
        assert_relative_eq!(fields.width[5], 1e-4, max_relative = 1e-10);
        assert!(fields.pressure[..5].iter().all(|&p| p == fields.pressure[0]));
        assert!(fields.pressure[5] >= 0.0);

        // The fields must satisfy the elasticity equation C w = p with the raw tip pressure.
        let block = c.view((0, 0), (6, 6)).clone_owned();
        let w = na::DVector::from_column_slice(&fields.width);
        let p = block * w;
        for i in 0..5 {
            assert_relative_eq!(p[i], fields.pressure[0], max_relative = 1e-8);
        }
    }

    #[test]
    fn responses_are_cached() {
        let (mesh, c) = elasticity();
        let mut system = ReducedSystem::new(&c);
        let first = system.solve(&mesh.dx()[..4], 1e-4, 1e-3, 0.0).unwrap();
        let _ = system.solve(&mesh.dx()[..7], 1e-4, 1e-3, 0.0).unwrap();
        let again = system.solve(&mesh.dx()[..4], 1e-4, 1e-3, 0.0).unwrap();
        assert_eq!(first, again);
        assert!(system.responses[4].is_some() && system.responses[7].is_some());
        assert!(system.responses[5].is_none());
    }

    #[test]
    fn released_blocks_are_refactored_on_demand() {
        let (mesh, c) = elasticity();
        let mut system = ReducedSystem::new(&c);
        let first = system.solve(&mesh.dx()[..3], 1e-4, 1e-3, 0.0).unwrap();
        system.solve(&mesh.dx()[..5], 1e-4, 1e-3, 0.0).unwrap();
        system.solve(&mesh.dx()[..6], 1e-4, 1e-3, 0.0).unwrap();

        system.release_below(5);
        assert!(system.responses[..5].iter().all(Option::is_none));
        assert!(system.responses[5].is_some() && system.responses[6].is_some());

        // Releasing past the end is harmless.
        system.release_below(100);
        assert!(system.responses.iter().all(Option::is_none));

        let again = system.solve(&mesh.dx()[..3], 1e-4, 1e-3, 0.0).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn oversized_block_is_rejected() {
        let (_, c) = elasticity();
        let mut system = ReducedSystem::new(&c);
        let dx = vec![0.5; 21];
        assert!(matches!(
            system.solve(&dx, 1e-4, 1e-3, 0.0),
            Err(Error::SizeMismatch { len: 21, nx: 20 })
        ));
    }
}
