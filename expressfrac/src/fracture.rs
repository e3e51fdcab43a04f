use std::sync::Arc;

use crate::{Error, Mesh};

/// Snapshot of the fracture at one point in time.
///
/// The solver derives each new snapshot from the previous converged one. Fields beyond the open
/// part of the fracture are zero.
#[derive(Clone, Debug, PartialEq)]
pub struct FractureState {
    mesh: Arc<Mesh>,
    /// Effective (height averaged) opening per cell.
    width: Vec<f64>,
    /// Net fluid pressure per cell.
    pressure: Vec<f64>,
    /// Distance from the wellbore to the fracture front.
    front_location: f64,
    /// Index of the first cell whose outer edge lies beyond the front.
    tip_ind: usize,
    /// Time at which each open cell opened. Zero for closed cells.
    exposure_time: Vec<f64>,
    time: f64,
}

impl FractureState {
    /// A closed fracture at time zero.
    pub fn new(mesh: Arc<Mesh>) -> Self {
        let nx = mesh.nx();
        FractureState {
            mesh,
            width: vec![0.0; nx],
            pressure: vec![0.0; nx],
            front_location: 0.0,
            tip_ind: 0,
            exposure_time: vec![0.0; nx],
            time: 0.0,
        }
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn width(&self) -> &[f64] {
        &self.width
    }

    pub fn pressure(&self) -> &[f64] {
        &self.pressure
    }

    pub fn front_location(&self) -> f64 {
        self.front_location
    }

    pub fn tip_ind(&self) -> usize {
        self.tip_ind
    }

    /// Last fully open cell, if any.
    ///
    /// Only a closed state without a front has none.
    pub fn survey_ind(&self) -> Option<usize> {
        self.tip_ind.checked_sub(1)
    }

    pub fn exposure_time(&self) -> &[f64] {
        &self.exposure_time
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Move the front to `front_location` and update the tip bookkeeping.
    ///
    /// Cells between the old and the new tip index get the current time as their exposure time.
    /// Cells left behind by a retreating front are closed again. Fails if no cell is fully open
    /// or if the tip cell would lie outside the mesh.
    pub fn update_front_location(&mut self, front_location: f64) -> Result<(), Error> {
        let tip_ind = self.mesh.count_edges_up_to(front_location);
        if tip_ind == 0 {
            return Err(Error::InvalidSurveyIndex { front_location });
        }
        if tip_ind >= self.mesh.nx() {
            return Err(Error::FrontOutsideMesh {
                front_location,
                xmax: self.mesh.xmax(),
            });
        }

        let old_tip_ind = self.tip_ind;
        if tip_ind > old_tip_ind {
            self.exposure_time[old_tip_ind..tip_ind].fill(self.time);
        } else {
            self.exposure_time[tip_ind..old_tip_ind].fill(0.0);
        }
        self.front_location = front_location;
        self.tip_ind = tip_ind;
        Ok(())
    }

    /// Replace the width with `width` padded by zeros to the mesh size.
    pub fn update_width(&mut self, width: &[f64]) -> Result<(), Error> {
        Self::fill_padded(&mut self.width, width)
    }

    /// Replace the pressure with `pressure` padded by zeros to the mesh size.
    pub fn update_pressure(&mut self, pressure: &[f64]) -> Result<(), Error> {
        Self::fill_padded(&mut self.pressure, pressure)
    }

    fn fill_padded(field: &mut [f64], values: &[f64]) -> Result<(), Error> {
        if values.len() > field.len() {
            return Err(Error::SizeMismatch {
                len: values.len(),
                nx: field.len(),
            });
        }
        let (head, tail) = field.split_at_mut(values.len());
        head.copy_from_slice(values);
        tail.fill(0.0);
        Ok(())
    }

    pub fn update_time(&mut self, time: f64) {
        self.time = time;
    }

    /// Distance the front has advanced into the tip cell.
    pub fn tip_distance(&self) -> f64 {
        (self.front_location - self.mesh.inner_edge(self.tip_ind)).max(0.0)
    }

    /// Fracture volume per unit height of the meshed wing.
    pub fn fracture_volume(&self) -> f64 {
        self.width
            .iter()
            .zip(self.mesh.dx().iter())
            .map(|(w, dx)| w * dx)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::*;
    use proptest::prelude::*;

    fn state(xmax: f64, nx: usize) -> FractureState {
        FractureState::new(Arc::new(Mesh::new(xmax, nx).unwrap()))
    }

    #[test]
    fn seed_front() {
        let mut frac = state(100.0, 200);
        frac.update_front_location(0.75).unwrap();
        assert_eq!(frac.tip_ind(), 1);
        assert_eq!(frac.survey_ind(), Some(0));
        assert_relative_eq!(frac.tip_distance(), 0.25);
    }

    #[test]
    fn short_front_is_rejected() {
        let mut frac = state(100.0, 200);
        assert!(matches!(
            frac.update_front_location(0.2),
            Err(Error::InvalidSurveyIndex { .. })
        ));
        assert!(matches!(
            frac.update_front_location(100.0),
            Err(Error::FrontOutsideMesh { .. })
        ));
    }

    #[test]
    fn closed_state_has_no_survey_cell() {
        let frac = state(100.0, 200);
        assert_eq!(frac.tip_ind(), 0);
        assert_eq!(frac.survey_ind(), None);
    }

    #[test]
    fn exposure_time_follows_the_tip() {
        let mut frac = state(10.0, 10);
        frac.update_front_location(1.5).unwrap();
        frac.update_time(3.0);
        frac.update_front_location(4.2).unwrap();
        frac.update_time(5.0);
        frac.update_front_location(2.0).unwrap();
        frac.update_front_location(6.0).unwrap();
        assert_eq!(
            &frac.exposure_time()[..7],
            &[0.0, 3.0, 5.0, 5.0, 5.0, 5.0, 0.0]
        );

        // Closing cells clears them.
        frac.update_front_location(2.0).unwrap();
        assert_eq!(frac.tip_ind(), 2);
        assert!(frac.exposure_time()[2..].iter().all(|&t| t == 0.0));
    }

    #[test]
    fn fields_are_padded() {
        let mut frac = state(4.0, 4);
        frac.update_width(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        frac.update_width(&[1.0, 2.0]).unwrap();
        assert_eq!(frac.width(), &[1.0, 2.0, 0.0, 0.0]);
        assert_relative_eq!(frac.fracture_volume(), 3.0);
        frac.update_pressure(&[5.0]).unwrap();
        assert_eq!(frac.pressure(), &[5.0, 0.0, 0.0, 0.0]);
        assert!(matches!(
            frac.update_width(&[0.0; 5]),
            Err(Error::SizeMismatch { len: 5, nx: 4 })
        ));
    }

    proptest! {
        #[test]
        fn tip_index_is_monotone(a in 0.5f64..99.0, b in 0.5f64..99.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let mut frac = state(100.0, 200);
            frac.update_front_location(lo).unwrap();
            let tip_lo = frac.tip_ind();
            frac.update_front_location(hi).unwrap();
            prop_assert!(tip_lo <= frac.tip_ind());
        }
    }
}
