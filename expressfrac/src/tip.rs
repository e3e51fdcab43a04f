use std::f64::consts::PI;

/// Toughness dominated (K-vertex) near tip asymptotic solution.
///
/// All relations are expressed in terms of the distance `s ≥ 0` from the fracture tip.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TipAsymptotic {
    e_prime: f64,
    k_prime: f64,
}

impl TipAsymptotic {
    pub fn new(e_prime: f64, k_prime: f64) -> Self {
        TipAsymptotic { e_prime, k_prime }
    }

    /// Opening at distance `s` from the tip: `w = (π/4)(K'/E') √s`.
    pub fn width(&self, s: f64) -> f64 {
        (PI / 4.0) * (self.k_prime / self.e_prime) * s.sqrt()
    }

    /// Volume between the tip and distance `s`: `(π/4)(2K'/3E') s^{3/2}`.
    pub fn volume(&self, s: f64) -> f64 {
        (PI / 4.0) * ((2.0 * self.k_prime) / (3.0 * self.e_prime)) * s.powf(1.5)
    }

    /// Distance from the tip at which the opening equals `w`.
    ///
    /// This inverts [`width`](Self::width).
    pub fn distance(&self, w: f64) -> f64 {
        let s = (4.0 / PI) * (self.e_prime / self.k_prime) * w;
        s * s
    }
}
