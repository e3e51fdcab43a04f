use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Elastic, fracture and leakoff properties of the pay zone.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReservoirProperties {
    /// Height of the pay zone `H` which also bounds the fracture height.
    pub pay_zone_height: f64,
    pub young_modulus: f64,
    pub poisson_ratio: f64,
    /// Fracture toughness `K_Ic`.
    pub toughness: f64,
    /// Carter leakoff coefficient `C_L`.
    pub leakoff_coefficient: f64,
}

impl ReservoirProperties {
    /// Validates and constructs reservoir properties.
    pub fn new(
        pay_zone_height: f64,
        young_modulus: f64,
        poisson_ratio: f64,
        toughness: f64,
        leakoff_coefficient: f64,
    ) -> Result<Self, Error> {
        let props = ReservoirProperties {
            pay_zone_height,
            young_modulus,
            poisson_ratio,
            toughness,
            leakoff_coefficient,
        };
        props.validate()?;
        Ok(props)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let positive = |x: f64| x.is_finite() && x > 0.0;
        if !positive(self.pay_zone_height) {
            return Err(Error::invalid("PayZoneHeight"));
        }
        if !positive(self.young_modulus) {
            return Err(Error::invalid("YoungModulus"));
        }
        // Plane strain modulus blows up as the material becomes incompressible.
        if !(self.poisson_ratio > -1.0 && self.poisson_ratio < 0.5) {
            return Err(Error::invalid("PoissonRatio"));
        }
        if !positive(self.toughness) {
            return Err(Error::invalid("Toughness"));
        }
        if !(self.leakoff_coefficient.is_finite() && self.leakoff_coefficient >= 0.0) {
            return Err(Error::invalid("LeakoffCoefficient"));
        }
        Ok(())
    }

    /// Plane strain modulus `E' = E / (1 - ν²)`.
    pub fn e_prime(&self) -> f64 {
        self.young_modulus / (1.0 - self.poisson_ratio * self.poisson_ratio)
    }

    /// Toughness parameter `K' = sqrt(32/π) K_Ic`.
    pub fn k_prime(&self) -> f64 {
        (32.0 / PI).sqrt() * self.toughness
    }

    /// Leakoff parameter `C' = 2 C_L`.
    pub fn c_prime(&self) -> f64 {
        2.0 * self.leakoff_coefficient
    }
}
