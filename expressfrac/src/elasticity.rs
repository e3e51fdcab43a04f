//! Boundary integral elasticity operator of the PKN model.
//!
//! Each entry couples a receiver cell to a uniform unit pressure applied on a source cell of a
//! fracture whose height is bounded by the pay zone. The matrix is dimensionless up to the plane
//! strain modulus, which the solver applies separately.

use std::f64::consts::PI;

use rayon::prelude::*;

use crate::Mesh;

/// Which wings of the fracture contribute to the operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KernelType {
    /// Both wings: each source is superposed with its mirror image about the wellbore, so
    /// that the half domain represents a symmetric two-wing fracture.
    Symmetric,
    /// Only the explicitly meshed wing.
    Asymmetric,
}

/// Dense `nx × nx` elasticity matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct ElasticityKernel {
    kernel_type: KernelType,
    matrix: na::DMatrix<f64>,
}

impl ElasticityKernel {
    /// Assemble the kernel for the given mesh and pay zone height.
    pub fn new(mesh: &Mesh, height: f64, kernel_type: KernelType) -> Self {
        let nx = mesh.nx();
        let xc = mesh.xc();
        let dx = mesh.dx();
        let coeff = -2.0 / (PI * PI * height);
        let scaled = |x: f64| 2.0 * x / height;

        // nalgebra storage is column major, so assemble one source column at a time.
        let mut data = vec![0.0; nx * nx];
        data.par_chunks_mut(nx)
            .enumerate()
            .for_each(|(src_idx, column)| {
                let src = xc[src_idx];
                let half = 0.5 * dx[src_idx];
                for (recv_idx, entry) in column.iter_mut().enumerate() {
                    let recv = xc[recv_idx];
                    let mut value =
                        g_kernel(scaled(src - half - recv)) - g_kernel(scaled(src + half - recv));
                    if kernel_type == KernelType::Symmetric {
                        value -= g_kernel(scaled(-(src - half) - recv))
                            - g_kernel(scaled(-(src + half) - recv));
                    }
                    *entry = coeff * value;
                }
            });

        ElasticityKernel {
            kernel_type,
            matrix: na::DMatrix::from_vec(nx, nx, data),
        }
    }

    pub fn kernel_type(&self) -> KernelType {
        self.kernel_type
    }

    /// Kernel entry for receiver `i` and source `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[(i, j)]
    }

    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn matrix(&self) -> &na::DMatrix<f64> {
        &self.matrix
    }

    pub fn into_matrix(self) -> na::DMatrix<f64> {
        self.matrix
    }
}

/// Hypersingular plane strain Green's function integrated over the fracture height.
pub fn g_kernel(s: f64) -> f64 {
    let s2 = s * s;
    ellipe(1.0 / (1.0 + s2)) * (1.0 + s2).sqrt() / s
}

/// Complete elliptic integral of the second kind `E(m) = ∫₀^{π/2} √(1 - m sin²θ) dθ`.
///
/// Uses the parameter convention `m = k²`. Valid for `m ≤ 1`; evaluated with the
/// arithmetic-geometric mean which converges quadratically.
pub fn ellipe(m: f64) -> f64 {
    if m == 1.0 {
        return 1.0;
    }
    if m.is_nan() || m > 1.0 {
        return f64::NAN;
    }

    let mut a = 1.0;
    let mut b = (1.0 - m).sqrt();
    let mut c = m.abs().sqrt();
    // Σ 2^(n-1) c_n², starting with c_0² = m.
    let mut sum = 0.5 * m;
    let mut pow2 = 0.5;
    for _ in 0..64 {
        if c.abs() <= f64::EPSILON * a {
            break;
        }
        let a_next = 0.5 * (a + b);
        let b_next = (a * b).sqrt();
        c = 0.5 * (a - b);
        pow2 *= 2.0;
        sum += pow2 * c * c;
        a = a_next;
        b = b_next;
    }

    // K(m) = π / (2 AGM(1, √(1-m))).
    let k = PI / (2.0 * a);
    k * (1.0 - sum)
}
