use crate::Error;

/// Uniform 1D discretization of one wing of the fracture plane.
///
/// Cells cover `[0, xmax]` with equal widths. The mesh is fixed for the lifetime of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    xmax: f64,
    /// Cell widths.
    dx: Vec<f64>,
    /// Cell center coordinates in ascending order.
    xc: Vec<f64>,
}

impl Mesh {
    /// Construct a uniform mesh of `nx` cells over `[0, xmax]`.
    pub fn new(xmax: f64, nx: usize) -> Result<Mesh, Error> {
        if !(xmax.is_finite() && xmax > 0.0) {
            return Err(Error::invalid("xmax"));
        }
        if nx == 0 {
            return Err(Error::invalid("nx"));
        }

        let dx_scalar = xmax / nx as f64;
        let dx = vec![dx_scalar; nx];
        let xc = (0..nx)
            .map(|i| dx_scalar * (i as f64 + 1.0) - 0.5 * dx_scalar)
            .collect();

        debug_assert!(approx::relative_eq!(
            dx.iter().sum::<f64>(),
            xmax,
            max_relative = 1e-10
        ));

        Ok(Mesh { xmax, dx, xc })
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    /// Number of cells.
    pub fn nx(&self) -> usize {
        self.dx.len()
    }

    pub fn dx(&self) -> &[f64] {
        &self.dx
    }

    pub fn xc(&self) -> &[f64] {
        &self.xc
    }

    /// Coordinate of the outer (right) edge of cell `i`.
    pub fn outer_edge(&self, i: usize) -> f64 {
        self.xc[i] + 0.5 * self.dx[i]
    }

    /// Coordinate of the inner (left) edge of cell `i`.
    pub fn inner_edge(&self, i: usize) -> f64 {
        self.xc[i] - 0.5 * self.dx[i]
    }

    /// Number of cell outer edges not exceeding `x`.
    ///
    /// Equivalent to a right-biased binary search over the sorted outer edges, so a point lying
    /// exactly on an edge counts that edge.
    pub fn count_edges_up_to(&self, x: f64) -> usize {
        // Edges are sorted, so the predicate is monotone.
        let nx = self.nx();
        let (mut lo, mut hi) = (0, nx);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.outer_edge(mid) <= x {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }
}
