//! 1D interpolation trait, linear interpolation, and gap filling along the
//! strike axis.

use oi_core::{errors::Result, Cell, Real};

/// A 1D interpolation function `f: R → R` defined by a set of known points.
pub trait Interpolation1D: std::fmt::Debug {
    /// Evaluate the interpolation at `x`.
    fn operator(&self, x: Real) -> Real;

    /// Return the lower bound of the interpolation domain.
    fn x_min(&self) -> Real;

    /// Return the upper bound of the interpolation domain.
    fn x_max(&self) -> Real;

    /// Return `true` if `x` is within the interpolation range.
    fn is_in_range(&self, x: Real) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }
}

// ── Linear ────────────────────────────────────────────────────────────────────

/// Linear interpolation.
///
/// `f(x) = y[i] + (y[i+1] - y[i]) * (x - x[i]) / (x[i+1] - x[i])`
#[derive(Debug, Clone)]
pub struct LinearInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
}

impl LinearInterpolation {
    /// Construct a linear interpolation from sorted `xs` and corresponding `ys`.
    ///
    /// # Errors
    /// Returns an error if the slices have different lengths, fewer than 2
    /// points are given, or `xs` is not strictly increasing.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        oi_core::ensure!(xs.len() >= 2, "need at least 2 points for interpolation");
        oi_core::ensure!(
            xs.len() == ys.len(),
            "xs and ys must have the same length"
        );
        oi_core::ensure!(
            xs.windows(2).all(|w| w[0] < w[1]),
            "xs must be strictly increasing"
        );
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    fn locate(&self, x: Real) -> usize {
        // Binary search for the interval containing x
        let n = self.xs.len();
        if x <= self.xs[0] {
            return 0;
        }
        if x >= self.xs[n - 1] {
            return n - 2;
        }
        let mut lo = 0;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.xs[mid] <= x {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

impl Interpolation1D for LinearInterpolation {
    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }

    fn operator(&self, x: Real) -> Real {
        let i = self.locate(x);
        let dx = self.xs[i + 1] - self.xs[i];
        self.ys[i] + (x - self.xs[i]) * (self.ys[i + 1] - self.ys[i]) / dx
    }
}

// ── Gap filling ───────────────────────────────────────────────────────────────

/// Fill missing `ys` by linear interpolation over the known points.
///
/// Only gaps strictly inside the known range are filled; leading and
/// trailing gaps stay missing (no extrapolation). Rows with fewer than two
/// known points are returned unchanged.
///
/// # Errors
/// Returns an error if the slices differ in length or `xs` is not strictly
/// increasing.
pub fn fill_gaps(xs: &[Real], ys: &[Cell]) -> Result<Vec<Cell>> {
    oi_core::ensure!(
        xs.len() == ys.len(),
        "xs ({}) and ys ({}) must have the same length",
        xs.len(),
        ys.len()
    );
    let (known_x, known_y): (Vec<Real>, Vec<Real>) = xs
        .iter()
        .zip(ys)
        .filter_map(|(&x, y)| y.map(|y| (x, y)))
        .unzip();
    if known_x.len() < 2 {
        return Ok(ys.to_vec());
    }
    let interp = LinearInterpolation::new(&known_x, &known_y)?;
    Ok(xs
        .iter()
        .zip(ys)
        .map(|(&x, y)| match y {
            Some(_) => *y,
            None if interp.is_in_range(x) => Some(interp.operator(x)),
            None => None,
        })
        .collect())
}
