//! Strike-window sizing and edge-padded sliding windows.
//!
//! A strike bandwidth is given in price units, but the grid is indexed by
//! column. [`WindowSpec::for_strikes`] converts the bandwidth into a column
//! spread using the median strike spacing, and picks an odd window wide
//! enough to cover `±cutoff · sigma`.

use oi_core::{errors::Result, Real};

use crate::statistics::median;

/// Result of sizing a strike window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSpec {
    /// Number of columns in each neighborhood. Always odd, except `0` for an
    /// empty strike axis, and never larger than the number of strikes.
    pub size: usize,
    /// Kernel spread in columns. `0` when fewer than two strikes exist.
    pub sigma: Real,
    /// Median spacing between consecutive strikes, if at least two exist.
    pub median_spacing: Option<Real>,
}

impl WindowSpec {
    /// Size the window for a sorted strike axis.
    ///
    /// With `med` the median spacing, `sigma = strike_sigma / med` and the
    /// raw size is `2 · ceil(cutoff · sigma) + 1`. The size is then clamped
    /// to the largest odd number not exceeding the strike count, so the
    /// window never asks for neighbors the grid does not have.
    ///
    /// # Errors
    /// Returns an error if `strikes` is not strictly increasing or either
    /// `strike_sigma` or `cutoff` is not positive.
    pub fn for_strikes(strikes: &[Real], strike_sigma: Real, cutoff: Real) -> Result<Self> {
        oi_core::ensure!(
            strike_sigma.is_finite() && strike_sigma > 0.0,
            "strike_sigma must be positive, got {strike_sigma}"
        );
        oi_core::ensure!(
            cutoff.is_finite() && cutoff > 0.0,
            "cutoff must be positive, got {cutoff}"
        );
        oi_core::ensure!(
            strikes.windows(2).all(|w| w[0] < w[1]),
            "strikes must be strictly increasing"
        );

        let count = strikes.len();
        let spacings: Vec<Real> = strikes.windows(2).map(|w| w[1] - w[0]).collect();
        let Some(med) = median(&spacings) else {
            return Ok(Self {
                size: count,
                sigma: 0.0,
                median_spacing: None,
            });
        };

        let sigma = strike_sigma / med;
        let max_half = (count - 1) / 2;
        // `as` saturates, so a huge bandwidth cannot overflow here.
        let half = ((cutoff * sigma).ceil() as usize).min(max_half);
        Ok(Self {
            size: 2 * half + 1,
            sigma,
            median_spacing: Some(med),
        })
    }

    /// Columns on each side of the centre.
    pub fn half_width(&self) -> usize {
        self.size.saturating_sub(1) / 2
    }
}

/// Build one neighborhood of length `size` per element of `row`.
///
/// The row is edge-padded with `(size - 1) / 2` copies of its boundary values
/// on each side, then a symmetric window is sliced around every element.
/// `[10, 20, 30]` with `size = 3` yields `[10,10,20], [10,20,30], [20,30,30]`.
///
/// # Errors
/// Returns an error if `size` is even and non-zero.
pub fn sliding_windows<T: Copy>(row: &[T], size: usize) -> Result<Vec<Vec<T>>> {
    oi_core::ensure!(
        size % 2 == 1 || size == 0,
        "window size must be odd, got {size}"
    );
    let n = row.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    let pad = size.saturating_sub(1) / 2;
    Ok((0..n)
        .map(|i| {
            (0..size)
                .map(|j| {
                    // Index into the padded row, then clamp back onto the original.
                    let k = (i + j).saturating_sub(pad).min(n - 1);
                    row[k]
                })
                .collect()
        })
        .collect())
}
