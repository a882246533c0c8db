//! Gaussian reduction of intersected neighborhoods.

use oi_core::{Cell, TimeSeries, Timestamp};
use oi_math::{GaussianKernel, WindowSpec};

use crate::intersect::IntersectedRow;

/// Reduce every intersected neighborhood to a scalar with a sum-normalized
/// Gaussian of `spec.size` points and spread `spec.sigma` columns.
///
/// Rows without a neighborhood, neighborhoods containing a missing cell, and
/// degenerate kernels all produce missing values.
pub fn gaussian_dot(rows: &[IntersectedRow], spec: &WindowSpec) -> TimeSeries<Timestamp, Cell> {
    let kernel = GaussianKernel::new(spec.size, spec.sigma);
    rows.iter()
        .map(|row| {
            let value = match (&kernel, &row.window) {
                (Some(k), Some(w)) => k.apply(w),
                _ => None,
            };
            (row.dt, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use oi_core::utilities::parse_timestamp;

    fn row(t: &str, window: Option<Vec<Cell>>) -> IntersectedRow {
        IntersectedRow {
            dt: parse_timestamp(t).unwrap(),
            price: 100.0,
            grid_dt: None,
            strike: Some(100.0),
            window,
        }
    }

    fn spec(size: usize, sigma: f64) -> WindowSpec {
        WindowSpec {
            size,
            sigma,
            median_spacing: Some(1.0),
        }
    }

    #[test]
    fn weighted_dot_product() {
        let rows = vec![row("2025-01-08 09:31:00", Some(vec![Some(0.0), Some(3.0), Some(6.0)]))];
        let out = gaussian_dot(&rows, &spec(3, 1.0));
        // Symmetric weights on a linear neighborhood return the centre.
        assert_abs_diff_eq!(out.values()[0].unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_inputs_propagate() {
        let rows = vec![
            row("2025-01-08 09:31:00", None),
            row("2025-01-08 09:32:00", Some(vec![Some(1.0), None, Some(1.0)])),
            row("2025-01-08 09:33:00", Some(vec![Some(1.0); 3])),
        ];
        let out = gaussian_dot(&rows, &spec(3, 1.0));
        assert_eq!(out.values()[0], None);
        assert_eq!(out.values()[1], None);
        assert_abs_diff_eq!(out.values()[2].unwrap(), 1.0, epsilon = 1e-12);

        let degenerate = gaussian_dot(&rows, &spec(3, 0.0));
        assert!(degenerate.values().iter().all(Option::is_none));
    }
}
