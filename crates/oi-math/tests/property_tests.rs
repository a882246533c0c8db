//! Property-based tests using proptest.
//!
//! These exercise the kernel, window-sizing, and interpolation invariants
//! across random inputs rather than fixed examples.

use oi_math::{fill_gaps, sliding_windows, GaussianKernel, WindowSpec};
use proptest::prelude::*;

// --- Kernel normalization ---

proptest! {
    /// Every well-formed kernel sums to one, and therefore maps a constant
    /// neighborhood onto that constant.
    #[test]
    fn kernel_weights_sum_to_one(
        half in 0_usize..40,
        sigma in 0.05_f64..50.0,
        level in -1.0e4_f64..1.0e4,
    ) {
        let size = 2 * half + 1;
        let kernel = GaussianKernel::new(size, sigma).unwrap();
        let total: f64 = kernel.weights().iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-12, "sum = {}", total);

        let out = kernel.apply(&vec![Some(level); size]).unwrap();
        prop_assert!((out - level).abs() <= 1e-9 * level.abs().max(1.0));
    }
}

// --- Window clamp ---

proptest! {
    /// The window never exceeds the strike count and is odd whenever the
    /// axis is non-empty.
    #[test]
    fn window_never_exceeds_strike_count(
        gaps in prop::collection::vec(0.01_f64..10.0, 0..60),
        strike_sigma in 0.001_f64..1.0e4,
    ) {
        let mut strikes = vec![100.0];
        for g in &gaps {
            let last = strikes[strikes.len() - 1];
            strikes.push(last + g);
        }
        let spec = WindowSpec::for_strikes(&strikes, strike_sigma, 3.5).unwrap();
        prop_assert!(spec.size <= strikes.len());
        prop_assert_eq!(spec.size % 2, 1);
        if strikes.len() == 1 {
            prop_assert_eq!(spec.size, 1);
        }
    }

    /// Sliding windows always have the requested length and only contain
    /// values from the row.
    #[test]
    fn sliding_windows_have_requested_length(
        row in prop::collection::vec(-100_i64..100, 1..30),
        half in 0_usize..20,
    ) {
        let size = 2 * half + 1;
        let windows = sliding_windows(&row, size).unwrap();
        prop_assert_eq!(windows.len(), row.len());
        for (i, w) in windows.iter().enumerate() {
            prop_assert_eq!(w.len(), size);
            prop_assert_eq!(w[half], row[i]);
            prop_assert!(w.iter().all(|v| row.contains(v)));
        }
    }
}

// --- Interpolation boundedness ---

proptest! {
    /// Filled values stay within the range of the known values of the row,
    /// and gaps outside the known strike range remain missing.
    #[test]
    fn filled_values_are_bounded(
        cells in prop::collection::vec(prop::option::of(-1.0e3_f64..1.0e3), 1..40),
    ) {
        let xs: Vec<f64> = (0..cells.len()).map(|i| 90.0 + 0.5 * i as f64).collect();
        let filled = fill_gaps(&xs, &cells).unwrap();

        let known: Vec<(usize, f64)> = cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|v| (i, v)))
            .collect();
        if known.len() < 2 {
            prop_assert_eq!(&filled, &cells);
            return Ok(());
        }
        let lo = known.iter().map(|&(_, v)| v).fold(f64::INFINITY, f64::min);
        let hi = known.iter().map(|&(_, v)| v).fold(f64::NEG_INFINITY, f64::max);
        let first = known[0].0;
        let last = known[known.len() - 1].0;
        for (i, v) in filled.iter().enumerate() {
            if i < first || i > last {
                prop_assert!(v.is_none());
            } else {
                let v = v.unwrap();
                prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
            }
        }
    }
}
