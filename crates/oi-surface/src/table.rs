//! Keyed table primitives.
//!
//! The pipeline needs only two relational operations beyond the unpivot in
//! [`crate::long_form`]: a nearest-value join partitioned by a key, and a
//! horizontal concatenation of columns sharing a time index.

use std::collections::{BTreeMap, HashSet};

use oi_core::{errors::Result, Cell, Real, TimeSeries, Timestamp};

/// For every left row, the index of the right row in the same partition
/// whose value is nearest to the left row's value.
///
/// Right rows are sorted by value inside each partition before matching.
/// When two candidates are equally near, the lower value wins (and among
/// equal values, the one appearing first in `right`). Left rows whose
/// partition is absent on the right, or whose value is NaN, get `None`.
pub fn nearest_join_by<K, L, R>(
    left: &[L],
    right: &[R],
    left_key: impl Fn(&L) -> Option<(K, Real)>,
    right_key: impl Fn(&R) -> (K, Real),
) -> Vec<Option<usize>>
where
    K: Ord,
{
    let mut partitions: BTreeMap<K, Vec<(Real, usize)>> = BTreeMap::new();
    for (i, r) in right.iter().enumerate() {
        let (k, v) = right_key(r);
        if !v.is_nan() {
            partitions.entry(k).or_default().push((v, i));
        }
    }
    for candidates in partitions.values_mut() {
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    left.iter()
        .map(|l| {
            let (k, x) = left_key(l)?;
            if x.is_nan() {
                return None;
            }
            let candidates = partitions.get(&k)?;
            let pos = candidates.partition_point(|c| c.0 < x);
            let below = pos.checked_sub(1).map(|j| candidates[j]);
            let above = candidates.get(pos).copied();
            match (below, above) {
                (Some(b), Some(a)) => {
                    // Equal values on the upper side: take the first of the run.
                    if x - b.0 <= a.0 - x {
                        let first = candidates.partition_point(|c| c.0 < b.0);
                        Some(candidates[first].1)
                    } else {
                        Some(a.1)
                    }
                }
                (Some(b), None) => {
                    let first = candidates.partition_point(|c| c.0 < b.0);
                    Some(candidates[first].1)
                }
                (None, Some(a)) => Some(a.1),
                (None, None) => None,
            }
        })
        .collect()
}

/// Align named columns on `index`, in the order given.
///
/// Timestamps absent from a column become missing cells; entries of a column
/// whose timestamp is not in `index` are dropped.
///
/// # Errors
/// Returns an error if two columns share a name.
pub fn concat_columns(
    index: &[Timestamp],
    columns: &[(String, TimeSeries<Timestamp, Cell>)],
) -> Result<Vec<(String, Vec<Cell>)>> {
    let mut seen = HashSet::new();
    for (name, _) in columns {
        oi_core::ensure!(seen.insert(name.as_str()), "duplicate column name `{name}`");
    }
    Ok(columns
        .iter()
        .map(|(name, series)| {
            let values = index
                .iter()
                .map(|dt| series.get(dt).copied().flatten())
                .collect();
            (name.clone(), values)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oi_core::utilities::parse_timestamp;

    #[test]
    fn nearest_within_partition() {
        let right = [(1, 95.0), (1, 100.0), (1, 105.0), (2, 200.0)];
        let left = [(1, 101.0), (1, 104.0), (2, 1.0), (3, 100.0)];
        let idx = nearest_join_by(&left, &right, |l| Some(*l), |r| *r);
        assert_eq!(idx, vec![Some(1), Some(2), Some(3), None]);
    }

    #[test]
    fn ties_go_to_the_lower_value() {
        let right = [(0, 105.0), (0, 100.0)];
        let idx = nearest_join_by(&[(0, 102.5)], &right, |l| Some(*l), |r| *r);
        assert_eq!(idx, vec![Some(1)]);
    }

    #[test]
    fn equal_values_keep_input_order() {
        let right = [(0, 100.0), (0, 100.0), (0, 110.0)];
        let idx = nearest_join_by(&[(0, 99.0), (0, 101.0), (0, 200.0)], &right, |l| Some(*l), |r| *r);
        assert_eq!(idx, vec![Some(0), Some(0), Some(2)]);
    }

    #[test]
    fn nan_and_unkeyed_rows_do_not_match() {
        let right = [(0, 100.0)];
        let left = [Some((0, Real::NAN)), None];
        let idx = nearest_join_by(&left, &right, |l| *l, |r| *r);
        assert_eq!(idx, vec![None, None]);
    }

    #[test]
    fn concat_aligns_on_index() {
        let t: Vec<Timestamp> = ["2025-01-08 09:31:00", "2025-01-08 09:32:00"]
            .iter()
            .map(|s| parse_timestamp(s).unwrap())
            .collect();
        let a = TimeSeries::from_pairs(vec![(t[1], Some(2.0))]);
        let b = TimeSeries::from_pairs(vec![(t[0], Some(1.0)), (t[1], None)]);
        let out = concat_columns(&t, &[("a".into(), a.clone()), ("b".into(), b)]).unwrap();
        assert_eq!(out[0], ("a".to_string(), vec![None, Some(2.0)]));
        assert_eq!(out[1], ("b".to_string(), vec![Some(1.0), None]));

        assert!(concat_columns(&t, &[("a".into(), a.clone()), ("a".into(), a)]).is_err());
    }
}
