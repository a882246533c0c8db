//! Deduplication and session cut of raw observations and the spot trajectory.

use std::collections::HashSet;

use oi_core::SessionCut;
use oi_surface::{Observation, SpotTrajectory};
use tracing::{info, warn};

/// Drop repeated `(dt, strike)` rows, keeping the last occurrence, then keep
/// only rows whose time of day falls inside `cut`.
///
/// Surviving rows keep their relative file order.
pub fn remove_dup_cut(observations: Vec<Observation>, cut: &SessionCut) -> Vec<Observation> {
    let total = observations.len();
    let mut seen = HashSet::with_capacity(total);
    let mut kept: Vec<Observation> = observations
        .into_iter()
        .rev()
        .filter(|o| seen.insert((o.dt, o.strike.to_bits())))
        .collect();
    kept.reverse();

    let duplicates = total - kept.len();
    if duplicates > 0 {
        warn!(duplicates, "dropped repeated (dt, strike) observations; kept the last of each");
    }
    kept.retain(|o| cut.contains(&o.dt));
    info!(
        kept = kept.len(),
        dropped = total - kept.len(),
        start = %cut.start,
        end = %cut.end,
        "applied session cut"
    );
    kept
}

/// Keep only the spot points whose time of day falls inside `cut`.
pub fn cut_spot(spot: &SpotTrajectory, cut: &SessionCut) -> SpotTrajectory {
    let kept = SpotTrajectory::from_points(spot.iter().filter(|p| cut.contains(&p.dt)));
    info!(
        kept = kept.len(),
        dropped = spot.len() - kept.len(),
        "applied session cut to spot trajectory"
    );
    kept
}
