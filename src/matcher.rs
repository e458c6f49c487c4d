use ordered_float::OrderedFloat;
use tracing::debug;

use crate::error::{GeoError, Result};
use crate::geo::{haversine_km, Coordinate, CoordinateSet};

/// Nearest target found for one source point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MatchResult {
    pub source: Coordinate,
    pub target: Coordinate,
    /// Position of `target` within the target set.
    pub target_index: usize,
    pub distance_km: f64,
}

/// Brute-force nearest neighbour: every source point is compared against every
/// target point. Returns one result per source point, in source order.
///
/// Equal distances keep the earliest target. Fails with `EmptyTargetSet` when
/// there is nothing to match against.
pub fn find_nearest(source: &CoordinateSet, target: &CoordinateSet) -> Result<Vec<MatchResult>> {
    if target.is_empty() {
        return Err(GeoError::EmptyTargetSet);
    }
    debug!(
        sources = source.len(),
        targets = target.len(),
        "scanning for nearest targets"
    );

    let mut matches = Vec::with_capacity(source.len());
    for &src in source {
        matches.push(nearest_to(src, target.as_slice())?);
    }
    Ok(matches)
}

/// Nearest target for a single point. `min_by_key` returns the first of several
/// equal minima, and `OrderedFloat` puts NaN above every number.
pub fn nearest_to(point: Coordinate, targets: &[Coordinate]) -> Result<MatchResult> {
    targets
        .iter()
        .enumerate()
        .map(|(idx, &tgt)| (idx, tgt, haversine_km(point, tgt)))
        .min_by_key(|&(_, _, dist)| OrderedFloat(dist))
        .map(|(target_index, target, distance_km)| MatchResult {
            source: point,
            target,
            target_index,
            distance_km,
        })
        .ok_or(GeoError::EmptyTargetSet)
}
