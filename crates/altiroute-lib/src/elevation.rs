//! Cumulative positive elevation gain along a route.

use crate::error::{Error, Result};
use crate::graph::{Elevation, Graph, LocationId};
use crate::path::Path;

/// Source of per-location elevations.
pub trait ElevationLookup {
    /// Elevation of `id`, or `None` when the lookup has no entry for it.
    fn elevation(&self, id: LocationId) -> Option<Elevation>;
}

impl ElevationLookup for Graph {
    fn elevation(&self, id: LocationId) -> Option<Elevation> {
        self.location(id).map(|loc| loc.elevation)
    }
}

impl ElevationLookup for [Elevation] {
    fn elevation(&self, id: LocationId) -> Option<Elevation> {
        self.get(id).copied()
    }
}

impl ElevationLookup for Vec<Elevation> {
    fn elevation(&self, id: LocationId) -> Option<Elevation> {
        self.as_slice().elevation(id)
    }
}

/// Sum every climb between consecutive locations of `path`; descents and
/// flat stretches contribute nothing.
pub fn elevation_gain<L>(path: &Path, lookup: &L) -> Result<u64>
where
    L: ElevationLookup + ?Sized,
{
    if path.is_empty() {
        return Err(Error::invalid("elevation gain needs a non-empty path"));
    }

    let elevation_of = |id: LocationId| {
        lookup
            .elevation(id)
            .ok_or_else(|| Error::invalid(format!("no elevation known for location {id}")))
    };

    let mut gain = 0u64;
    let mut current = elevation_of(path.start())?;
    for (_, next_id) in path.hops() {
        let next = elevation_of(next_id)?;
        if next > current {
            gain += u64::from(next.abs_diff(current));
        }
        current = next;
    }
    Ok(gain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn climbs_accumulate_and_descents_are_ignored() {
        let elevations = vec![100, 500, 300];
        let path = Path::new(vec![0, 1, 2]).unwrap();
        assert_eq!(elevation_gain(&path, &elevations).unwrap(), 400);
    }

    #[test]
    fn non_increasing_route_gains_nothing() {
        let elevations: &[Elevation] = &[2642, 2642, 1326, -20];
        let path = Path::new(vec![0, 1, 2, 3]).unwrap();
        assert_eq!(elevation_gain(&path, elevations).unwrap(), 0);
    }

    #[test]
    fn single_location_gains_nothing() {
        let path = Path::new(vec![1]).unwrap();
        assert_eq!(elevation_gain(&path, &vec![5, 9]).unwrap(), 0);
    }

    #[test]
    fn missing_elevation_is_invalid() {
        let path = Path::new(vec![0, 4]).unwrap();
        assert!(matches!(
            elevation_gain(&path, &vec![10, 20]),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn negative_elevations_climb_correctly() {
        let path = Path::new(vec![0, 1]).unwrap();
        assert_eq!(elevation_gain(&path, &vec![-400, 250]).unwrap(), 650);
    }
}
