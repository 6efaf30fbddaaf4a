//! Ranking route destinations by distance from the user.

use crate::domain::{Coordinate, RouteRecord, distance};

/// A route with its destination's distance from the user.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEndpoint<'a> {
    pub record: &'a RouteRecord,
    pub distance_m: f64,
}

impl RankedEndpoint<'_> {
    pub fn destination(&self) -> Coordinate {
        self.record.destination
    }
}

/// Rank routes by destination, nearest-first.
///
/// The sort is stable: destinations at equal distance keep their input
/// order, so ranking is deterministic for a given catalog.
pub fn rank_endpoints<'a, I>(user: Coordinate, records: I) -> Vec<RankedEndpoint<'a>>
where
    I: IntoIterator<Item = &'a RouteRecord>,
{
    let mut ranked: Vec<RankedEndpoint<'a>> = records
        .into_iter()
        .map(|record| RankedEndpoint {
            record,
            distance_m: distance(user, record.destination),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn origin() -> Coordinate {
        coord(24.80818, 121.0405)
    }

    fn records(dests: &[Coordinate]) -> Vec<RouteRecord> {
        dests
            .iter()
            .map(|&d| RouteRecord::new(origin(), d, vec![]))
            .collect()
    }

    #[test]
    fn nearest_first() {
        let user = coord(24.80, 121.00);
        let far = coord(24.90, 121.20);
        let near = coord(24.801, 121.001);
        let mid = coord(24.82, 121.03);
        let entries = records(&[far, near, mid]);

        let ranked = rank_endpoints(user, &entries);
        let order: Vec<_> = ranked.iter().map(RankedEndpoint::destination).collect();
        assert_eq!(order, vec![near, mid, far]);
        assert!(ranked.windows(2).all(|w| w[0].distance_m <= w[1].distance_m));
    }

    #[test]
    fn ties_keep_input_order() {
        let user = coord(24.80, 121.00);
        let dest = coord(24.81, 121.01);
        // Same destination reached from two origins: equal distances
        let first = RouteRecord::new(origin(), dest, vec![]);
        let second = RouteRecord::new(coord(25.0, 121.5), dest, vec![]);

        let ranked = rank_endpoints(user, [&first, &second]);
        assert_eq!(ranked[0].record.key, first.key);
        assert_eq!(ranked[1].record.key, second.key);

        let ranked = rank_endpoints(user, [&second, &first]);
        assert_eq!(ranked[0].record.key, second.key);
        assert_eq!(ranked[1].record.key, first.key);
    }

    #[test]
    fn empty_input() {
        let ranked = rank_endpoints(origin(), std::iter::empty());
        assert!(ranked.is_empty());
    }

    #[test]
    fn carries_distance() {
        let user = coord(24.80, 121.00);
        let dest = coord(24.81, 121.00);
        let record = RouteRecord::new(origin(), dest, vec![]);
        let ranked = rank_endpoints(user, [&record]);
        assert_eq!(ranked[0].distance_m, distance(user, dest));
        assert!(std::ptr::eq(ranked[0].record, &record));
    }
}
