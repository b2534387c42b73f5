use rayon::prelude::*;

use crate::{
    network::{Id, Railway},
    shared::geo::{Coordinate, Distance, project_onto_segment},
};

/// The closest spot on the network to some query point.
#[derive(Debug, Clone, PartialEq)]
pub struct RailwayPoint {
    pub railway: Id,
    /// Projection of the query point onto the railway's path.
    pub point: Coordinate,
    /// Index of the path segment the projection lies on.
    pub segment_index: usize,
    pub distance: Distance,
}

/// Scans every segment of every railway for the projection closest to `point`.
///
/// Only projections strictly closer than `threshold` qualify. Ties go to the
/// railway listed first, then to the lower segment index.
pub fn nearest_point_on_any_railway(
    point: &Coordinate,
    railways: &[Railway],
    threshold: Distance,
) -> Option<RailwayPoint> {
    railways
        .par_iter()
        .enumerate()
        .filter_map(|(order, railway)| {
            railway
                .path
                .windows(2)
                .enumerate()
                .map(|(segment_index, pair)| {
                    let projected = project_onto_segment(point, &pair[0], &pair[1]);
                    (segment_index, projected, point.distance(&projected))
                })
                .filter(|(_, _, distance)| *distance < threshold)
                .min_by(|(_, _, a), (_, _, b)| a.as_meters().total_cmp(&b.as_meters()))
                .map(|(segment_index, projected, distance)| {
                    (
                        order,
                        RailwayPoint {
                            railway: railway.id.clone(),
                            point: projected,
                            segment_index,
                            distance,
                        },
                    )
                })
        })
        .min_by(|(order_a, a), (order_b, b)| {
            a.distance
                .as_meters()
                .total_cmp(&b.distance.as_meters())
                .then(order_a.cmp(order_b))
        })
        .map(|(_, found)| found)
}
