use crate::shared::geo::Coordinate;

/// Samples taken per waypoint pair when the caller has no preference.
pub const DEFAULT_SEGMENTS: usize = 30;

/// Turns raw waypoints into a dense Catmull-Rom curve passing through every waypoint.
///
/// Each waypoint pair `(p1, p2)` is interpolated with its neighbours as control
/// points; at the ends the first and last waypoints stand in for their missing
/// neighbour. Inputs with fewer than three points are returned unchanged since
/// a straight line needs no curve.
pub fn smooth_path(points: &[Coordinate], segments: usize) -> Vec<Coordinate> {
    if points.len() <= 2 || segments == 0 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut smoothed = Vec::with_capacity(last * segments + 1);
    smoothed.push(points[0]);
    for i in 0..last {
        let p0 = &points[i.saturating_sub(1)];
        let p1 = &points[i];
        let p2 = &points[i + 1];
        let p3 = &points[usize::min(last, i + 2)];

        // Step 0 equals the previous pair's final sample, skip it
        for step in 1..=segments {
            let t = step as f64 / segments as f64;
            smoothed.push(Coordinate {
                latitude: catmull_rom(p0.latitude, p1.latitude, p2.latitude, p3.latitude, t),
                longitude: catmull_rom(p0.longitude, p1.longitude, p2.longitude, p3.longitude, t),
            });
        }
    }
    smoothed
}

fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}
