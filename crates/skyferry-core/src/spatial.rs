//! Planar geometry for drone movement and region containment.
//!
//! All math happens directly in degree space. Moves are so short
//! (0.00015 degrees) that the flat-plane treatment is part of the
//! movement model, not an approximation to correct later.

use crate::models::{LngLat, Region, DRONE_IS_CLOSE_DISTANCE, DRONE_MOVE_DISTANCE};
use thiserror::Error;

/// The sixteen headings a drone may fly, in degrees counterclockwise
/// from due east.
pub const COMPASS_HEADINGS: [f64; 16] = [
    0.0, 22.5, 45.0, 67.5, 90.0, 112.5, 135.0, 157.5, 180.0, 202.5, 225.0, 247.5, 270.0, 292.5,
    315.0, 337.5,
];

/// Headings snap to multiples of this angle.
const HEADING_STEP_DEG: f64 = 22.5;

/// Cross-product tolerance for treating a point as lying on an edge.
const ON_EDGE_EPSILON: f64 = 1e-10;

/// Violations of the central-area naming contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("central area region is missing")]
    MissingCentralArea,
    #[error("region '{0}' cannot serve as the central area; it must be named 'central'")]
    NotCentral(String),
}

/// Euclidean distance between two coordinates in degree space.
pub fn distance(from: LngLat, to: LngLat) -> f64 {
    let dlng = from.lng - to.lng;
    let dlat = from.lat - to.lat;
    (dlng * dlng + dlat * dlat).sqrt()
}

/// Whether two coordinates are within the close-distance tolerance.
/// The comparison is strict, so two points exactly one tolerance apart
/// are not close.
pub fn is_close(a: LngLat, b: LngLat) -> bool {
    distance(a, b) < DRONE_IS_CLOSE_DISTANCE
}

/// Even-odd containment test with an inclusive boundary.
///
/// A position on an edge or within the close tolerance of a vertex counts
/// as inside. Degenerate regions with fewer than three vertices contain
/// nothing.
pub fn is_in_region(position: LngLat, region: &Region) -> bool {
    let vertices = &region.vertices;
    if vertices.len() < 3 {
        return false;
    }

    for (i, vertex) in vertices.iter().enumerate() {
        if is_close(position, *vertex) {
            return true;
        }
        let next = vertices[(i + 1) % vertices.len()];
        if on_segment(position, *vertex, next) {
            return true;
        }
    }

    // Even-odd ray cast toward increasing longitude.
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi.lat > position.lat) != (vj.lat > position.lat)
            && position.lng
                < (vj.lng - vi.lng) * (position.lat - vi.lat) / (vj.lat - vi.lat) + vi.lng
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Containment against the central area, with the naming contract
/// enforced: the region must exist and must be named `central`.
pub fn is_in_central_area(position: LngLat, central: Option<&Region>) -> Result<bool, RegionError> {
    match central {
        None => Err(RegionError::MissingCentralArea),
        Some(region) if !region.is_central() => Err(RegionError::NotCentral(region.name.clone())),
        Some(region) => Ok(is_in_region(position, region)),
    }
}

/// Whether `point` lies on the closed segment from `start` to `end`,
/// within the collinearity tolerance.
fn on_segment(point: LngLat, start: LngLat, end: LngLat) -> bool {
    if point.lat < start.lat.min(end.lat)
        || point.lat > start.lat.max(end.lat)
        || point.lng < start.lng.min(end.lng)
        || point.lng > start.lng.max(end.lng)
    {
        return false;
    }
    let cross = ((point.lat - start.lat) * (end.lng - start.lng)
        - (point.lng - start.lng) * (end.lat - start.lat))
        .abs();
    cross < ON_EDGE_EPSILON
}

/// The position one move from `start` along `heading_deg`.
pub fn next_position(start: LngLat, heading_deg: f64) -> LngLat {
    let heading = heading_deg.to_radians();
    LngLat {
        lng: start.lng + DRONE_MOVE_DISTANCE * heading.cos(),
        lat: start.lat + DRONE_MOVE_DISTANCE * heading.sin(),
    }
}

/// Heading of the vector from `from` to `to`, snapped to the nearest
/// compass step.
///
/// The raw angle is normalized into [0, 360) before snapping, so a vector
/// pointing just below due east snaps to 360.0 rather than wrapping to
/// zero. Consumers treat 360 and 0 as the same heading.
pub fn calculate_angle(from: LngLat, to: LngLat) -> f64 {
    let mut angle = (to.lat - from.lat).atan2(to.lng - from.lng).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    (angle / HEADING_STEP_DEG).round() * HEADING_STEP_DEG
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Orientation of the ordered triple (p, q, r). Exactly zero cross
/// product means collinear; float noise is deliberately not absorbed
/// here, matching the strictness of the intersection test.
fn orientation(p: LngLat, q: LngLat, r: LngLat) -> Orientation {
    let val = (q.lat - p.lat) * (r.lng - q.lng) - (q.lng - p.lng) * (r.lat - q.lat);
    if val == 0.0 {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Whether `q` falls inside the axis-aligned bounding box of `p` and `r`.
fn within_bounds(p: LngLat, q: LngLat, r: LngLat) -> bool {
    q.lat <= p.lat.max(r.lat)
        && q.lat >= p.lat.min(r.lat)
        && q.lng <= p.lng.max(r.lng)
        && q.lng >= p.lng.min(r.lng)
}

/// Whether the closed segments `p1p2` and `q1q2` intersect.
///
/// Endpoint touches and collinear overlap both count as intersection.
pub fn segments_intersect(p1: LngLat, p2: LngLat, q1: LngLat, q2: LngLat) -> bool {
    let o1 = orientation(p1, p2, q1);
    let o2 = orientation(p1, p2, q2);
    let o3 = orientation(q1, q2, p1);
    let o4 = orientation(q1, q2, p2);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && within_bounds(p1, q1, p2))
        || (o2 == Orientation::Collinear && within_bounds(p1, q2, p2))
        || (o3 == Orientation::Collinear && within_bounds(q1, p1, q2))
        || (o4 == Orientation::Collinear && within_bounds(q1, p2, q2))
}

/// Whether the segment from `p1` to `p2` crosses any edge of the
/// region's boundary, including the closing edge.
pub fn region_boundary_intersects(p1: LngLat, p2: LngLat, region: &Region) -> bool {
    let vertices = &region.vertices;
    vertices.iter().enumerate().any(|(i, vertex)| {
        let next = vertices[(i + 1) % vertices.len()];
        segments_intersect(p1, p2, *vertex, next)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CENTRAL_REGION_NAME;

    fn square(name: &str, min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Region {
        Region::new(
            name,
            vec![
                LngLat::new(min_lng, max_lat),
                LngLat::new(max_lng, max_lat),
                LngLat::new(max_lng, min_lat),
                LngLat::new(min_lng, min_lat),
            ],
        )
    }

    #[test]
    fn test_distance_pythagorean() {
        let a = LngLat::new(0.0, 0.0);
        let b = LngLat::new(3.0, 4.0);
        assert!((distance(a, b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        let p = LngLat::new(-3.186874, 55.944494);
        assert_eq!(distance(p, p), 0.0);
        assert!(is_close(p, p));
    }

    #[test]
    fn is_close_boundary_is_strict() {
        let a = LngLat::new(0.0, 0.0);
        let exactly_tolerance = LngLat::new(DRONE_IS_CLOSE_DISTANCE, 0.0);
        let just_inside = LngLat::new(DRONE_IS_CLOSE_DISTANCE * 0.999, 0.0);
        assert!(!is_close(a, exactly_tolerance));
        assert!(is_close(a, just_inside));
    }

    #[test]
    fn point_inside_square_is_in_region() {
        let region = square("area", -1.0, -1.0, 1.0, 1.0);
        assert!(is_in_region(LngLat::new(0.0, 0.0), &region));
        assert!(!is_in_region(LngLat::new(2.0, 0.0), &region));
        assert!(!is_in_region(LngLat::new(0.0, -1.5), &region));
    }

    #[test]
    fn boundary_and_vertex_count_as_inside() {
        let region = square("area", 0.0, 0.0, 1.0, 1.0);
        // On the closing edge between last and first vertex.
        assert!(is_in_region(LngLat::new(0.0, 0.5), &region));
        // On the top edge.
        assert!(is_in_region(LngLat::new(0.5, 1.0), &region));
        // Exactly on a vertex.
        assert!(is_in_region(LngLat::new(1.0, 1.0), &region));
    }

    #[test]
    fn degenerate_region_contains_nothing() {
        let two_points = Region::new(
            "line",
            vec![LngLat::new(0.0, 0.0), LngLat::new(1.0, 1.0)],
        );
        assert!(!is_in_region(LngLat::new(0.5, 0.5), &two_points));
        assert!(!is_in_region(LngLat::new(0.0, 0.0), &two_points));
    }

    #[test]
    fn concave_region_notch_is_outside() {
        // A "U" shape; the notch between the arms is outside.
        let region = Region::new(
            "u-shape",
            vec![
                LngLat::new(0.0, 0.0),
                LngLat::new(4.0, 0.0),
                LngLat::new(4.0, 3.0),
                LngLat::new(3.0, 3.0),
                LngLat::new(3.0, 1.0),
                LngLat::new(1.0, 1.0),
                LngLat::new(1.0, 3.0),
                LngLat::new(0.0, 3.0),
            ],
        );
        assert!(is_in_region(LngLat::new(0.5, 2.0), &region));
        assert!(is_in_region(LngLat::new(3.5, 2.0), &region));
        assert!(!is_in_region(LngLat::new(2.0, 2.0), &region));
        assert!(is_in_region(LngLat::new(2.0, 0.5), &region));
    }

    #[test]
    fn containment_is_invariant_under_vertex_rotation() {
        let base = vec![
            LngLat::new(0.0, 0.0),
            LngLat::new(4.0, 0.0),
            LngLat::new(4.0, 3.0),
            LngLat::new(2.0, 4.0),
            LngLat::new(0.0, 3.0),
        ];
        let samples = [
            LngLat::new(2.0, 2.0),
            LngLat::new(2.0, 3.9),
            LngLat::new(-0.5, 1.0),
            LngLat::new(4.0, 3.0),
            LngLat::new(3.0, 0.0),
        ];
        for shift in 0..base.len() {
            let mut rotated = base.clone();
            rotated.rotate_left(shift);
            let region = Region::new("pentagon", rotated);
            for sample in samples {
                assert_eq!(
                    is_in_region(sample, &region),
                    is_in_region(sample, &Region::new("pentagon", base.clone())),
                    "rotation {shift} changed containment of ({}, {})",
                    sample.lng,
                    sample.lat
                );
            }
        }
    }

    #[test]
    fn central_area_contract_is_enforced() {
        let position = LngLat::new(0.5, 0.5);
        let central = square(CENTRAL_REGION_NAME, 0.0, 0.0, 1.0, 1.0);
        assert_eq!(is_in_central_area(position, Some(&central)), Ok(true));

        assert_eq!(
            is_in_central_area(position, None),
            Err(RegionError::MissingCentralArea)
        );
        let mislabeled = square("downtown", 0.0, 0.0, 1.0, 1.0);
        assert_eq!(
            is_in_central_area(position, Some(&mislabeled)),
            Err(RegionError::NotCentral("downtown".to_string()))
        );
    }

    #[test]
    fn next_position_moves_exactly_one_step() {
        let start = LngLat::new(-3.186874, 55.944494);
        for heading in COMPASS_HEADINGS {
            let next = next_position(start, heading);
            assert!(
                (distance(start, next) - DRONE_MOVE_DISTANCE).abs() < 1e-12,
                "heading {heading} moved a wrong distance"
            );
        }
    }

    #[test]
    fn next_position_cardinal_directions() {
        let start = LngLat::new(0.0, 0.0);
        let east = next_position(start, 0.0);
        assert!((east.lng - DRONE_MOVE_DISTANCE).abs() < 1e-18);
        assert!(east.lat.abs() < 1e-18);

        let north = next_position(start, 90.0);
        assert!(north.lng.abs() < 1e-18);
        assert!((north.lat - DRONE_MOVE_DISTANCE).abs() < 1e-18);
    }

    #[test]
    fn calculate_angle_snaps_to_compass_step() {
        let origin = LngLat::new(0.0, 0.0);
        assert_eq!(calculate_angle(origin, LngLat::new(1.0, 0.0)), 0.0);
        assert_eq!(calculate_angle(origin, LngLat::new(0.0, 1.0)), 90.0);
        assert_eq!(calculate_angle(origin, LngLat::new(-1.0, 0.0)), 180.0);
        assert_eq!(calculate_angle(origin, LngLat::new(0.0, -1.0)), 270.0);
        // 50 degrees rounds down to 45.
        let fifty = LngLat::new(50f64.to_radians().cos(), 50f64.to_radians().sin());
        assert_eq!(calculate_angle(origin, fifty), 45.0);
    }

    #[test]
    fn calculate_angle_just_below_east_snaps_to_360() {
        let origin = LngLat::new(0.0, 0.0);
        // A hair below due east normalizes to ~359.9 and snaps up to 360,
        // not back to 0.
        let target = LngLat::new(1.0, -0.001);
        assert_eq!(calculate_angle(origin, target), 360.0);
    }

    #[test]
    fn segments_intersect_crossing_pair() {
        assert!(segments_intersect(
            LngLat::new(0.0, 0.0),
            LngLat::new(2.0, 2.0),
            LngLat::new(0.0, 2.0),
            LngLat::new(2.0, 0.0),
        ));
    }

    #[test]
    fn segments_intersect_parallel_pair_does_not() {
        assert!(!segments_intersect(
            LngLat::new(0.0, 0.0),
            LngLat::new(2.0, 0.0),
            LngLat::new(0.0, 1.0),
            LngLat::new(2.0, 1.0),
        ));
    }

    #[test]
    fn segments_intersect_collinear_overlap_counts() {
        assert!(segments_intersect(
            LngLat::new(0.0, 0.0),
            LngLat::new(2.0, 0.0),
            LngLat::new(1.0, 0.0),
            LngLat::new(3.0, 0.0),
        ));
        // Collinear but disjoint.
        assert!(!segments_intersect(
            LngLat::new(0.0, 0.0),
            LngLat::new(1.0, 0.0),
            LngLat::new(2.0, 0.0),
            LngLat::new(3.0, 0.0),
        ));
    }

    #[test]
    fn segments_intersect_endpoint_touch_counts() {
        assert!(segments_intersect(
            LngLat::new(0.0, 0.0),
            LngLat::new(1.0, 1.0),
            LngLat::new(1.0, 1.0),
            LngLat::new(2.0, 0.0),
        ));
    }

    #[test]
    fn boundary_intersection_detects_crossing_segment() {
        let region = square("zone", 0.0, 0.0, 1.0, 1.0);
        // Straight through the middle.
        assert!(region_boundary_intersects(
            LngLat::new(-0.5, 0.5),
            LngLat::new(1.5, 0.5),
            &region
        ));
        // Entirely to one side.
        assert!(!region_boundary_intersects(
            LngLat::new(2.0, 0.0),
            LngLat::new(3.0, 1.0),
            &region
        ));
        // A segment fully inside touches no edge.
        assert!(!region_boundary_intersects(
            LngLat::new(0.25, 0.5),
            LngLat::new(0.75, 0.5),
            &region
        ));
    }

    #[test]
    fn boundary_intersection_includes_closing_edge() {
        // Triangle listed without repeating the first vertex; the edge
        // from (0,1) back to (0,0) must still be checked.
        let region = Region::new(
            "triangle",
            vec![
                LngLat::new(0.0, 0.0),
                LngLat::new(1.0, 0.0),
                LngLat::new(0.0, 1.0),
            ],
        );
        assert!(region_boundary_intersects(
            LngLat::new(-0.5, 0.5),
            LngLat::new(0.5, 0.5),
            &region
        ));
    }
}
