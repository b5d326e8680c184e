use jointcad_math::Point2;

/// Signed area via the shoelace formula. Positive for counter-clockwise
/// point order, negative for clockwise.
pub fn signed_area(points: &[Point2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// True if `points` are wound clockwise (negative signed area), which is the
/// convention panel outer outlines use.
pub fn is_clockwise(points: &[Point2]) -> bool {
    signed_area(points) < 0.0
}

/// Reverse `points` in place if they aren't wound clockwise.
pub fn ensure_clockwise(points: &mut Vec<Point2>) {
    if !is_clockwise(points) {
        points.reverse();
    }
}

/// Reverse `points` in place if they aren't wound counter-clockwise, the
/// convention hole polygons use.
pub fn ensure_counter_clockwise(points: &mut Vec<Point2>) {
    if is_clockwise(points) {
        points.reverse();
    }
}

/// The axis-aligned bounding box of `points`, as (min, max).
pub fn bounding_box(points: &[Point2]) -> (Point2, Point2) {
    let mut min = points[0];
    let mut max = points[0];
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

/// Sample a circular arc from `start_angle` to `end_angle` (radians) about
/// `center`, inclusive of both endpoints, using `segments` chords.
pub fn sample_arc(center: Point2, radius: f64, start_angle: f64, end_angle: f64, segments: usize) -> Vec<Point2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = start_angle + (end_angle - start_angle) * (i as f64 / segments as f64);
            Point2::new(center.x + radius * t.cos(), center.y + radius * t.sin())
        })
        .collect()
}

/// Polygonize a full circle of `segments` points (counter-clockwise), the
/// convention used for circular cutout holes.
pub fn polygonize_circle(center: Point2, radius: f64, segments: usize) -> Vec<Point2> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let t = 2.0 * std::f64::consts::PI * (i as f64 / segments as f64);
            Point2::new(center.x + radius * t.cos(), center.y + radius * t.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_area_of_unit_square_ccw() {
        let sq = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert!((signed_area(&sq) - 1.0).abs() < 1e-12);
        assert!(!is_clockwise(&sq));
    }

    #[test]
    fn ensure_clockwise_reverses_ccw() {
        let mut sq = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        ensure_clockwise(&mut sq);
        assert!(is_clockwise(&sq));
    }

    #[test]
    fn polygonize_circle_point_count() {
        let pts = polygonize_circle(Point2::new(0.0, 0.0), 5.0, 16);
        assert_eq!(pts.len(), 16);
        for p in &pts {
            assert!((p.coords.norm() - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn bounding_box_of_square() {
        let sq = vec![
            Point2::new(-1.0, -2.0),
            Point2::new(3.0, -2.0),
            Point2::new(3.0, 4.0),
            Point2::new(-1.0, 4.0),
        ];
        let (min, max) = bounding_box(&sq);
        assert_eq!(min, Point2::new(-1.0, -2.0));
        assert_eq!(max, Point2::new(3.0, 4.0));
    }
}
