use jointcad_math::Point2;
use thiserror::Error;

use crate::polygon::sample_arc;

/// Errors raised while constructing or editing an outline.
#[derive(Debug, Error, PartialEq)]
pub enum OutlineError {
    #[error("outline needs at least 3 points, got {0}")]
    TooFewPoints(usize),
    #[error("outline contains a degenerate (zero-length) segment at index {0}")]
    DegenerateSegment(usize),
    #[error("corner index {0} out of bounds for outline with {1} points")]
    CornerOutOfBounds(usize, usize),
}

/// A panel's derived 2D geometry: the outer polygon (clockwise, panel-local,
/// origin at panel center) plus an unordered set of interior holes (each
/// counter-clockwise).
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub polygon: Vec<Point2>,
    pub holes: Vec<Vec<Point2>>,
}

impl Outline {
    /// Build an outline from a clockwise outer polygon, validating it has no
    /// degenerate segments.
    pub fn new(polygon: Vec<Point2>) -> Result<Self, OutlineError> {
        validate_closed_polygon(&polygon)?;
        Ok(Self {
            polygon,
            holes: Vec::new(),
        })
    }

    /// Append a hole polygon (assumed already counter-clockwise).
    pub fn add_hole(&mut self, hole: Vec<Point2>) {
        if hole.len() >= 3 {
            self.holes.push(hole);
        }
    }

    /// Replace the point at `corner_index` with a tangent-arc approximation,
    /// sampled with `segments` interior points. The two neighboring edges
    /// must not themselves be degenerate.
    pub fn fillet_corner(
        &mut self,
        corner_index: usize,
        radius: f64,
        segments: usize,
    ) -> Result<(), OutlineError> {
        let n = self.polygon.len();
        if corner_index >= n {
            return Err(OutlineError::CornerOutOfBounds(corner_index, n));
        }
        if radius <= 0.0 {
            return Ok(());
        }
        let prev = self.polygon[(corner_index + n - 1) % n];
        let corner = self.polygon[corner_index];
        let next = self.polygon[(corner_index + 1) % n];
        let arc = fillet_arc_points(prev, corner, next, radius, segments);
        self.polygon.splice(corner_index..=corner_index, arc);
        Ok(())
    }

    /// Splice a rectangular notch into the edge lying at perpendicular
    /// coordinate `perp`, replacing whatever lies strictly within the running
    /// interval `(lo, hi)` with a 4-point U-shape stepping in to `depth_perp`
    /// and back out. `running_is_x` picks whether the running coordinate is a
    /// point's x or y field; `ascending` is whether this edge's own points run
    /// from low to high along it, so the inserted points wind the same way.
    pub fn notch_edge(&mut self, running_is_x: bool, ascending: bool, perp: f64, lo: f64, hi: f64, depth_perp: f64) {
        let eps = 1e-6;
        let get_running = |p: &Point2| if running_is_x { p.x } else { p.y };
        let get_perp = |p: &Point2| if running_is_x { p.y } else { p.x };
        let make = |running: f64, perp: f64| if running_is_x { Point2::new(running, perp) } else { Point2::new(perp, running) };
        let on_edge = |p: &Point2| (get_perp(p) - perp).abs() < eps;

        let mut insert_at = None;
        let mut i = 0;
        while i < self.polygon.len() {
            let p = self.polygon[i];
            if on_edge(&p) && get_running(&p) > lo + eps && get_running(&p) < hi - eps {
                insert_at.get_or_insert(i);
                self.polygon.remove(i);
            } else {
                i += 1;
            }
        }

        let past_far = |r: f64| if ascending { r >= hi - eps } else { r <= lo + eps };
        let idx = insert_at.unwrap_or_else(|| {
            self.polygon
                .iter()
                .position(|p| on_edge(p) && past_far(get_running(p)))
                .unwrap_or(self.polygon.len())
        });

        let (near, far) = if ascending { (lo, hi) } else { (hi, lo) };
        let notch = vec![make(near, perp), make(near, depth_perp), make(far, depth_perp), make(far, perp)];
        self.polygon.splice(idx..idx, notch);
    }
}

fn validate_closed_polygon(points: &[Point2]) -> Result<(), OutlineError> {
    if points.len() < 3 {
        return Err(OutlineError::TooFewPoints(points.len()));
    }
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        if (a - b).norm() < 1e-9 {
            return Err(OutlineError::DegenerateSegment(i));
        }
    }
    Ok(())
}

/// Compute the tangent-arc replacement points for a corner where two edges
/// `prev->corner` and `corner->next` meet, rounded to `radius`. Returns the
/// full ordered replacement (tangent point, arc interior samples, tangent
/// point) to splice in place of `corner`.
fn fillet_arc_points(prev: Point2, corner: Point2, next: Point2, radius: f64, segments: usize) -> Vec<Point2> {
    let u = (prev - corner).normalize();
    let v = (next - corner).normalize();
    let cos_theta = u.dot(&v).clamp(-1.0, 1.0);
    let theta = cos_theta.acos();
    if theta < 1e-6 || (std::f64::consts::PI - theta).abs() < 1e-6 {
        // Collinear or reflex-degenerate: no well-defined fillet, leave corner as-is.
        return vec![corner];
    }
    let half = theta / 2.0;
    let tangent_len = radius / half.tan();
    let t1 = corner + u * tangent_len;
    let t2 = corner + v * tangent_len;
    let bisector = (u + v).normalize();
    let center_dist = radius / half.sin();
    let center = corner + bisector * center_dist;

    let a1 = (t1.y - center.y).atan2(t1.x - center.x);
    let a2_raw = (t2.y - center.y).atan2(t2.x - center.x);
    let mut delta = a2_raw - a1;
    while delta > std::f64::consts::PI {
        delta -= 2.0 * std::f64::consts::PI;
    }
    while delta < -std::f64::consts::PI {
        delta += 2.0 * std::f64::consts::PI;
    }
    let a2 = a1 + delta;

    sample_arc(center, radius, a1, a2, segments.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point2> {
        vec![
            Point2::new(-1.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, -1.0),
            Point2::new(-1.0, -1.0),
        ]
    }

    #[test]
    fn new_accepts_valid_polygon() {
        assert!(Outline::new(unit_square()).is_ok());
    }

    #[test]
    fn new_rejects_too_few_points() {
        let err = Outline::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]).unwrap_err();
        assert_eq!(err, OutlineError::TooFewPoints(2));
    }

    #[test]
    fn fillet_corner_increases_point_count() {
        let mut outline = Outline::new(unit_square()).unwrap();
        let before = outline.polygon.len();
        outline.fillet_corner(0, 0.3, 8).unwrap();
        assert_eq!(outline.polygon.len(), before - 1 + 9);
    }

    #[test]
    fn fillet_zero_radius_is_noop() {
        let mut outline = Outline::new(unit_square()).unwrap();
        let before = outline.polygon.clone();
        outline.fillet_corner(0, 0.0, 8).unwrap();
        assert_eq!(outline.polygon, before);
    }

    #[test]
    fn notch_edge_cuts_u_shape_into_straight_edge() {
        let mut outline = Outline::new(unit_square()).unwrap();
        let before = outline.polygon.len();
        outline.notch_edge(true, true, 1.0, -0.2, 0.2, 0.0);
        assert_eq!(outline.polygon.len(), before + 4);
        let notch: Vec<Point2> = outline
            .polygon
            .iter()
            .copied()
            .filter(|p| (p.y - 1.0).abs() > 1e-9)
            .collect();
        assert_eq!(notch.len(), 2);
        assert!(notch.iter().all(|p| p.y.abs() < 1e-9));
    }

    #[test]
    fn notch_edge_descending_winds_the_same_direction() {
        let mut outline = Outline::new(unit_square()).unwrap();
        outline.notch_edge(true, false, -1.0, -0.2, 0.2, 0.0);
        assert_eq!(outline.polygon.len(), unit_square().len() + 4);
    }

    #[test]
    fn fillet_arc_points_stay_within_radius_of_center() {
        let prev = Point2::new(-1.0, 1.0);
        let corner = Point2::new(1.0, 1.0);
        let next = Point2::new(1.0, -1.0);
        let arc = fillet_arc_points(prev, corner, next, 0.4, 8);
        assert_eq!(arc.len(), 10);
        // First and last sampled points should be tangent points on the edges.
        assert!((arc[0] - Point2::new(0.6, 1.0)).norm() < 1e-9);
        assert!((arc[arc.len() - 1] - Point2::new(1.0, 0.6)).norm() < 1e-9);
    }
}
