//! Outline post-processing: the ordered pipeline applied after a panel's
//! base (finger-jointed) outline is built — edge extensions, feet, custom
//! edge paths, corner fillets, then cutouts.

use jointcad_ir::{CustomEdgePath, Cutout, CutoutKind, EdgeExtensions, EdgePosition, EdgeStatus, FeetConfig};
use jointcad_math::Point2;
use jointcad_sketch::{polygonize_circle, Outline};

use crate::panel::EdgeState;

const CORNER_SNAP_EPS: f64 = 1e-6;

fn nearest_index(outline: &Outline, target: Point2) -> Option<usize> {
    outline
        .polygon
        .iter()
        .position(|p| (p - target).norm() < CORNER_SNAP_EPS)
}

/// Step 1: shift the corners of extendable (non-locked) edges outward.
/// Corners shared by two extended edges merge naturally since both edges'
/// extension is applied to the same physical point.
pub fn apply_edge_extensions(outline: &mut Outline, hw: f64, hh: f64, edges: &[EdgeState], ext: &EdgeExtensions) {
    let extendable = |pos: EdgePosition| {
        edges
            .iter()
            .find(|e| e.position == pos)
            .map(|e| e.status != EdgeStatus::Locked)
            .unwrap_or(false)
    };
    let left = if extendable(EdgePosition::Left) { ext.left } else { 0.0 };
    let right = if extendable(EdgePosition::Right) { ext.right } else { 0.0 };
    let top = if extendable(EdgePosition::Top) { ext.top } else { 0.0 };
    let bottom = if extendable(EdgePosition::Bottom) { ext.bottom } else { 0.0 };

    let corners = [
        (Point2::new(-hw, hh), -left, top),
        (Point2::new(hw, hh), right, top),
        (Point2::new(hw, -hh), right, -bottom),
        (Point2::new(-hw, -hh), -left, -bottom),
    ];
    for (nominal, dx, dy) in corners {
        if let Some(idx) = nearest_index(outline, nominal) {
            outline.polygon[idx].x += dx;
            outline.polygon[idx].y += dy;
        }
    }
}

/// Step 2: cut a repeating row of rectangular notches into the bottom edge,
/// used for floor-standing wall panels. A no-op if feet are disabled or the
/// panel is narrower than one foot.
pub fn apply_feet(outline: &mut Outline, hw: f64, bottom_y: f64, feet: &FeetConfig) {
    if !feet.enabled || feet.width <= 0.0 {
        return;
    }
    let usable = 2.0 * hw - 2.0 * feet.inset;
    if usable <= feet.width {
        return;
    }
    let pitch = feet.width + feet.gap;
    let count = ((usable + feet.gap) / pitch).floor().max(1.0) as usize;
    let Some(bottom_idx) = nearest_index(outline, Point2::new(-hw, bottom_y)).or_else(|| {
        outline.polygon.iter().position(|p| (p.y - bottom_y).abs() < CORNER_SNAP_EPS && p.x <= -hw + CORNER_SNAP_EPS)
    }) else {
        return;
    };

    let mut notch_points = Vec::new();
    let start_x = -hw + feet.inset;
    for i in 0..count {
        let a = start_x + i as f64 * pitch;
        let b = a + feet.width;
        notch_points.push(Point2::new(a, bottom_y));
        notch_points.push(Point2::new(a, bottom_y + feet.height));
        notch_points.push(Point2::new(b, bottom_y + feet.height));
        notch_points.push(Point2::new(b, bottom_y));
    }
    outline.polygon.splice(bottom_idx..=bottom_idx, notch_points);
}

/// Step 3: replace a straight (non-finger) edge with a caller-supplied path,
/// sampled over the edge's own length. Only meaningful on edges that are not
/// locked (fingered edges keep their computed shape).
pub fn apply_custom_edge_path(
    outline: &mut Outline,
    hw: f64,
    hh: f64,
    edge: EdgePosition,
    edges: &[EdgeState],
    path: &CustomEdgePath,
) {
    let locked = edges.iter().find(|e| e.position == edge).map(|e| e.status == EdgeStatus::Locked).unwrap_or(true);
    if locked {
        return;
    }
    let (start, end) = match edge {
        EdgePosition::Top => (Point2::new(-hw, hh), Point2::new(hw, hh)),
        EdgePosition::Right => (Point2::new(hw, hh), Point2::new(hw, -hh)),
        EdgePosition::Bottom => (Point2::new(hw, -hh), Point2::new(-hw, -hh)),
        EdgePosition::Left => (Point2::new(-hw, -hh), Point2::new(-hw, hh)),
    };
    let Some(idx) = nearest_index(outline, start) else { return };

    let mut points: Vec<(f64, f64)> = path.points.iter().map(|p| (p.t, p.offset)).collect();
    if path.mirrored {
        let mirrored: Vec<(f64, f64)> = points.iter().rev().map(|&(t, o)| (1.0 - t, o)).collect();
        points.extend(mirrored);
    }
    let dir = end - start;
    let perp = Point2::new(-dir.y, dir.x).coords.normalize();
    let sampled: Vec<Point2> = points
        .iter()
        .map(|&(t, offset)| start + dir * t + perp * offset)
        .collect();
    outline.polygon.splice(idx..=idx, sampled);
}

/// Step 4: round a corner identified by its two adjacent edges.
pub fn apply_corner_fillet(
    outline: &mut Outline,
    hw: f64,
    hh: f64,
    corner: EdgePosition,
    radius: f64,
    segments: usize,
) -> Result<(), jointcad_sketch::OutlineError> {
    let nominal = match corner {
        EdgePosition::Top => Point2::new(-hw, hh),
        EdgePosition::Right => Point2::new(hw, hh),
        EdgePosition::Bottom => Point2::new(hw, -hh),
        EdgePosition::Left => Point2::new(-hw, -hh),
    };
    if let Some(idx) = nearest_index(outline, nominal) {
        outline.fillet_corner(idx, radius, segments)?;
    }
    Ok(())
}

/// A rectangle of half-extents `hw`/`hh`, corners rounded to `radius` (each
/// clamped to the shorter half-extent). Falls back to four sharp corners
/// when `radius` is zero or negative.
fn rounded_rect_points(hw: f64, hh: f64, radius: f64) -> Vec<Point2> {
    let r = radius.max(0.0).min(hw).min(hh);
    if r <= CORNER_SNAP_EPS {
        return vec![
            Point2::new(-hw, -hh),
            Point2::new(-hw, hh),
            Point2::new(hw, hh),
            Point2::new(hw, -hh),
        ];
    }
    let pi = std::f64::consts::PI;
    let segments = 6;
    let corners = [
        (Point2::new(-hw + r, -hh + r), -pi / 2.0, -pi),
        (Point2::new(-hw + r, hh - r), pi, pi / 2.0),
        (Point2::new(hw - r, hh - r), pi / 2.0, 0.0),
        (Point2::new(hw - r, -hh + r), 0.0, -pi / 2.0),
    ];
    corners
        .into_iter()
        .flat_map(|(center, a1, a2)| jointcad_sketch::sample_arc(center, r, a1, a2, segments))
        .collect()
}

/// Step 5: register interior cutouts as holes on the outline.
pub fn apply_cutouts(outline: &mut Outline, cutouts: &[Cutout]) {
    for cutout in cutouts {
        let local_points = match &cutout.kind {
            CutoutKind::Rect { width, height, corner_radius } => {
                rounded_rect_points(width / 2.0, height / 2.0, corner_radius.unwrap_or(0.0))
            }
            CutoutKind::Circle { radius } => polygonize_circle(Point2::new(0.0, 0.0), *radius, 32),
            CutoutKind::Polygon { points } => points.iter().map(|p| Point2::new(p.x, p.y)).collect(),
        };
        let (sin_r, cos_r) = cutout.rotation.sin_cos();
        let placed: Vec<Point2> = local_points
            .into_iter()
            .map(|p| {
                Point2::new(
                    cutout.center.x + p.x * cos_r - p.y * sin_r,
                    cutout.center.y + p.x * sin_r + p.y * cos_r,
                )
            })
            .collect();
        let mut placed = placed;
        jointcad_sketch::ensure_counter_clockwise(&mut placed);
        outline.add_hole(placed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jointcad_ir::JointGender;

    fn square_edges() -> Vec<EdgeState> {
        EdgePosition::CLOCKWISE
            .iter()
            .map(|&position| EdgeState {
                position,
                gender: JointGender::None,
                has_tabs: false,
                world_axis: None,
                meets_face_id: None,
                meets_divider_id: None,
                status: EdgeStatus::Unlocked,
                anchor_local: None,
            })
            .collect()
    }

    #[test]
    fn extension_moves_shared_corner_on_both_edges() {
        let mut outline = Outline::new(vec![
            Point2::new(-10.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, -10.0),
            Point2::new(-10.0, -10.0),
        ])
        .unwrap();
        let edges = square_edges();
        let ext = EdgeExtensions { top: 5.0, left: 3.0, ..Default::default() };
        apply_edge_extensions(&mut outline, 10.0, 10.0, &edges, &ext);
        let tl = outline.polygon[0];
        assert!((tl.x - -13.0).abs() < 1e-9);
        assert!((tl.y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn feet_noop_when_disabled() {
        let mut outline = Outline::new(vec![
            Point2::new(-10.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, -10.0),
            Point2::new(-10.0, -10.0),
        ])
        .unwrap();
        let before = outline.polygon.clone();
        apply_feet(&mut outline, 10.0, -10.0, &FeetConfig::default());
        assert_eq!(outline.polygon, before);
    }

    #[test]
    fn cutouts_add_holes() {
        let mut outline = Outline::new(vec![
            Point2::new(-10.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, -10.0),
            Point2::new(-10.0, -10.0),
        ])
        .unwrap();
        let cutouts = vec![Cutout {
            id: "c1".into(),
            kind: CutoutKind::Circle { radius: 2.0 },
            center: jointcad_ir::Vec2::new(0.0, 0.0),
            rotation: 0.0,
        }];
        apply_cutouts(&mut outline, &cutouts);
        assert_eq!(outline.holes.len(), 1);
    }

    #[test]
    fn rect_cutout_with_corner_radius_rounds_corners_and_stays_inside_bounds() {
        let mut outline = Outline::new(vec![
            Point2::new(-10.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, -10.0),
            Point2::new(-10.0, -10.0),
        ])
        .unwrap();
        let cutouts = vec![Cutout {
            id: "c1".into(),
            kind: CutoutKind::Rect { width: 6.0, height: 4.0, corner_radius: Some(1.0) },
            center: jointcad_ir::Vec2::new(0.0, 0.0),
            rotation: 0.0,
        }];
        apply_cutouts(&mut outline, &cutouts);
        let hole = &outline.holes[0];
        assert!(hole.len() > 4, "rounded corners should add sampled arc points");
        for p in hole {
            assert!(p.x.abs() <= 3.0 + 1e-9 && p.y.abs() <= 2.0 + 1e-9);
        }
    }

    #[test]
    fn rect_cutout_without_corner_radius_stays_a_plain_rectangle() {
        let mut outline = Outline::new(vec![
            Point2::new(-10.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, -10.0),
            Point2::new(-10.0, -10.0),
        ])
        .unwrap();
        let cutouts = vec![Cutout {
            id: "c1".into(),
            kind: CutoutKind::Rect { width: 6.0, height: 4.0, corner_radius: None },
            center: jointcad_ir::Vec2::new(0.0, 0.0),
            rotation: 0.0,
        }];
        apply_cutouts(&mut outline, &cutouts);
        assert_eq!(outline.holes[0].len(), 4);
    }
}
