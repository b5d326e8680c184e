use jointcad_ir::{Axis, EdgeStatus, JointGender, MaterialConfig};
use jointcad_math::{Dir3, Point2, Vec3};
use jointcad_sketch::{Outline, Plane};
use std::collections::HashMap;

use crate::fingers::FingerData;

use super::{EdgeState, Panel, PanelKind};

fn axis_others(a: Axis) -> (Axis, Axis) {
    match a {
        Axis::X => (Axis::Y, Axis::Z),
        Axis::Y => (Axis::X, Axis::Z),
        Axis::Z => (Axis::X, Axis::Y),
    }
}

fn axis_enum(a: Axis) -> u8 {
    match a {
        Axis::X => 0,
        Axis::Y => 1,
        Axis::Z => 2,
    }
}

/// Which edge of this divider a crossing on `cross_axis` notches from: the
/// pair sharing `cross_axis` as their world axis, positive side if this
/// divider's own axis is alphabetically lower, negative side otherwise — so
/// two perpendicular dividers always notch from opposite sides and interlock.
fn notch_edge_for(this_axis: Axis, p_axis: Axis, cross_axis: Axis) -> jointcad_ir::EdgePosition {
    use jointcad_ir::EdgePosition;
    let from_positive = axis_enum(this_axis) < axis_enum(cross_axis);
    if cross_axis == p_axis {
        if from_positive { EdgePosition::Top } else { EdgePosition::Bottom }
    } else if from_positive {
        EdgePosition::Right
    } else {
        EdgePosition::Left
    }
}

fn unit(axis: Axis, sign: f64) -> Dir3 {
    let v = match axis {
        Axis::X => Vec3::x(),
        Axis::Y => Vec3::y(),
        Axis::Z => Vec3::z(),
    };
    Dir3::new_normalize(v * sign)
}

/// One end of a divider panel's P or Q extent: either it reaches the
/// assembly's own outer wall (no extension, a hole array is cut in that
/// wall) or it reaches a sibling divider (extend by thickness to overlap).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DividerEnd {
    OuterWall,
    SiblingDivider,
}

/// Everything `derive_divider_panel` needs about one divider's geometry
/// within its parent void, computed by the caller (the void tree owns the
/// bounds and sibling relationships).
pub struct DividerContext<'a> {
    pub void_id: &'a str,
    pub axis: Axis,
    /// This divider's position (center, world coordinate) along `axis`.
    pub position: f64,
    /// The parent void's bounds along the two in-plane axes (low, high),
    /// indexed by `axis_others(axis)` order: (p_low, p_high, q_low, q_high).
    pub p_range: (f64, f64),
    pub q_range: (f64, f64),
    pub p_end_kind: (DividerEnd, DividerEnd),
    pub q_end_kind: (DividerEnd, DividerEnd),
    /// Whether the wall this divider's P-extreme or Q-extreme reaches is solid.
    pub p_wall_solid: (bool, bool),
    pub q_wall_solid: (bool, bool),
    /// Cross-lap notches carried in from a perpendicular divider sharing this
    /// void: `(axis_of_notch_edge, blocked_abs_interval)`.
    pub notches: Vec<(Axis, (f64, f64))>,
}

/// Derive a divider panel's dimensions, placement, and finger-edges.
pub fn derive_divider_panel(
    ctx: &DividerContext,
    material: &MaterialConfig,
    finger_by_axis: &HashMap<Axis, FingerData>,
) -> Panel {
    let thickness = material.thickness;
    let (p_axis, q_axis) = axis_others(ctx.axis);

    let p_extend_lo = if ctx.p_end_kind.0 == DividerEnd::SiblingDivider { thickness } else { 0.0 };
    let p_extend_hi = if ctx.p_end_kind.1 == DividerEnd::SiblingDivider { thickness } else { 0.0 };
    let q_extend_lo = if ctx.q_end_kind.0 == DividerEnd::SiblingDivider { thickness } else { 0.0 };
    let q_extend_hi = if ctx.q_end_kind.1 == DividerEnd::SiblingDivider { thickness } else { 0.0 };

    let width = (ctx.p_range.1 - ctx.p_range.0) + p_extend_lo + p_extend_hi;
    let height = (ctx.q_range.1 - ctx.q_range.0) + q_extend_lo + q_extend_hi;
    let hw = width / 2.0;
    let hh = height / 2.0;

    let origin = unit(ctx.axis, 1.0).into_inner() * ctx.position;
    let plane = Plane::new(origin, unit(p_axis, 1.0), unit(q_axis, 1.0));

    // Edge layout: Top/Bottom run along P at the Q extremes; Left/Right run
    // along Q at the P extremes (mirroring the face panel convention).
    let gender_for = |solid: bool| if solid { JointGender::Male } else { JointGender::None };

    let top_gender = gender_for(ctx.q_wall_solid.1);
    let bottom_gender = gender_for(ctx.q_wall_solid.0);
    let left_gender = gender_for(ctx.p_wall_solid.0);
    let right_gender = gender_for(ctx.p_wall_solid.1);

    // Status: an open edge next to a solid (Locked) neighbor can still be
    // extended outward but the shared corner isn't free on both sides, so it
    // gets the intermediate OutwardOnly state rather than fully Unlocked.
    let status_for = |gender: JointGender, prev: JointGender, next: JointGender| {
        if gender != JointGender::None {
            EdgeStatus::Locked
        } else if prev != JointGender::None || next != JointGender::None {
            EdgeStatus::OutwardOnly
        } else {
            EdgeStatus::Unlocked
        }
    };

    let edges = vec![
        EdgeState {
            position: jointcad_ir::EdgePosition::Top,
            gender: top_gender,
            has_tabs: top_gender != JointGender::None,
            world_axis: Some(p_axis),
            meets_face_id: None,
            meets_divider_id: None,
            status: status_for(top_gender, left_gender, right_gender),
            anchor_local: None,
        },
        EdgeState {
            position: jointcad_ir::EdgePosition::Right,
            gender: right_gender,
            has_tabs: right_gender != JointGender::None,
            world_axis: Some(q_axis),
            meets_face_id: None,
            meets_divider_id: None,
            status: status_for(right_gender, top_gender, bottom_gender),
            anchor_local: None,
        },
        EdgeState {
            position: jointcad_ir::EdgePosition::Bottom,
            gender: bottom_gender,
            has_tabs: bottom_gender != JointGender::None,
            world_axis: Some(p_axis),
            meets_face_id: None,
            meets_divider_id: None,
            status: status_for(bottom_gender, right_gender, left_gender),
            anchor_local: None,
        },
        EdgeState {
            position: jointcad_ir::EdgePosition::Left,
            gender: left_gender,
            has_tabs: left_gender != JointGender::None,
            world_axis: Some(q_axis),
            meets_face_id: None,
            meets_divider_id: None,
            status: status_for(left_gender, bottom_gender, top_gender),
            anchor_local: None,
        },
    ];

    let tl = Point2::new(-hw, hh);
    let tr = Point2::new(hw, hh);
    let br = Point2::new(hw, -hh);
    let bl = Point2::new(-hw, -hh);

    let mut polygon = Vec::new();
    for &edge in &jointcad_ir::EdgePosition::CLOCKWISE {
        let state = edges.iter().find(|s| s.position == edge).unwrap();
        let (start, end, running_is_x, dim_for_finger, world_axis) = match edge {
            jointcad_ir::EdgePosition::Top => (tl, tr, true, p_axis, p_axis),
            jointcad_ir::EdgePosition::Right => (tr, br, false, q_axis, q_axis),
            jointcad_ir::EdgePosition::Bottom => (br, bl, true, p_axis, p_axis),
            jointcad_ir::EdgePosition::Left => (bl, tl, false, q_axis, q_axis),
        };
        if state.gender == JointGender::None {
            polygon.push(start);
            continue;
        }
        let fd = &finger_by_axis[&world_axis];
        let full_dim = if dim_for_finger == p_axis { width } else { height };
        let eo = super::outward_sign(edge);
        let nominal = if matches!(edge, jointcad_ir::EdgePosition::Top | jointcad_ir::EdgePosition::Bottom) { hh } else { hw };
        // Dividers always carry male tabs on solid-facing edges: base rectangle
        // inset, tabs protrude out to the nominal boundary.
        let perp_gap = nominal * eo - eo * thickness;
        let perp_tab = nominal * eo;
        let (start_running, end_running) = if running_is_x { (start.x, end.x) } else { (start.y, end.y) };
        let blocked: Vec<(f64, f64)> = ctx
            .notches
            .iter()
            .filter(|(a, _)| *a == world_axis)
            .map(|(_, r)| *r)
            .collect();
        let pts = super::finger_edge_points(fd, full_dim, start_running, end_running, running_is_x, perp_gap, perp_tab, &blocked);
        polygon.extend(pts.into_iter().take(pts.len().saturating_sub(1)));
    }

    let mut outline = Outline::new(polygon).unwrap_or(Outline { polygon: vec![tl, tr, br, bl], holes: Vec::new() });

    // Cross-lap notches: cut a U-shape from the chosen edge down to the
    // panel's centerline, width = material thickness, at each crossing.
    for &(cross_axis, (lo, hi)) in &ctx.notches {
        let edge = notch_edge_for(ctx.axis, p_axis, cross_axis);
        let state = edges.iter().find(|s| s.position == edge).unwrap();
        let running_is_x = matches!(edge, jointcad_ir::EdgePosition::Top | jointcad_ir::EdgePosition::Bottom);
        let ascending = matches!(edge, jointcad_ir::EdgePosition::Top | jointcad_ir::EdgePosition::Left);
        let nominal = if running_is_x { hh } else { hw };
        let eo = super::outward_sign(edge);
        let thickness_inset = if state.gender == JointGender::Male { thickness } else { 0.0 };
        let boundary_perp = nominal * eo - eo * thickness_inset;
        outline.notch_edge(running_is_x, ascending, boundary_perp, lo, hi, 0.0);
    }

    Panel {
        id: format!("divider:{}", ctx.void_id),
        kind: PanelKind::Divider { void_id: ctx.void_id.to_string(), axis: ctx.axis, position: ctx.position },
        width,
        height,
        plane,
        outline,
        edges,
        corner_eligibility: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingers::compute_finger_data;

    #[test]
    fn simple_divider_spans_parent_extent_plus_nothing_at_outer_walls() {
        let material = MaterialConfig { thickness: 3.0, finger_width: 10.0, finger_gap: 1.5 };
        let mut fingers = HashMap::new();
        fingers.insert(Axis::Y, compute_finger_data(60.0, 3.0, 10.0, 1.5));
        fingers.insert(Axis::Z, compute_finger_data(100.0, 3.0, 10.0, 1.5));
        let ctx = DividerContext {
            void_id: "v1",
            axis: Axis::X,
            position: 0.0,
            p_range: (-30.0, 30.0),
            q_range: (-50.0, 50.0),
            p_end_kind: (DividerEnd::OuterWall, DividerEnd::OuterWall),
            q_end_kind: (DividerEnd::OuterWall, DividerEnd::OuterWall),
            p_wall_solid: (true, true),
            q_wall_solid: (true, true),
            notches: Vec::new(),
        };
        let panel = derive_divider_panel(&ctx, &material, &fingers);
        assert!((panel.width - 60.0).abs() < 1e-9);
        assert!((panel.height - 100.0).abs() < 1e-9);
    }

    #[test]
    fn sibling_end_extends_by_thickness() {
        let material = MaterialConfig { thickness: 3.0, finger_width: 10.0, finger_gap: 1.5 };
        let mut fingers = HashMap::new();
        fingers.insert(Axis::Y, compute_finger_data(60.0, 3.0, 10.0, 1.5));
        fingers.insert(Axis::Z, compute_finger_data(47.0, 3.0, 10.0, 1.5));
        let ctx = DividerContext {
            void_id: "v1",
            axis: Axis::X,
            position: 0.0,
            p_range: (-30.0, 30.0),
            q_range: (0.0, 47.0),
            p_end_kind: (DividerEnd::OuterWall, DividerEnd::OuterWall),
            q_end_kind: (DividerEnd::SiblingDivider, DividerEnd::OuterWall),
            p_wall_solid: (true, true),
            q_wall_solid: (true, true),
            notches: Vec::new(),
        };
        let panel = derive_divider_panel(&ctx, &material, &fingers);
        assert!((panel.height - 50.0).abs() < 1e-9);
    }
}
