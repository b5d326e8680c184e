use jointcad_ir::{
    Axis, AssemblyConfig, EdgePosition, EdgeStatus, FaceConfig, FaceId, JointGender, MaterialConfig,
};
use jointcad_math::{Dir3, Point2, Vec3};
use jointcad_sketch::{Outline, Plane};
use std::collections::HashMap;

use crate::fingers::FingerData;
use crate::gender::{self, face_plane_basis};

use super::{finger_edge_points, outward_sign, EdgeState, Panel, PanelKind};

/// A divider's slot-hole contribution to one face: the hole's long axis,
/// its fixed (perpendicular) coordinate on this face, and the divider's own
/// id (for `meets_divider_id` bookkeeping on the reverse side).
pub struct FaceHoleSource<'a> {
    pub divider_id: &'a str,
    pub long_axis: Axis,
    pub fixed_coord: f64,
    pub finger_data: &'a FingerData,
    pub dim_on_long_axis: f64,
}

fn axis_of(ax: Axis, full_w: f64, full_h: f64, full_d: f64) -> f64 {
    match ax {
        Axis::X => full_w,
        Axis::Y => full_h,
        Axis::Z => full_d,
    }
}

fn unit_for(axis: Axis, sign: i8) -> Dir3 {
    let v = match axis {
        Axis::X => Vec3::x(),
        Axis::Y => Vec3::y(),
        Axis::Z => Vec3::z(),
    };
    Dir3::new_normalize(v * sign as f64)
}

/// Derive a face panel's dimensions, placement, outline, and holes.
#[allow(clippy::too_many_arguments)]
pub fn derive_face_panel(
    assembly_id: &str,
    face: FaceId,
    full_w: f64,
    full_h: f64,
    full_d: f64,
    material: &MaterialConfig,
    assembly_config: &AssemblyConfig,
    faces: &[FaceConfig],
    finger_by_axis: &HashMap<Axis, FingerData>,
    holes: &[FaceHoleSource],
) -> Panel {
    let is_solid = |f: FaceId| faces.iter().any(|c| c.face_id == f && c.solid);
    let thickness = material.thickness;

    let (mut w, mut h) = match face {
        FaceId::Front | FaceId::Back => (full_w, full_h),
        FaceId::Left | FaceId::Right => (full_d, full_h),
        FaceId::Top | FaceId::Bottom => (full_w, full_d),
    };
    if let Some(lid) = assembly_config.lid_config_for(face) {
        w -= 2.0 * lid.inset;
        h -= 2.0 * lid.inset;
    }
    let hw = w / 2.0;
    let hh = h / 2.0;

    let (x_dir, y_dir, normal) = face_plane_basis(face);
    let normal_dim = axis_of(normal.0, full_w, full_h, full_d);
    let origin = unit_for(normal.0, normal.1).into_inner() * (normal_dim / 2.0 - thickness / 2.0);
    let plane = Plane::new(origin, unit_for(x_dir.0, x_dir.1), unit_for(y_dir.0, y_dir.1));

    let genders: HashMap<EdgePosition, JointGender> = EdgePosition::CLOCKWISE
        .iter()
        .map(|&edge| (edge, gender::face_edge_gender(face, edge, is_solid, assembly_config)))
        .collect();
    let edge_neighbors = |edge: EdgePosition| -> (EdgePosition, EdgePosition) {
        match edge {
            EdgePosition::Top => (EdgePosition::Left, EdgePosition::Right),
            EdgePosition::Right => (EdgePosition::Top, EdgePosition::Bottom),
            EdgePosition::Bottom => (EdgePosition::Right, EdgePosition::Left),
            EdgePosition::Left => (EdgePosition::Bottom, EdgePosition::Top),
        }
    };
    // An edge open on both sides is Unlocked; locked outright once jointed;
    // otherwise OutwardOnly, since a shared corner with a jointed neighbor
    // can still extend but isn't free on both sides.
    let status_for = |gender: JointGender, prev: JointGender, next: JointGender| {
        if gender != JointGender::None {
            EdgeStatus::Locked
        } else if prev != JointGender::None || next != JointGender::None {
            EdgeStatus::OutwardOnly
        } else {
            EdgeStatus::Unlocked
        }
    };

    let mut edges = Vec::with_capacity(4);
    for &edge in &EdgePosition::CLOCKWISE {
        let mate = gender::mating_face(face, edge);
        let g = genders[&edge];
        let world_axis = gender::edge_world_axis(face, edge);
        let (prev, next) = edge_neighbors(edge);
        edges.push(EdgeState {
            position: edge,
            gender: g,
            has_tabs: g != JointGender::None,
            world_axis: Some(world_axis),
            meets_face_id: Some(mate),
            meets_divider_id: None,
            status: status_for(g, genders[&prev], genders[&next]),
            anchor_local: None,
        });
    }

    // Corner coordinates: baseline(edge) is inset by thickness for male edges.
    let baseline = |edge: EdgePosition, e: &[EdgeState]| -> f64 {
        let state = e.iter().find(|s| s.position == edge).unwrap();
        let nominal = outward_sign(edge) * if matches!(edge, EdgePosition::Top | EdgePosition::Bottom) { hh } else { hw };
        if state.gender == JointGender::Male {
            nominal - outward_sign(edge) * thickness
        } else {
            nominal
        }
    };

    let top_y = baseline(EdgePosition::Top, &edges);
    let bottom_y = baseline(EdgePosition::Bottom, &edges);
    let left_x = baseline(EdgePosition::Left, &edges);
    let right_x = baseline(EdgePosition::Right, &edges);

    let tl = Point2::new(left_x, top_y);
    let tr = Point2::new(right_x, top_y);
    let br = Point2::new(right_x, bottom_y);
    let bl = Point2::new(left_x, bottom_y);

    let mut polygon = Vec::new();
    for &edge in &EdgePosition::CLOCKWISE {
        let state = edges.iter().find(|s| s.position == edge).unwrap();
        let (start, end, running_is_x, nominal) = match edge {
            EdgePosition::Top => (tl, tr, true, hh),
            EdgePosition::Right => (tr, br, false, hw),
            EdgePosition::Bottom => (br, bl, true, hh),
            EdgePosition::Left => (bl, tl, false, hw),
        };
        if state.gender == JointGender::None {
            polygon.push(start);
            continue;
        }
        let world_axis = state.world_axis.unwrap();
        let fd = &finger_by_axis[&world_axis];
        let dim_axis = axis_of(world_axis, full_w, full_h, full_d);
        let eo = outward_sign(edge);
        let (perp_gap, perp_tab) = if state.gender == JointGender::Male {
            (nominal * eo - eo * thickness, nominal * eo)
        } else {
            (nominal * eo, nominal * eo - eo * thickness)
        };
        let (start_running, end_running) = if running_is_x {
            (start.x, end.x)
        } else {
            (start.y, end.y)
        };
        let pts = finger_edge_points(fd, dim_axis, start_running, end_running, running_is_x, perp_gap, perp_tab, &[]);
        polygon.extend(pts.into_iter().take(pts.len().saturating_sub(1)));
    }

    let mut outline = Outline::new(polygon).unwrap_or_else(|_| Outline {
        polygon: vec![tl, tr, br, bl],
        holes: Vec::new(),
    });

    for hole in holes {
        let dim = hole.dim_on_long_axis;
        let half = dim / 2.0;
        for (a, b) in hole.finger_data.tab_regions() {
            let lo = a - dim / 2.0;
            let hi = b - dim / 2.0;
            if lo <= -half + 1e-6 || hi >= half - 1e-6 {
                continue; // degenerate: touches panel boundary, skip per spec
            }
            let perp_lo = hole.fixed_coord - thickness / 2.0;
            let perp_hi = hole.fixed_coord + thickness / 2.0;
            let mut poly = if hole.long_axis == axis_for_running(face, true) {
                vec![
                    Point2::new(lo, perp_lo),
                    Point2::new(lo, perp_hi),
                    Point2::new(hi, perp_hi),
                    Point2::new(hi, perp_lo),
                ]
            } else {
                vec![
                    Point2::new(perp_lo, lo),
                    Point2::new(perp_hi, lo),
                    Point2::new(perp_hi, hi),
                    Point2::new(perp_lo, hi),
                ]
            };
            jointcad_sketch::ensure_counter_clockwise(&mut poly);
            outline.add_hole(poly);
        }
    }

    // Corner eligibility depends on edge extensions, which aren't known at
    // panel-derivation time (they're per-assembly edits keyed by panel id,
    // applied afterward) — the assembly recomputes this post-pass once every
    // panel exists, the same way it handles cross-lap notches for dividers.
    let corner_eligibility = Vec::new();

    for edge in &mut edges {
        if edge.gender != JointGender::None {
            let mid = edge_midpoint_local(edge.position, hw, hh);
            let inward = inward_offset(edge.position, thickness / 2.0);
            edge.anchor_local = Some(Point2::new(mid.x + inward.0, mid.y + inward.1));
        }
    }

    Panel {
        id: face_panel_id(assembly_id, face),
        kind: PanelKind::Face { face_id: face },
        width: w,
        height: h,
        plane,
        outline,
        edges,
        corner_eligibility,
    }
}

/// The id `derive_face_panel` assigns a given face's panel, exposed so the
/// assembly can look up a mating face's own recorded edge extensions.
pub(crate) fn face_panel_id(assembly_id: &str, face: FaceId) -> String {
    format!("face:{assembly_id}:{}", face_tag(face))
}

fn axis_for_running(face: FaceId, running_is_x: bool) -> Axis {
    let (x_dir, y_dir, _) = face_plane_basis(face);
    if running_is_x {
        x_dir.0
    } else {
        y_dir.0
    }
}

fn edge_midpoint_local(edge: EdgePosition, hw: f64, hh: f64) -> Point2 {
    match edge {
        EdgePosition::Top => Point2::new(0.0, hh),
        EdgePosition::Bottom => Point2::new(0.0, -hh),
        EdgePosition::Left => Point2::new(-hw, 0.0),
        EdgePosition::Right => Point2::new(hw, 0.0),
    }
}

fn inward_offset(edge: EdgePosition, half_thickness: f64) -> (f64, f64) {
    match edge {
        EdgePosition::Top => (0.0, -half_thickness),
        EdgePosition::Bottom => (0.0, half_thickness),
        EdgePosition::Left => (half_thickness, 0.0),
        EdgePosition::Right => (-half_thickness, 0.0),
    }
}

fn face_tag(face: FaceId) -> &'static str {
    match face {
        FaceId::Front => "front",
        FaceId::Back => "back",
        FaceId::Left => "left",
        FaceId::Right => "right",
        FaceId::Top => "top",
        FaceId::Bottom => "bottom",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingers::compute_finger_data;

    fn basic_faces(open: FaceId) -> Vec<FaceConfig> {
        FaceId::ALL
            .iter()
            .map(|&f| FaceConfig { face_id: f, solid: f != open })
            .collect()
    }

    fn finger_map(w: f64, h: f64, d: f64, m: &MaterialConfig) -> HashMap<Axis, FingerData> {
        let mut map = HashMap::new();
        map.insert(Axis::X, compute_finger_data(w, m.thickness, m.finger_width, m.finger_gap));
        map.insert(Axis::Y, compute_finger_data(h, m.thickness, m.finger_width, m.finger_gap));
        map.insert(Axis::Z, compute_finger_data(d, m.thickness, m.finger_width, m.finger_gap));
        map
    }

    #[test]
    fn open_top_box_front_panel_has_finger_points() {
        let material = MaterialConfig { thickness: 3.0, finger_width: 10.0, finger_gap: 1.5 };
        let cfg = AssemblyConfig::default();
        let faces = basic_faces(FaceId::Top);
        let fingers = finger_map(100.0, 80.0, 60.0, &material);
        let panel = derive_face_panel("a1", FaceId::Front, 100.0, 80.0, 60.0, &material, &cfg, &faces, &fingers, &[]);
        assert!(panel.outline.polygon.len() > 4);
    }

    #[test]
    fn top_edge_is_none_when_top_open() {
        let material = MaterialConfig { thickness: 3.0, finger_width: 10.0, finger_gap: 1.5 };
        let cfg = AssemblyConfig::default();
        let faces = basic_faces(FaceId::Top);
        let fingers = finger_map(100.0, 80.0, 60.0, &material);
        let panel = derive_face_panel("a1", FaceId::Front, 100.0, 80.0, 60.0, &material, &cfg, &faces, &fingers, &[]);
        assert_eq!(panel.edge(EdgePosition::Top).gender, JointGender::None);
    }

    #[test]
    fn open_edge_between_two_jointed_neighbors_is_outward_only() {
        let material = MaterialConfig { thickness: 3.0, finger_width: 10.0, finger_gap: 1.5 };
        let cfg = AssemblyConfig::default();
        let faces = basic_faces(FaceId::Top);
        let fingers = finger_map(100.0, 80.0, 60.0, &material);
        let panel = derive_face_panel("a1", FaceId::Front, 100.0, 80.0, 60.0, &material, &cfg, &faces, &fingers, &[]);
        // Top is open (its mating face is open) but both its neighbors
        // (Left, Right) are jointed, so it can still extend outward without
        // a free corner on either side.
        assert_eq!(panel.edge(EdgePosition::Top).status, EdgeStatus::OutwardOnly);
        assert_eq!(panel.edge(EdgePosition::Left).status, EdgeStatus::Locked);
        assert_eq!(panel.edge(EdgePosition::Right).status, EdgeStatus::Locked);
        assert_eq!(panel.edge(EdgePosition::Bottom).status, EdgeStatus::Locked);
    }
}
