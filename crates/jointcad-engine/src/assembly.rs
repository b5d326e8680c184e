use std::collections::HashMap;

use jointcad_ir::{
    AssemblyConfig, Axis, Bounds3D, FaceConfig, FaceId, FeetConfig, MaterialConfig, SplitMode,
};
use jointcad_math::Transform;

use crate::fingers::{compute_finger_data, FingerData};
use crate::ids::alloc_node_id;
use crate::panel::divider::{derive_divider_panel, DividerContext, DividerEnd};
use crate::panel::face::{derive_face_panel, FaceHoleSource};
use crate::panel::Panel;
use crate::void::Void;

/// The root node of one assembly: its outer dimensions, material, face
/// configuration, and interior void tree. Panels are never stored — they are
/// derived fresh by `recompute`.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub material: MaterialConfig,
    pub assembly_config: AssemblyConfig,
    pub faces: Vec<FaceConfig>,
    pub feet: FeetConfig,
    pub root_void: Void,
    pub edge_extensions: HashMap<String, jointcad_ir::EdgeExtensions>,
    pub corner_fillets: HashMap<String, HashMap<jointcad_ir::EdgePosition, f64>>,
    pub custom_edge_paths: HashMap<String, HashMap<jointcad_ir::EdgePosition, jointcad_ir::CustomEdgePath>>,
    pub cutouts: HashMap<String, Vec<jointcad_ir::Cutout>>,
    pub dirty: bool,
    finger_cache: HashMap<Axis, FingerData>,
    panels: Vec<Panel>,
}

fn all_solid_faces() -> Vec<FaceConfig> {
    FaceId::ALL.iter().map(|&face_id| FaceConfig { face_id, solid: true }).collect()
}

impl Assembly {
    pub fn new(width: f64, height: f64, depth: f64, material: MaterialConfig, assembly_config: AssemblyConfig) -> Self {
        let root_void = Void::leaf(Bounds3D::new(-width / 2.0, -height / 2.0, -depth / 2.0, width, height, depth));
        let mut a = Self {
            id: alloc_node_id("assembly"),
            width,
            height,
            depth,
            material,
            assembly_config,
            faces: all_solid_faces(),
            feet: FeetConfig::default(),
            root_void,
            edge_extensions: HashMap::new(),
            corner_fillets: HashMap::new(),
            custom_edge_paths: HashMap::new(),
            cutouts: HashMap::new(),
            dirty: true,
            finger_cache: HashMap::new(),
            panels: Vec::new(),
        };
        a.recompute();
        a
    }

    fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
            Axis::Z => self.depth,
        }
    }

    fn root_range(&self, axis: Axis) -> (f64, f64) {
        let half = self.extent(axis) / 2.0;
        (-half, half)
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Re-derive the finger-data cache and every face/divider panel from
    /// current inputs. Idempotent; cheap to call after every mutation.
    pub fn recompute(&mut self) {
        self.finger_cache.clear();
        self.finger_cache.insert(Axis::X, compute_finger_data(self.width, self.material.thickness, self.material.finger_width, self.material.finger_gap));
        self.finger_cache.insert(Axis::Y, compute_finger_data(self.height, self.material.thickness, self.material.finger_width, self.material.finger_gap));
        self.finger_cache.insert(Axis::Z, compute_finger_data(self.depth, self.material.thickness, self.material.finger_width, self.material.finger_gap));

        let mut panels = Vec::new();
        self.derive_dividers_into(&self.root_void.clone(), &mut panels);

        for &face_id in &FaceId::ALL {
            let holes = self.hole_sources_for(face_id, &panels);
            let panel = derive_face_panel(
                &self.id,
                face_id,
                self.width,
                self.height,
                self.depth,
                &self.material,
                &self.assembly_config,
                &self.faces,
                &self.finger_cache,
                &holes,
            );
            panels.push(panel);
        }

        self.apply_edits(&mut panels);

        self.panels = panels;
        self.dirty = false;
    }

    /// Post-process every derived panel's outline: edge extensions, then
    /// feet (wall panels only), then custom edge paths, corner fillets, and
    /// finally cutouts, in that order.
    fn apply_edits(&self, panels: &mut [Panel]) {
        const FEET_ELIGIBLE_FACES: [FaceId; 4] = [FaceId::Front, FaceId::Back, FaceId::Left, FaceId::Right];

        for panel in panels.iter_mut() {
            let hw = panel.width / 2.0;
            let hh = panel.height / 2.0;
            let edges = panel.edges.clone();

            let ext = self.edge_extensions.get(&panel.id).cloned().unwrap_or_default();
            crate::outline_ops::apply_edge_extensions(&mut panel.outline, hw, hh, &edges, &ext);

            if let crate::panel::PanelKind::Face { face_id } = panel.kind {
                panel.corner_eligibility = self.corner_eligibility_for_face(face_id, panel, &ext);
            }

            if matches!(panel.kind, crate::panel::PanelKind::Face { face_id } if FEET_ELIGIBLE_FACES.contains(&face_id)) {
                crate::outline_ops::apply_feet(&mut panel.outline, hw, -hh, &self.feet);
            }

            if let Some(paths) = self.custom_edge_paths.get(&panel.id) {
                for (&edge, path) in paths {
                    crate::outline_ops::apply_custom_edge_path(&mut panel.outline, hw, hh, edge, &edges, path);
                }
            }

            if let Some(fillets) = self.corner_fillets.get(&panel.id) {
                for (&corner, &radius) in fillets {
                    let _ = crate::outline_ops::apply_corner_fillet(&mut panel.outline, hw, hh, corner, radius, 8);
                }
            }

            if let Some(cutouts) = self.cutouts.get(&panel.id) {
                crate::outline_ops::apply_cutouts(&mut panel.outline, cutouts);
            }
        }
    }

    /// A face panel's four corners, eligible for filleting once neither
    /// adjacent edge is jointed, or (when jointed) once this panel's own
    /// extension on that edge reaches farther out than the mating panel's
    /// reciprocal extension — the exposed sliver past the joint.
    fn corner_eligibility_for_face(
        &self,
        face_id: FaceId,
        panel: &Panel,
        own_ext: &jointcad_ir::EdgeExtensions,
    ) -> Vec<crate::panel::CornerEligibility> {
        use jointcad_ir::{EdgePosition, JointGender};

        let free_length = |edge: EdgePosition| -> f64 {
            let state = panel.edges.iter().find(|e| e.position == edge).unwrap();
            if state.gender == JointGender::None {
                return f64::MAX;
            }
            let mate_face = state.meets_face_id.expect("a jointed face edge always has a mating face");
            let mate_id = crate::panel::face::face_panel_id(&self.id, mate_face);
            let mate_ext = self.edge_extensions.get(&mate_id).cloned().unwrap_or_default();
            let mate_edge = EdgePosition::CLOCKWISE
                .into_iter()
                .find(|&e2| crate::gender::mating_face(mate_face, e2) == face_id)
                .expect("every mating face has a reciprocal edge back to this face");
            (extension_value(own_ext, edge) - extension_value(&mate_ext, mate_edge)).max(0.0)
        };

        EdgePosition::CLOCKWISE
            .iter()
            .map(|&corner| {
                let adjacent = crate::panel::adjacent_edges(corner);
                let max_radius = free_length(corner).min(free_length(adjacent));
                crate::panel::CornerEligibility {
                    corner,
                    adjacent,
                    eligible: max_radius >= 1.0,
                    max_radius: if max_radius.is_finite() { max_radius } else { 0.0 },
                }
            })
            .collect()
    }

    fn is_solid(&self, face: FaceId) -> bool {
        self.faces.iter().any(|f| f.face_id == face && f.solid)
    }

    /// Slot-hole sources a face needs from already-derived divider panels:
    /// for a divider of axis A and face normal N with A != N, its edge whose
    /// world_axis is the face's remaining in-plane axis contributes a hole.
    fn hole_sources_for<'a>(&self, face: FaceId, panels: &'a [Panel]) -> Vec<FaceHoleSource<'a>> {
        let normal = face.normal_axis();
        let mut out = Vec::new();
        for panel in panels {
            if let crate::panel::PanelKind::Divider { axis, position, .. } = &panel.kind {
                if *axis == normal {
                    continue;
                }
                let remaining = remaining_axis(*axis, normal);
                let dim = self.extent(remaining);
                if let Some(fd) = self.finger_cache.get(&remaining) {
                    out.push(FaceHoleSource {
                        divider_id: &panel.id,
                        long_axis: remaining,
                        fixed_coord: *position,
                        finger_data: fd,
                        dim_on_long_axis: dim,
                    });
                }
            }
        }
        out
    }

    fn derive_dividers_into(&self, void: &Void, out: &mut Vec<Panel>) {
        if let Some(grid) = &void.grid {
            self.derive_grid_dividers(void, grid, out);
        } else if void.children.len() == 2 {
            let axis = void.children[1].split.expect("second child of a subdivide carries split data").axis;
            let position = void.children[1].split.unwrap().position;
            let (p_axis, q_axis) = axis_others(axis);
            let p_range = (void.bounds.origin(p_axis), void.bounds.origin(p_axis) + void.bounds.extent(p_axis));
            let q_range = (void.bounds.origin(q_axis), void.bounds.origin(q_axis) + void.bounds.extent(q_axis));
            let p_end_kind = self.end_kinds(p_axis, p_range);
            let q_end_kind = self.end_kinds(q_axis, q_range);
            let p_wall_solid = self.wall_solid_for_range(p_axis, p_range);
            let q_wall_solid = self.wall_solid_for_range(q_axis, q_range);
            let ctx = DividerContext {
                void_id: &void.id,
                axis,
                position,
                p_range,
                q_range,
                p_end_kind,
                q_end_kind,
                p_wall_solid,
                q_wall_solid,
                notches: Vec::new(),
            };
            out.push(derive_divider_panel(&ctx, &self.material, &self.finger_cache));
        }
        for child in &void.children {
            self.derive_dividers_into(child, out);
        }
    }

    fn derive_grid_dividers(&self, void: &Void, grid: &crate::void::GridInfo, out: &mut Vec<Panel>) {
        if grid.axes.len() == 1 {
            let (axis, positions) = &grid.axes[0];
            for &pos in positions {
                out.push(self.simple_grid_divider(void, *axis, self.abs_pos(void, *axis, pos)));
            }
            return;
        }
        // Two perpendicular axes: every crossing notches both dividers, on
        // complementary edges (alphabetically lower axis cuts from its
        // positive-side edge, higher axis from its negative-side edge) so
        // the two halving-joint notches interlock.
        let (axis_a, positions_a) = &grid.axes[0];
        let (axis_b, positions_b) = &grid.axes[1];
        let positions_a: Vec<f64> = positions_a.iter().map(|p| self.abs_pos(void, *axis_a, *p)).collect();
        let positions_b: Vec<f64> = positions_b.iter().map(|p| self.abs_pos(void, *axis_b, *p)).collect();
        let thickness = self.material.thickness;

        for &pos in &positions_a {
            let notches: Vec<(Axis, (f64, f64))> =
                positions_b.iter().map(|&d| (*axis_b, (d - thickness / 2.0, d + thickness / 2.0))).collect();
            out.push(self.grid_divider_with_notches(void, *axis_a, pos, notches));
        }
        for &pos in &positions_b {
            let notches: Vec<(Axis, (f64, f64))> =
                positions_a.iter().map(|&d| (*axis_a, (d - thickness / 2.0, d + thickness / 2.0))).collect();
            out.push(self.grid_divider_with_notches(void, *axis_b, pos, notches));
        }
    }

    fn abs_pos(&self, void: &Void, axis: Axis, position: f64) -> f64 {
        // Grid positions are stored as absolute (SplitMode::Absolute) per
        // the percentage/absolute resolution already performed at subdivide
        // time; percentages here are resolved the same way against the
        // current void bounds.
        let low = void.bounds.origin(axis);
        if position.abs() <= 1.0 {
            low + position * void.bounds.extent(axis)
        } else {
            low + position
        }
        .min(void.bounds.origin(axis) + void.bounds.extent(axis))
        .max(low)
    }

    fn simple_grid_divider(&self, void: &Void, axis: Axis, position: f64) -> Panel {
        self.grid_divider_with_notches(void, axis, position, Vec::new())
    }

    fn grid_divider_with_notches(&self, void: &Void, axis: Axis, position: f64, notches: Vec<(Axis, (f64, f64))>) -> Panel {
        let (p_axis, q_axis) = axis_others(axis);
        let p_range = (void.bounds.origin(p_axis), void.bounds.origin(p_axis) + void.bounds.extent(p_axis));
        let q_range = (void.bounds.origin(q_axis), void.bounds.origin(q_axis) + void.bounds.extent(q_axis));
        let ctx = DividerContext {
            void_id: &void.id,
            axis,
            position,
            p_range,
            q_range,
            p_end_kind: self.end_kinds(p_axis, p_range),
            q_end_kind: self.end_kinds(q_axis, q_range),
            p_wall_solid: self.wall_solid_for_range(p_axis, p_range),
            q_wall_solid: self.wall_solid_for_range(q_axis, q_range),
            notches,
        };
        derive_divider_panel(&ctx, &self.material, &self.finger_cache)
    }

    fn end_kinds(&self, axis: Axis, range: (f64, f64)) -> (DividerEnd, DividerEnd) {
        let root = self.root_range(axis);
        let eps = 1e-6;
        (
            if (range.0 - root.0).abs() < eps { DividerEnd::OuterWall } else { DividerEnd::SiblingDivider },
            if (range.1 - root.1).abs() < eps { DividerEnd::OuterWall } else { DividerEnd::SiblingDivider },
        )
    }

    fn wall_solid_for_range(&self, axis: Axis, range: (f64, f64)) -> (bool, bool) {
        let root = self.root_range(axis);
        let eps = 1e-6;
        let lo_is_wall = (range.0 - root.0).abs() < eps;
        let hi_is_wall = (range.1 - root.1).abs() < eps;
        let face_for = |a: Axis, positive: bool| -> FaceId {
            match (a, positive) {
                (Axis::X, true) => FaceId::Right,
                (Axis::X, false) => FaceId::Left,
                (Axis::Y, true) => FaceId::Top,
                (Axis::Y, false) => FaceId::Bottom,
                (Axis::Z, true) => FaceId::Back,
                (Axis::Z, false) => FaceId::Front,
            }
        };
        (
            !lo_is_wall || self.is_solid(face_for(axis, false)),
            !hi_is_wall || self.is_solid(face_for(axis, true)),
        )
    }

    pub fn world_placement(&self) -> Transform {
        Transform::identity()
    }

    /// Derive the full published snapshot: void tree, every panel's outline
    /// and edge state, and a joint-alignment validation pass.
    pub fn snapshot(&self) -> jointcad_ir::AssemblySnapshot {
        let joint_errors = crate::joints::validate_joints(&self.panels)
            .into_iter()
            .map(|e| jointcad_ir::JointErrorEntry {
                panel_a_id: self.panels[e.panel_a].id.clone(),
                edge_a: e.edge_a,
                panel_b_id: self.panels[e.panel_b].id.clone(),
                edge_b: e.edge_b,
                error: jointcad_ir::JointAlignmentErrorSnapshot {
                    deviation: jointcad_ir::Vec3::new(e.deviation.x, e.deviation.y, e.deviation.z),
                    magnitude: e.magnitude,
                },
            })
            .collect();

        jointcad_ir::AssemblySnapshot {
            id: self.id.clone(),
            width: self.width,
            height: self.height,
            depth: self.depth,
            material: self.material,
            assembly_config: self.assembly_config,
            faces: self.faces.clone(),
            feet: self.feet,
            void: void_snapshot(&self.root_void),
            panels: self.panels.iter().map(panel_snapshot).collect(),
            joint_errors,
        }
    }
}

fn void_snapshot(void: &Void) -> jointcad_ir::VoidSnapshot {
    jointcad_ir::VoidSnapshot {
        id: void.id.clone(),
        bounds: void.bounds,
        split: void.children.get(1).and_then(|c| c.split).map(|s| jointcad_ir::SplitInfo {
            axis: s.axis,
            position: s.position,
            percentage: s.percentage,
        }),
        children: void.children.iter().map(void_snapshot).collect(),
        sub_assembly: void.sub_assembly.as_ref().map(|sub| {
            Box::new(jointcad_ir::SubAssemblySnapshot {
                clearance: sub.clearance,
                assembly: Box::new(sub.assembly.snapshot()),
            })
        }),
    }
}

fn panel_snapshot(panel: &Panel) -> jointcad_ir::PanelSnapshot {
    let transform = panel.plane.transform();
    jointcad_ir::PanelSnapshot {
        id: panel.id.clone(),
        kind: match &panel.kind {
            crate::panel::PanelKind::Face { face_id } => jointcad_ir::PanelKind::Face { face_id: *face_id },
            crate::panel::PanelKind::Divider { void_id, axis, position } => jointcad_ir::PanelKind::Divider {
                void_id: void_id.clone(),
                axis: *axis,
                position: *position,
            },
        },
        width: panel.width,
        height: panel.height,
        transform: jointcad_ir::TransformSnapshot {
            position: jointcad_ir::Vec3::new(transform.translation.x, transform.translation.y, transform.translation.z),
            rotation_euler: {
                let e = transform.euler_xyz();
                jointcad_ir::Vec3::new(e.x, e.y, e.z)
            },
        },
        outline: jointcad_ir::OutlineSnapshot {
            polygon: panel.outline.polygon.iter().map(|p| jointcad_ir::Vec2::new(p.x, p.y)).collect(),
            holes: panel
                .outline
                .holes
                .iter()
                .map(|h| h.iter().map(|p| jointcad_ir::Vec2::new(p.x, p.y)).collect())
                .collect(),
        },
        edges: panel
            .edges
            .iter()
            .map(|e| jointcad_ir::EdgeSnapshot {
                position: e.position,
                gender: e.gender,
                has_tabs: e.has_tabs,
                world_axis: e.world_axis,
                meets_face_id: e.meets_face_id,
                meets_divider_id: e.meets_divider_id.clone(),
                status: e.status,
                anchor: e.anchor_local.map(|local| {
                    let world = panel.plane.to_3d(local);
                    jointcad_ir::Vec3::new(world.x, world.y, world.z)
                }),
            })
            .collect(),
        corner_eligibility: panel
            .corner_eligibility
            .iter()
            .map(|c| jointcad_ir::CornerEligibility {
                corner: c.corner,
                adjacent: c.adjacent,
                eligible: c.eligible,
                max_radius: c.max_radius,
            })
            .collect(),
    }
}

fn axis_others(a: Axis) -> (Axis, Axis) {
    match a {
        Axis::X => (Axis::Y, Axis::Z),
        Axis::Y => (Axis::X, Axis::Z),
        Axis::Z => (Axis::X, Axis::Y),
    }
}

fn remaining_axis(a: Axis, b: Axis) -> Axis {
    [Axis::X, Axis::Y, Axis::Z].into_iter().find(|&x| x != a && x != b).expect("two distinct axes leave exactly one remaining")
}

fn extension_value(ext: &jointcad_ir::EdgeExtensions, edge: jointcad_ir::EdgePosition) -> f64 {
    match edge {
        jointcad_ir::EdgePosition::Top => ext.top,
        jointcad_ir::EdgePosition::Bottom => ext.bottom,
        jointcad_ir::EdgePosition::Left => ext.left,
        jointcad_ir::EdgePosition::Right => ext.right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assembly_derives_six_face_panels() {
        let a = Assembly::new(100.0, 80.0, 60.0, MaterialConfig::default(), AssemblyConfig::default());
        let face_count = a.panels().iter().filter(|p| matches!(p.kind, crate::panel::PanelKind::Face { .. })).count();
        assert_eq!(face_count, 6);
    }

    #[test]
    fn subdivided_void_adds_one_divider_panel() {
        let mut a = Assembly::new(100.0, 80.0, 60.0, MaterialConfig::default(), AssemblyConfig::default());
        a.root_void.subdivide(Axis::X, 0.0, SplitMode::Absolute, a.material.thickness).unwrap();
        a.recompute();
        let dividers = a.panels().iter().filter(|p| matches!(p.kind, crate::panel::PanelKind::Divider { .. })).count();
        assert_eq!(dividers, 1);
    }

    #[test]
    fn grid_subdivide_two_axes_notches_both_dividers_on_complementary_edges() {
        let mut a = Assembly::new(100.0, 80.0, 60.0, MaterialConfig::default(), AssemblyConfig::default());
        a.root_void
            .grid_subdivide(&[(Axis::X, vec![0.0], SplitMode::Absolute), (Axis::Z, vec![0.0], SplitMode::Absolute)], a.material.thickness)
            .unwrap();
        a.recompute();
        let dividers: Vec<_> = a.panels().iter().filter(|p| matches!(p.kind, crate::panel::PanelKind::Divider { .. })).collect();
        assert_eq!(dividers.len(), 2);

        let x_divider = dividers
            .iter()
            .find(|p| matches!(p.kind, crate::panel::PanelKind::Divider { axis: Axis::X, .. }))
            .unwrap();
        let z_divider = dividers
            .iter()
            .find(|p| matches!(p.kind, crate::panel::PanelKind::Divider { axis: Axis::Z, .. }))
            .unwrap();

        // X is the lower axis: its notch lands on its Right edge, cut to the
        // panel centerline (local x == 0). Z's notch lands on its Bottom
        // edge, cut to local y == 0.
        assert!(
            x_divider.outline.polygon.iter().any(|p| p.x.abs() < 1e-6),
            "x-axis divider should carry a notch reaching its centerline"
        );
        assert!(
            z_divider.outline.polygon.iter().any(|p| p.y.abs() < 1e-6),
            "z-axis divider should carry a notch reaching its centerline"
        );
    }

    #[test]
    fn recompute_wires_outline_post_processing_pipeline() {
        let mut a = Assembly::new(100.0, 80.0, 60.0, MaterialConfig::default(), AssemblyConfig::default());
        let top_id = crate::panel::face::face_panel_id(&a.id, FaceId::Top);
        a.cutouts.insert(
            top_id,
            vec![jointcad_ir::Cutout {
                id: "hole1".into(),
                kind: jointcad_ir::CutoutKind::Circle { radius: 5.0 },
                center: jointcad_ir::Vec2::new(0.0, 0.0),
                rotation: 0.0,
            }],
        );
        a.recompute();
        let top = a
            .panels()
            .iter()
            .find(|p| matches!(p.kind, crate::panel::PanelKind::Face { face_id: FaceId::Top }))
            .unwrap();
        assert_eq!(top.outline.holes.len(), 1, "a cutout registered on the assembly should reach the derived panel's outline");
    }

    #[test]
    fn corner_eligibility_accounts_for_extension_past_the_mating_panel() {
        let mut a = Assembly::new(100.0, 80.0, 60.0, MaterialConfig::default(), AssemblyConfig::default());
        a.recompute();
        let front = a.panels().iter().find(|p| matches!(p.kind, crate::panel::PanelKind::Face { face_id: FaceId::Front })).unwrap();
        let corner = front.corner_eligibility.iter().find(|c| c.corner == jointcad_ir::EdgePosition::Right).unwrap();
        assert!(!corner.eligible, "jointed corner with no extension should stay ineligible");

        let front_id = crate::panel::face::face_panel_id(&a.id, FaceId::Front);
        a.edge_extensions.insert(
            front_id,
            jointcad_ir::EdgeExtensions { right: 5.0, bottom: 5.0, ..Default::default() },
        );
        a.recompute();
        let front = a.panels().iter().find(|p| matches!(p.kind, crate::panel::PanelKind::Face { face_id: FaceId::Front })).unwrap();
        let corner = front.corner_eligibility.iter().find(|c| c.corner == jointcad_ir::EdgePosition::Right).unwrap();
        assert!(corner.eligible, "extension reaching past the mating panels' own extension frees the corner");
    }
}
