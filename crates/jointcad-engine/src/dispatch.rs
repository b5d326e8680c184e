//! Exhaustive `Action` handling: locate the target node, mutate it, mark the
//! owning assembly dirty, recompute, and report the outcome.

use jointcad_ir::{Action, ActionResult, LidConfig, Sign, SplitMode};

use crate::scene::Scene;
use crate::subassembly::SubAssembly;

pub fn dispatch(scene: &mut Scene, action: Action) -> ActionResult {
    let assembly = scene.active_mut();
    let result = apply(assembly, action);
    if result.success {
        assembly.recompute();
    }
    result
}

fn apply(assembly: &mut crate::assembly::Assembly, action: Action) -> ActionResult {
    match action {
        Action::SetDimensions { width, height, depth, .. } => {
            if width <= 0.0 || height <= 0.0 || depth <= 0.0 {
                return ActionResult::fail("dimensions must be positive");
            }
            assembly.width = width;
            assembly.height = height;
            assembly.depth = depth;
            assembly.mark_dirty();
            ActionResult::ok()
        }
        Action::SetMaterial { thickness, finger_width, finger_gap, .. } => {
            if thickness <= 0.0 || finger_width <= 0.0 {
                return ActionResult::fail("material thickness and finger width must be positive");
            }
            assembly.material.thickness = thickness;
            assembly.material.finger_width = finger_width;
            assembly.material.finger_gap = finger_gap;
            assembly.mark_dirty();
            ActionResult::ok()
        }
        Action::SetFaceSolid { face_id, solid, .. } => {
            if let Some(cfg) = assembly.faces.iter_mut().find(|f| f.face_id == face_id) {
                cfg.solid = solid;
                assembly.mark_dirty();
                ActionResult::ok()
            } else {
                ActionResult::fail("unknown face")
            }
        }
        Action::SetAssemblyAxis { axis, .. } => {
            assembly.assembly_config.assembly_axis = axis;
            assembly.mark_dirty();
            ActionResult::ok()
        }
        Action::SetLidConfig { side, tab_direction, inset, .. } => {
            let lid = LidConfig { tab_direction, inset };
            match side {
                Sign::Positive => assembly.assembly_config.lid_positive = lid,
                Sign::Negative => assembly.assembly_config.lid_negative = lid,
            }
            assembly.mark_dirty();
            ActionResult::ok()
        }
        Action::SetFeet { feet, .. } => {
            assembly.feet = feet;
            assembly.mark_dirty();
            ActionResult::ok()
        }
        Action::SetEdgeExtension { panel_id, edge, value } => {
            let entry = assembly.edge_extensions.entry(panel_id).or_default();
            match edge {
                jointcad_ir::EdgePosition::Top => entry.top = value,
                jointcad_ir::EdgePosition::Bottom => entry.bottom = value,
                jointcad_ir::EdgePosition::Left => entry.left = value,
                jointcad_ir::EdgePosition::Right => entry.right = value,
            }
            assembly.mark_dirty();
            ActionResult::ok()
        }
        Action::SetCornerFillet { panel_id, corner, radius, .. } => {
            assembly.corner_fillets.entry(panel_id).or_default().insert(corner, radius);
            assembly.mark_dirty();
            ActionResult::ok()
        }
        Action::SetCustomEdgePath { panel_id, edge, path } => {
            let entry = assembly.custom_edge_paths.entry(panel_id).or_default();
            match path {
                Some(p) => {
                    entry.insert(edge, p);
                }
                None => {
                    entry.remove(&edge);
                }
            }
            assembly.mark_dirty();
            ActionResult::ok()
        }
        Action::SetCutout { panel_id, cutout } => {
            let list = assembly.cutouts.entry(panel_id).or_default();
            if let Some(existing) = list.iter_mut().find(|c| c.id == cutout.id) {
                *existing = cutout;
            } else {
                list.push(cutout);
            }
            assembly.mark_dirty();
            ActionResult::ok()
        }
        Action::DeleteCutout { panel_id, cutout_id } => {
            if let Some(list) = assembly.cutouts.get_mut(&panel_id) {
                list.retain(|c| c.id != cutout_id);
            }
            assembly.mark_dirty();
            ActionResult::ok()
        }
        Action::SubdivideVoid { void_id, axis, position, mode } => {
            let thickness = assembly.material.thickness;
            match assembly.root_void.find_mut(&void_id) {
                Some(v) => match v.subdivide(axis, position, mode, thickness) {
                    Ok(()) => {
                        assembly.mark_dirty();
                        ActionResult::ok()
                    }
                    Err(e) => ActionResult::fail(e.to_string()),
                },
                None => ActionResult::fail("unknown void"),
            }
        }
        Action::GridSubdivideVoid { void_id, specs } => {
            let thickness = assembly.material.thickness;
            let specs: Vec<(jointcad_ir::Axis, Vec<f64>, SplitMode)> =
                specs.into_iter().map(|s| (s.axis, s.positions, s.mode)).collect();
            match assembly.root_void.find_mut(&void_id) {
                Some(v) => match v.grid_subdivide(&specs, thickness) {
                    Ok(()) => {
                        assembly.mark_dirty();
                        ActionResult::ok()
                    }
                    Err(e) => ActionResult::fail(e.to_string()),
                },
                None => ActionResult::fail("unknown void"),
            }
        }
        Action::ClearSubdivision { void_id } => match assembly.root_void.find_mut(&void_id) {
            Some(v) => {
                v.clear_subdivision();
                assembly.mark_dirty();
                ActionResult::ok()
            }
            None => ActionResult::fail("unknown void"),
        },
        Action::CreateSubAssembly { void_id, clearance } => {
            let material = assembly.material;
            let assembly_config = assembly.assembly_config;
            match assembly.root_void.find_mut(&void_id) {
                Some(v) => {
                    let sub = SubAssembly::new(clearance, v.bounds, material, assembly_config);
                    match v.create_sub_assembly(sub) {
                        Ok(()) => {
                            assembly.mark_dirty();
                            ActionResult::ok()
                        }
                        Err(e) => ActionResult::fail(e.to_string()),
                    }
                }
                None => ActionResult::fail("unknown void"),
            }
        }
        Action::RemoveSubAssembly { void_id } => match assembly.root_void.find_mut(&void_id) {
            Some(v) => {
                v.remove_sub_assembly();
                assembly.mark_dirty();
                ActionResult::ok()
            }
            None => ActionResult::fail("unknown void"),
        },
        Action::SetSubAssemblyClearance { void_id, clearance } => match assembly.root_void.find_mut(&void_id) {
            Some(v) => match v.sub_assembly.as_mut() {
                Some(sub) => {
                    sub.clearance = clearance;
                    assembly.mark_dirty();
                    ActionResult::ok()
                }
                None => ActionResult::fail("void hosts no sub-assembly"),
            },
            None => ActionResult::fail("unknown void"),
        },
        Action::MoveDivider { void_id, position } => {
            let thickness = assembly.material.thickness;
            match assembly.root_void.find_mut(&void_id) {
                Some(v) => match v.move_divider(position, SplitMode::Absolute, thickness) {
                    Ok(()) => {
                        assembly.mark_dirty();
                        ActionResult::ok()
                    }
                    Err(e) => ActionResult::fail(e.to_string()),
                },
                None => ActionResult::fail("unknown void"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jointcad_ir::{Axis, AssemblyConfig, EdgePosition, FaceId, MaterialConfig};

    fn sample_scene() -> Scene {
        Scene::new(crate::assembly::Assembly::new(100.0, 80.0, 60.0, MaterialConfig::default(), AssemblyConfig::default()))
    }

    #[test]
    fn set_dimensions_updates_and_recomputes() {
        let mut scene = sample_scene();
        let result = dispatch(&mut scene, Action::SetDimensions { assembly_id: "a".into(), width: 120.0, height: 80.0, depth: 60.0 });
        assert!(result.success);
        assert_eq!(scene.primary.width, 120.0);
        assert!(!scene.primary.dirty);
    }

    #[test]
    fn negative_dimensions_rejected() {
        let mut scene = sample_scene();
        let result = dispatch(&mut scene, Action::SetDimensions { assembly_id: "a".into(), width: -1.0, height: 80.0, depth: 60.0 });
        assert!(!result.success);
    }

    #[test]
    fn subdivide_void_unknown_id_fails() {
        let mut scene = sample_scene();
        let result = dispatch(&mut scene, Action::SubdivideVoid { void_id: "nope".into(), axis: Axis::X, position: 0.0, mode: SplitMode::Absolute });
        assert!(!result.success);
    }

    #[test]
    fn subdivide_root_void_by_id() {
        let mut scene = sample_scene();
        let void_id = scene.primary.root_void.id.clone();
        let result = dispatch(&mut scene, Action::SubdivideVoid { void_id, axis: Axis::X, position: 0.0, mode: SplitMode::Absolute });
        assert!(result.success);
        assert_eq!(scene.primary.root_void.children.len(), 2);
    }

    #[test]
    fn set_edge_extension_records_value() {
        let mut scene = sample_scene();
        let panel_id = scene.primary.panels()[0].id.clone();
        let result = dispatch(&mut scene, Action::SetEdgeExtension { panel_id: panel_id.clone(), edge: EdgePosition::Top, value: 5.0 });
        assert!(result.success);
        assert_eq!(scene.primary.edge_extensions[&panel_id].top, 5.0);
    }

    #[test]
    fn set_face_solid_toggles_config() {
        let mut scene = sample_scene();
        let result = dispatch(&mut scene, Action::SetFaceSolid { assembly_id: "a".into(), face_id: FaceId::Top, solid: false });
        assert!(result.success);
        assert!(!scene.primary.faces.iter().find(|f| f.face_id == FaceId::Top).unwrap().solid);
    }
}
