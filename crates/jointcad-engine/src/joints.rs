use jointcad_ir::{EdgePosition, FaceId};
use jointcad_math::Tolerance;

use crate::panel::{Panel, PanelKind};

/// One mismatch between two panels' joint anchors, found during validation.
/// Indicates a derivation bug, not a user-facing condition — anchors are
/// computed from the same shared finger sequence and should coincide to
/// within `Tolerance::DEFAULT.linear`.
#[derive(Debug, Clone, Copy)]
pub struct JointAlignmentError {
    pub panel_a: usize,
    pub edge_a: EdgePosition,
    pub panel_b: usize,
    pub edge_b: EdgePosition,
    pub deviation: jointcad_math::Vec3,
    pub magnitude: f64,
}

fn face_of(panel: &Panel) -> Option<FaceId> {
    match panel.kind {
        PanelKind::Face { face_id } => Some(face_id),
        PanelKind::Divider { .. } => None,
    }
}

/// Check every face-to-face joint anchor for agreement. Divider joints are
/// not yet cross-checked this way (their `meets_divider_id` bookkeeping is
/// not populated), so this only covers the face/face and face/lid joints
/// that make up the outer box.
pub fn validate_joints(panels: &[Panel]) -> Vec<JointAlignmentError> {
    let tolerance = Tolerance::DEFAULT;
    let mut errors = Vec::new();

    for (i, panel) in panels.iter().enumerate() {
        let Some(face) = face_of(panel) else { continue };
        for edge in panel.edges.iter().filter(|e| e.anchor_local.is_some()) {
            let Some(mate_face) = edge.meets_face_id else { continue };
            let Some((j, mate_panel)) = panels
                .iter()
                .enumerate()
                .find(|(_, p)| face_of(p) == Some(mate_face))
            else {
                continue;
            };
            if i >= j {
                continue; // each pair checked once
            }
            let Some(mate_edge) = mate_panel.edges.iter().find(|e| e.meets_face_id == Some(face)) else {
                continue;
            };
            let (Some(a_local), Some(b_local)) = (edge.anchor_local, mate_edge.anchor_local) else {
                continue;
            };
            let a_world = panel.plane.to_3d(a_local);
            let b_world = mate_panel.plane.to_3d(b_local);
            let deviation = b_world - a_world;
            let magnitude = deviation.norm();
            if !tolerance.is_zero(magnitude) {
                errors.push(JointAlignmentError {
                    panel_a: i,
                    edge_a: edge.position,
                    panel_b: j,
                    edge_b: mate_edge.position,
                    deviation,
                    magnitude,
                });
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use jointcad_ir::{AssemblyConfig, MaterialConfig};

    #[test]
    fn fresh_assembly_has_no_joint_errors() {
        let a = crate::assembly::Assembly::new(100.0, 80.0, 60.0, MaterialConfig::default(), AssemblyConfig::default());
        let errors = validate_joints(a.panels());
        assert!(errors.is_empty(), "{errors:?}");
    }
}
