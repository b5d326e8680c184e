use jointcad_ir::{Axis, AssemblyConfig, EdgePosition, FaceId, JointGender, TabDirection};

/// A face's local basis expressed as (axis, sign) pairs. Signs mirror some
/// faces' in-plane axes relative to others so that, walked clockwise as
/// seen from outside the box, every face's outline winds the same way.
#[derive(Debug, Clone, Copy)]
struct FaceBasis {
    x_dir: (Axis, i8),
    y_dir: (Axis, i8),
}

fn face_basis(face: FaceId) -> FaceBasis {
    use Axis::*;
    match face {
        FaceId::Front => FaceBasis { x_dir: (X, 1), y_dir: (Y, 1) },
        FaceId::Back => FaceBasis { x_dir: (X, -1), y_dir: (Y, 1) },
        FaceId::Left => FaceBasis { x_dir: (Z, 1), y_dir: (Y, 1) },
        FaceId::Right => FaceBasis { x_dir: (Z, -1), y_dir: (Y, 1) },
        FaceId::Top => FaceBasis { x_dir: (X, 1), y_dir: (Z, 1) },
        FaceId::Bottom => FaceBasis { x_dir: (X, 1), y_dir: (Z, -1) },
    }
}

fn face_for_outward_normal(axis: Axis, sign: i8) -> FaceId {
    match (axis, sign.signum()) {
        (Axis::X, 1) => FaceId::Right,
        (Axis::X, -1) => FaceId::Left,
        (Axis::Y, 1) => FaceId::Top,
        (Axis::Y, -1) => FaceId::Bottom,
        (Axis::Z, 1) => FaceId::Back,
        (Axis::Z, -1) => FaceId::Front,
        _ => unreachable!("sign is always +-1"),
    }
}

/// The face adjacent to `face` across `edge`, per the cube's topology.
pub fn mating_face(face: FaceId, edge: EdgePosition) -> FaceId {
    let basis = face_basis(face);
    let (axis, sign) = match edge {
        EdgePosition::Right => basis.x_dir,
        EdgePosition::Left => (basis.x_dir.0, -basis.x_dir.1),
        EdgePosition::Top => basis.y_dir,
        EdgePosition::Bottom => (basis.y_dir.0, -basis.y_dir.1),
    };
    face_for_outward_normal(axis, sign)
}

/// The world axis that `edge` of `face`'s outline runs along (the axis its
/// finger sequence is shared on) — the axis *perpendicular* to the edge's
/// outward direction.
pub fn edge_world_axis(face: FaceId, edge: EdgePosition) -> Axis {
    let basis = face_basis(face);
    match edge {
        EdgePosition::Top | EdgePosition::Bottom => basis.x_dir.0,
        EdgePosition::Left | EdgePosition::Right => basis.y_dir.0,
    }
}

/// The face basis exposed for panel placement: (x_dir, y_dir, normal), each
/// an (axis, sign) pair.
pub(crate) fn face_plane_basis(face: FaceId) -> ((Axis, i8), (Axis, i8), (Axis, i8)) {
    let b = face_basis(face);
    let normal = match face {
        FaceId::Front => (Axis::Z, -1),
        FaceId::Back => (Axis::Z, 1),
        FaceId::Left => (Axis::X, -1),
        FaceId::Right => (Axis::X, 1),
        FaceId::Top => (Axis::Y, 1),
        FaceId::Bottom => (Axis::Y, -1),
    };
    (b.x_dir, b.y_dir, normal)
}

/// Determine the gender of `edge` on `face`, given which faces are solid and
/// the assembly's lid/wall configuration. Rule order: open adjacency is
/// `none`; a lid/wall pair follows the lid's `tabDirection`; two walls break
/// the tie by wall priority.
pub fn face_edge_gender(
    face: FaceId,
    edge: EdgePosition,
    is_solid: impl Fn(FaceId) -> bool,
    assembly_config: &AssemblyConfig,
) -> JointGender {
    let mate = mating_face(face, edge);
    if !is_solid(mate) {
        return JointGender::None;
    }

    let self_is_lid = assembly_config.is_lid(face);
    let mate_is_lid = assembly_config.is_lid(mate);

    match (self_is_lid, mate_is_lid) {
        (true, false) => {
            let cfg = assembly_config
                .lid_config_for(face)
                .expect("face already known to be a lid");
            match cfg.tab_direction {
                TabDirection::TabsOut => JointGender::Male,
                TabDirection::TabsIn => JointGender::Female,
            }
        }
        (false, true) => {
            let cfg = assembly_config
                .lid_config_for(mate)
                .expect("mate already known to be a lid");
            match cfg.tab_direction {
                TabDirection::TabsOut => JointGender::Female,
                TabDirection::TabsIn => JointGender::Male,
            }
        }
        (false, false) => {
            if face.wall_priority() < mate.wall_priority() {
                JointGender::Male
            } else {
                JointGender::Female
            }
        }
        (true, true) => unreachable!("the two lid faces of an assembly axis are opposite faces and never adjacent"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complement(g: JointGender) -> JointGender {
        match g {
            JointGender::Male => JointGender::Female,
            JointGender::Female => JointGender::Male,
            JointGender::None => JointGender::None,
        }
    }

    #[test]
    fn adjacency_is_symmetric_and_never_opposite_faces() {
        for face in FaceId::ALL {
            for edge in EdgePosition::CLOCKWISE {
                let mate = mating_face(face, edge);
                assert_ne!(mate, face);
                let opposite = match face {
                    FaceId::Front => FaceId::Back,
                    FaceId::Back => FaceId::Front,
                    FaceId::Left => FaceId::Right,
                    FaceId::Right => FaceId::Left,
                    FaceId::Top => FaceId::Bottom,
                    FaceId::Bottom => FaceId::Top,
                };
                assert_ne!(mate, opposite, "{face:?}.{edge:?} adjacent to its own opposite face");
            }
        }
    }

    #[test]
    fn gender_is_complementary_from_either_perspective() {
        let cfg = AssemblyConfig {
            assembly_axis: Axis::Y,
            ..Default::default()
        };
        for face in FaceId::ALL {
            for edge in EdgePosition::CLOCKWISE {
                let mate = mating_face(face, edge);
                let g1 = face_edge_gender(face, edge, |_| true, &cfg);
                // find the edge on `mate` whose mating face is `face`
                let edge2 = EdgePosition::CLOCKWISE
                    .into_iter()
                    .find(|e| mating_face(mate, *e) == face)
                    .unwrap();
                let g2 = face_edge_gender(mate, edge2, |_| true, &cfg);
                assert_eq!(g1, complement(g2), "{face:?}.{edge:?} vs {mate:?}.{edge2:?}");
            }
        }
    }

    #[test]
    fn open_mate_yields_none() {
        let cfg = AssemblyConfig::default();
        let g = face_edge_gender(FaceId::Front, EdgePosition::Top, |f| f != FaceId::Top, &cfg);
        assert_eq!(g, JointGender::None);
    }
}
