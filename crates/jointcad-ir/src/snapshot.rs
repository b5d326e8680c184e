use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{AssemblyConfig, FaceConfig, FeetConfig, MaterialConfig, SplitMode};
use crate::extensions::{CustomEdgePath, Cutout, EdgeExtensions};
use crate::geometry::{Axis, EdgePosition, FaceId, JointGender, Vec2, Vec3};

/// Split configuration recorded on a subdivided void.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitInfo {
    pub axis: Axis,
    pub position: f64,
    /// Position expressed as a fraction of the parent void's span on `axis`,
    /// used to rescale proportionally when the parent's bounds change.
    pub percentage: f64,
}

/// Which discriminator identifies a derived panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PanelKind {
    Face { face_id: FaceId },
    Divider { void_id: String, axis: Axis, position: f64 },
}

/// One edge's derived joint state, published in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub position: EdgePosition,
    pub gender: JointGender,
    pub has_tabs: bool,
    pub world_axis: Option<Axis>,
    pub meets_face_id: Option<FaceId>,
    pub meets_divider_id: Option<String>,
    pub status: EdgeStatus,
    /// World-space joint anchor, present only for edges that mate with
    /// another panel.
    pub anchor: Option<Vec3>,
}

/// Whether an edge's geometry may still be edited by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStatus {
    /// Carries a finger joint with a mating panel; shape is fixed.
    Locked,
    /// Open edge; may only be extended outward, never fillet-eligible from
    /// the interior side of a solid edge.
    OutwardOnly,
    /// No mating panel and no fingers; free to extend or fillet.
    Unlocked,
}

/// Fillet eligibility published alongside a corner for the UI to consult.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerEligibility {
    pub corner: EdgePosition,
    pub adjacent: EdgePosition,
    pub eligible: bool,
    pub max_radius: f64,
}

/// A panel's derived 2D outline: outer polygon plus interior holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineSnapshot {
    pub polygon: Vec<Vec2>,
    pub holes: Vec<Vec<Vec2>>,
}

/// A panel's derived placement in assembly-local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformSnapshot {
    pub position: Vec3,
    /// Intrinsic XYZ Euler angles, radians.
    pub rotation_euler: Vec3,
}

/// One derived panel (face or divider), as it appears in the snapshot. Panels
/// are never independently addressable scene nodes; their identity is this
/// cached `id` under the owning assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub id: String,
    pub kind: PanelKind,
    pub width: f64,
    pub height: f64,
    pub transform: TransformSnapshot,
    pub outline: OutlineSnapshot,
    pub edges: Vec<EdgeSnapshot>,
    pub corner_eligibility: Vec<CornerEligibility>,
}

/// A detected mismatch between two panels' joint anchors — an engineering
/// bug in derivation, not a user-facing condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointAlignmentErrorSnapshot {
    pub deviation: Vec3,
    pub magnitude: f64,
}

/// Keyed by the sorted (panel id, edge) pair on each side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointErrorEntry {
    pub panel_a_id: String,
    pub edge_a: EdgePosition,
    pub panel_b_id: String,
    pub edge_b: EdgePosition,
    pub error: JointAlignmentErrorSnapshot,
}

/// A void, recursively, as it appears in the snapshot tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoidSnapshot {
    pub id: String,
    pub bounds: crate::geometry::Bounds3D,
    pub split: Option<SplitInfo>,
    pub children: Vec<VoidSnapshot>,
    pub sub_assembly: Option<Box<SubAssemblySnapshot>>,
}

/// A sub-assembly, nested at the void it occupies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubAssemblySnapshot {
    pub clearance: f64,
    pub assembly: Box<AssemblySnapshot>,
}

/// The full derived state of one assembly (root or nested), mirroring the
/// node tree plus its derived caches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblySnapshot {
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub material: MaterialConfig,
    pub assembly_config: AssemblyConfig,
    pub faces: Vec<FaceConfig>,
    pub feet: FeetConfig,
    pub void: VoidSnapshot,
    pub panels: Vec<PanelSnapshot>,
    pub joint_errors: Vec<JointErrorEntry>,
}

/// The persisted (share-link) configuration for one assembly: inputs only,
/// no derived state. Recursive through sub-assemblies via `VoidConfig`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub material: MaterialConfig,
    pub assembly_config: AssemblyConfig,
    pub faces: Vec<FaceConfig>,
    pub feet: FeetConfig,
}

/// Persisted split configuration for a void.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    pub axis: Axis,
    pub position: f64,
    pub mode: SplitMode,
}

/// Persisted void tree node: bounds plus split/sub-assembly configuration,
/// no derived caches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoidConfig {
    pub bounds: crate::geometry::Bounds3D,
    pub split: Option<SplitConfig>,
    pub children: Vec<VoidConfig>,
    pub sub_assembly: Option<Box<SubAssemblyConfig>>,
}

/// A persisted sub-assembly: its clearance plus its own full `Document`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubAssemblyConfig {
    pub clearance: f64,
    pub document: Document,
}

/// Canonical panel key, stable across reclones:
/// `face:<faceId>` or `divider:<voidId>:<axis>:<position>`.
pub fn face_panel_key(face: FaceId) -> String {
    format!("face:{}", face_tag(face))
}

/// Canonical divider panel key.
pub fn divider_panel_key(void_id: &str, axis: Axis, position: f64) -> String {
    format!("divider:{void_id}:{}:{position}", axis_tag(axis))
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

fn axis_tag(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "x",
        Axis::Y => "y",
        Axis::Z => "z",
    }
}

/// The full persisted state of a scene: configuration, void tree, and the
/// panel-keyed edit maps (edge extensions, corner fillets, custom edge
/// paths, cutouts), all keyed by the canonical panel key rather than
/// transient node IDs so links remain valid across reclones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Document {
    pub config: Option<SceneConfig>,
    pub void_tree: Option<VoidConfig>,
    pub edge_extensions: BTreeMap<String, EdgeExtensions>,
    pub corner_fillets: BTreeMap<String, BTreeMap<String, f64>>,
    pub custom_edge_paths: BTreeMap<String, BTreeMap<String, CustomEdgePath>>,
    pub cutouts: BTreeMap<String, Vec<Cutout>>,
}

impl Document {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_panel_key_format() {
        assert_eq!(face_panel_key(FaceId::Top), "face:top");
    }

    #[test]
    fn divider_panel_key_format() {
        assert_eq!(divider_panel_key("v1", Axis::X, 50.0), "divider:v1:x:50");
    }

    #[test]
    fn document_json_roundtrip() {
        let mut doc = Document::default();
        doc.edge_extensions.insert(
            face_panel_key(FaceId::Front),
            EdgeExtensions {
                top: 20.0,
                ..Default::default()
            },
        );
        let json = doc.to_json().unwrap();
        let back = Document::from_json(&json).unwrap();
        assert_eq!(doc, back);
    }
}
