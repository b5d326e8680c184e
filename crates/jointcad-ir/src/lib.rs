//! Wire-format types for jointcad.
//!
//! Everything here is a plain `serde` struct or enum with no dependency on
//! `nalgebra` — these are the types that cross the engine's API boundary:
//! the action stream in, the snapshot tree and persisted `Document` out.
//! Internal computation uses `jointcad-math`'s nalgebra-backed types instead;
//! the engine converts at the edges.

mod action;
mod config;
mod extensions;
mod geometry;
mod snapshot;

pub use action::{Action, ActionResult, GridAxisSpec};
pub use config::{
    AssemblyConfig, FaceConfig, FeetConfig, LidConfig, MaterialConfig, Sign, SplitMode,
    TabDirection,
};
pub use extensions::{CustomEdgePath, CustomEdgePathPoint, Cutout, CutoutKind, EdgeExtensions};
pub use geometry::{Axis, Bounds3D, EdgePosition, FaceId, JointGender, Vec2, Vec3};
pub use snapshot::{
    divider_panel_key, face_panel_key, AssemblySnapshot, CornerEligibility, Document,
    EdgeSnapshot, EdgeStatus, JointAlignmentErrorSnapshot, JointErrorEntry, OutlineSnapshot,
    PanelKind, PanelSnapshot, SceneConfig, SplitConfig, SplitInfo, SubAssemblyConfig,
    SubAssemblySnapshot, TransformSnapshot, VoidConfig, VoidSnapshot,
};
