use serde::{Deserialize, Serialize};

use crate::config::{FeetConfig, Sign, SplitMode, TabDirection};
use crate::extensions::{CustomEdgePath, Cutout};
use crate::geometry::{Axis, EdgePosition, FaceId};

/// One axis of a grid subdivision: where along `axis` to cut, and how those
/// positions are interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridAxisSpec {
    pub axis: Axis,
    pub positions: Vec<f64>,
    pub mode: SplitMode,
}

/// The fixed, finite set of mutations the engine accepts. Every observable
/// change to a scene goes through one of these variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    SetDimensions {
        assembly_id: String,
        width: f64,
        height: f64,
        depth: f64,
    },
    SetMaterial {
        assembly_id: String,
        thickness: f64,
        finger_width: f64,
        finger_gap: f64,
    },
    SetFaceSolid {
        assembly_id: String,
        face_id: FaceId,
        solid: bool,
    },
    SetAssemblyAxis {
        assembly_id: String,
        axis: Axis,
    },
    SetLidConfig {
        assembly_id: String,
        side: Sign,
        tab_direction: TabDirection,
        inset: f64,
    },
    SetFeet {
        assembly_id: String,
        feet: FeetConfig,
    },
    SetEdgeExtension {
        panel_id: String,
        edge: EdgePosition,
        value: f64,
    },
    SetCornerFillet {
        panel_id: String,
        corner: EdgePosition,
        adjacent: EdgePosition,
        radius: f64,
    },
    SetCustomEdgePath {
        panel_id: String,
        edge: EdgePosition,
        path: Option<CustomEdgePath>,
    },
    SetCutout {
        panel_id: String,
        cutout: Cutout,
    },
    DeleteCutout {
        panel_id: String,
        cutout_id: String,
    },
    SubdivideVoid {
        void_id: String,
        axis: Axis,
        position: f64,
        mode: SplitMode,
    },
    GridSubdivideVoid {
        void_id: String,
        specs: Vec<GridAxisSpec>,
    },
    ClearSubdivision {
        void_id: String,
    },
    CreateSubAssembly {
        void_id: String,
        clearance: f64,
    },
    RemoveSubAssembly {
        void_id: String,
    },
    SetSubAssemblyClearance {
        void_id: String,
        clearance: f64,
    },
    MoveDivider {
        void_id: String,
        position: f64,
    },
}

/// The outcome of dispatching one `Action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub reason: Option<String>,
}

impl ActionResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            reason: None,
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            reason: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_tag_roundtrips() {
        let a = Action::SetDimensions {
            assembly_id: "a1".into(),
            width: 100.0,
            height: 80.0,
            depth: 60.0,
        };
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"type\":\"setDimensions\""));
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }

    #[test]
    fn action_result_fail_carries_reason() {
        let r = ActionResult::fail("no such node");
        assert!(!r.success);
        assert_eq!(r.reason.as_deref(), Some("no such node"));
    }
}
