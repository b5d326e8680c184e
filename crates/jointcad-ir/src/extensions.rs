use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// Per-edge outward protrusion depths, mm. Zero means no extension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EdgeExtensions {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// One point of a custom edge path: `t` in `[0, 1]` along the edge, and a
/// perpendicular offset in mm (positive is outward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomEdgePathPoint {
    pub t: f64,
    pub offset: f64,
}

/// A caller-supplied replacement for a straight edge segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomEdgePath {
    pub points: Vec<CustomEdgePathPoint>,
    /// If true, `points` are defined over `[0, 0.5]` and reflected across
    /// `t = 0.5` to produce the full edge.
    pub mirrored: bool,
}

/// The shape of an interior hole cut into a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CutoutKind {
    Rect {
        width: f64,
        height: f64,
        corner_radius: Option<f64>,
    },
    Circle {
        radius: f64,
    },
    Polygon {
        points: Vec<Vec2>,
    },
}

/// An interior hole registered against a panel, at `center` in panel-local
/// coordinates, rotated by `rotation` radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cutout {
    pub id: String,
    pub kind: CutoutKind,
    pub center: Vec2,
    pub rotation: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_extensions_default_is_zero() {
        let e = EdgeExtensions::default();
        assert_eq!(e.top, 0.0);
        assert_eq!(e.right, 0.0);
    }

    #[test]
    fn cutout_kind_tag_roundtrips() {
        let c = CutoutKind::Circle { radius: 5.0 };
        let json = serde_json::to_string(&c).unwrap();
        let back: CutoutKind = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
