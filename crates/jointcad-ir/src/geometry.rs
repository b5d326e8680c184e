use serde::{Deserialize, Serialize};

/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One of the four edges of a 2D panel outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl EdgePosition {
    /// The four edges in the clockwise order outline construction walks them.
    pub const CLOCKWISE: [EdgePosition; 4] = [
        EdgePosition::Top,
        EdgePosition::Right,
        EdgePosition::Bottom,
        EdgePosition::Left,
    ];
}

/// One of the six faces of an assembly's outer box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceId {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl FaceId {
    /// All six faces, in a fixed iteration order.
    pub const ALL: [FaceId; 6] = [
        FaceId::Front,
        FaceId::Back,
        FaceId::Left,
        FaceId::Right,
        FaceId::Top,
        FaceId::Bottom,
    ];

    /// The world axis this face's outward normal points along.
    pub fn normal_axis(self) -> Axis {
        match self {
            FaceId::Front | FaceId::Back => Axis::Z,
            FaceId::Left | FaceId::Right => Axis::X,
            FaceId::Top | FaceId::Bottom => Axis::Y,
        }
    }

    /// Wall-priority used to break gender ties between two wall faces
    /// (lower priority wins male). Lids never consult this.
    pub fn wall_priority(self) -> u8 {
        match self {
            FaceId::Front => 0,
            FaceId::Back => 1,
            FaceId::Left => 2,
            FaceId::Right => 3,
            FaceId::Top => 4,
            FaceId::Bottom => 5,
        }
    }
}

/// The gender of a finger-jointed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointGender {
    Male,
    Female,
    None,
}

/// A 2D point or vector, panel-local unless otherwise noted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A 3D point or vector in world or assembly-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// An axis-aligned 3D extent, origin at one corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
    pub h: f64,
    pub d: f64,
}

impl Bounds3D {
    pub fn new(x: f64, y: f64, z: f64, w: f64, h: f64, d: f64) -> Self {
        debug_assert!(w >= 0.0 && h >= 0.0 && d >= 0.0, "bounds extent must be non-negative");
        Self { x, y, z, w, h, d }
    }

    /// The extent along a given axis.
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.w,
            Axis::Y => self.h,
            Axis::Z => self.d,
        }
    }

    /// The low-side origin coordinate along a given axis.
    pub fn origin(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// The center point of these bounds.
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.x + self.w / 2.0, self.y + self.h / 2.0, self.z + self.d / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_extent_by_axis() {
        let b = Bounds3D::new(0.0, 0.0, 0.0, 10.0, 20.0, 30.0);
        assert_eq!(b.extent(Axis::X), 10.0);
        assert_eq!(b.extent(Axis::Y), 20.0);
        assert_eq!(b.extent(Axis::Z), 30.0);
    }

    #[test]
    fn face_normal_axis_matches_pairs() {
        assert_eq!(FaceId::Front.normal_axis(), FaceId::Back.normal_axis());
        assert_eq!(FaceId::Left.normal_axis(), FaceId::Right.normal_axis());
        assert_eq!(FaceId::Top.normal_axis(), FaceId::Bottom.normal_axis());
    }

    #[test]
    fn axis_serializes_lowercase() {
        let s = serde_json::to_string(&Axis::X).unwrap();
        assert_eq!(s, "\"x\"");
    }
}
