#![warn(missing_docs)]

//! Math types for the jointcad panel derivation engine.
//!
//! Thin wrappers around nalgebra providing domain-specific types for the 2D/3D
//! geometry of laser-cut panels: points, vectors, axis-aligned directions,
//! rigid transforms, and tolerance constants. Wire-format types stay plain
//! structs (see `jointcad-ir`) so they serialize without a math dependency;
//! these nalgebra-backed compute types are used internally by
//! `jointcad-engine` and `jointcad-sketch` only.

use nalgebra::{Matrix3, Rotation3, Unit, Vector2, Vector3};

/// A point in 3D space (millimetres).
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space (millimetres).
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in 2D panel-local space (millimetres).
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D panel-local space.
pub type Vec2 = Vector2<f64>;

/// The three world axes along which an assembly's dimensions run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The width axis.
    X,
    /// The height axis.
    Y,
    /// The depth axis.
    Z,
}

impl Axis {
    /// The two axes other than this one, in a fixed (X,Y,Z) relative order.
    pub fn others(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    /// The world-space unit vector along this axis.
    pub fn unit_vec3(self) -> Vec3 {
        match self {
            Axis::X => Vec3::x(),
            Axis::Y => Vec3::y(),
            Axis::Z => Vec3::z(),
        }
    }
}

/// A rigid transform: translation plus rotation. No scale — panels are never
/// scaled, only placed and oriented onto one of the six face planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space translation of the local origin.
    pub translation: Vec3,
    /// World-space rotation of the local frame.
    pub rotation: Rotation3<f64>,
}

impl Transform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Rotation3::identity(),
        }
    }

    /// A pure translation by `offset`.
    pub fn translation(offset: Vec3) -> Self {
        Self {
            translation: offset,
            rotation: Rotation3::identity(),
        }
    }

    /// Build a transform whose local X/Y/Z basis vectors map to the given
    /// world-space directions, placed at `origin`. `x_dir` and `y_dir` must be
    /// orthogonal unit vectors; `z_dir` is their cross product (the panel's
    /// outward normal).
    pub fn from_basis(origin: Vec3, x_dir: Dir3, y_dir: Dir3, z_dir: Dir3) -> Self {
        let m = Matrix3::from_columns(&[
            x_dir.into_inner(),
            y_dir.into_inner(),
            z_dir.into_inner(),
        ]);
        Self {
            translation: origin,
            rotation: Rotation3::from_matrix_unchecked(m),
        }
    }

    /// Compose `self` after `other`: applying the result to a point first
    /// applies `other`, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            translation: self.translation + self.rotation * other.translation,
            rotation: self.rotation * other.rotation,
        }
    }

    /// Transform a point from local to world space.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.rotation * p + self.translation
    }

    /// The rotation expressed as intrinsic XYZ Euler angles, in radians —
    /// the format the snapshot tree serializes rotations in.
    pub fn euler_xyz(&self) -> Vec3 {
        let (rx, ry, rz) = self.rotation.euler_angles();
        Vec3::new(rx, ry, rz)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in mm.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// The joint-alignment tolerance: anchors must coincide within 0.01 mm.
    pub const DEFAULT: Self = Self {
        linear: 0.01,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_is_noop() {
        let t = Transform::identity();
        let p = Point3::new(1.0, 2.0, 3.0);
        assert!((t.apply_point(&p) - p).norm() < 1e-12);
    }

    #[test]
    fn translation_offsets_points() {
        let t = Transform::translation(Vec3::new(10.0, 20.0, 30.0));
        let p = Point3::new(1.0, 2.0, 3.0);
        let r = t.apply_point(&p);
        assert!((r.x - 11.0).abs() < 1e-12);
        assert!((r.y - 22.0).abs() < 1e-12);
        assert!((r.z - 33.0).abs() < 1e-12);
    }

    #[test]
    fn from_basis_maps_local_axes() {
        // Local +X -> world +Z, local +Y -> world +Y, normal -> world -X
        // (this is the Left face orientation used by the engine).
        let x_dir = Dir3::new_normalize(Vec3::z());
        let y_dir = Dir3::new_normalize(Vec3::y());
        let z_dir = Dir3::new_normalize(-Vec3::x());
        let t = Transform::from_basis(Vec3::new(5.0, 0.0, 0.0), x_dir, y_dir, z_dir);

        let local_x = Point3::new(1.0, 0.0, 0.0);
        let world = t.apply_point(&local_x);
        assert!((world - Point3::new(5.0, 0.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0 + 1e-4, 2.0, 3.0);
        assert!(tol.points_equal(&a, &b));
        let c = Point3::new(1.02, 2.0, 3.0);
        assert!(!tol.points_equal(&a, &c));
    }

    #[test]
    fn axis_others_excludes_self() {
        let (a, b) = Axis::X.others();
        assert!(matches!(a, Axis::Y));
        assert!(matches!(b, Axis::Z));
    }
}
