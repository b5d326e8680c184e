use jointcad_math::{Dir3, Point2, Point3, Transform, Vec3};

/// A 2D panel's placement in 3D space: an origin plus an orthonormal
/// (x_dir, y_dir, normal) basis. Panel-local 2D coordinates are mapped into
/// this plane to produce world-space geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub origin: Vec3,
    pub x_dir: Dir3,
    pub y_dir: Dir3,
    pub normal: Dir3,
}

impl Plane {
    /// Construct a plane from an origin and in-plane X/Y directions; the
    /// normal is their cross product.
    pub fn new(origin: Vec3, x_dir: Dir3, y_dir: Dir3) -> Self {
        let normal = Dir3::new_normalize(x_dir.cross(&y_dir));
        Self {
            origin,
            x_dir,
            y_dir,
            normal,
        }
    }

    /// Map a panel-local 2D point into world space.
    pub fn to_3d(&self, p: Point2) -> Point3 {
        Point3::from(
            self.origin + self.x_dir.into_inner() * p.x + self.y_dir.into_inner() * p.y,
        )
    }

    /// The rigid transform carrying panel-local space onto this plane.
    pub fn transform(&self) -> Transform {
        Transform::from_basis(self.origin, self.x_dir, self.y_dir, self.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_3d_respects_basis() {
        let plane = Plane::new(
            Vec3::new(0.0, 0.0, 30.0),
            Dir3::new_normalize(Vec3::x()),
            Dir3::new_normalize(Vec3::y()),
        );
        let world = plane.to_3d(Point2::new(5.0, 2.0));
        assert!((world - Point3::new(5.0, 2.0, 30.0)).norm() < 1e-9);
    }

    #[test]
    fn normal_is_cross_of_basis() {
        let plane = Plane::new(
            Vec3::zeros(),
            Dir3::new_normalize(Vec3::x()),
            Dir3::new_normalize(Vec3::y()),
        );
        assert!((plane.normal.into_inner() - Vec3::z()).norm() < 1e-9);
    }
}
