use jointcad_ir::{AssemblyConfig, Bounds3D, MaterialConfig};
use jointcad_math::{Transform, Vec3};

use crate::assembly::Assembly;

/// A nested assembly hosted inside a leaf void, offset inward from the
/// void's walls by `clearance` on every side and placed by translation only
/// (no rotation) at the void's center.
#[derive(Debug, Clone)]
pub struct SubAssembly {
    pub clearance: f64,
    pub assembly: Box<Assembly>,
}

impl SubAssembly {
    /// Build a sub-assembly sized to fit inside `void_bounds` with
    /// `clearance` of free space on every side.
    pub fn new(clearance: f64, void_bounds: Bounds3D, material: MaterialConfig, assembly_config: AssemblyConfig) -> Self {
        let w = (void_bounds.w - 2.0 * clearance).max(0.0);
        let h = (void_bounds.h - 2.0 * clearance).max(0.0);
        let d = (void_bounds.d - 2.0 * clearance).max(0.0);
        Self {
            clearance,
            assembly: Box::new(Assembly::new(w, h, d, material, assembly_config)),
        }
    }

    pub fn placement(&self, void_center: Vec3) -> Transform {
        Transform::translation(void_center)
    }
}
