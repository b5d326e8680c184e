use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, FaceId};

/// Material and finger-joint parameters, shared by every panel in an assembly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialConfig {
    /// Sheet thickness, mm.
    pub thickness: f64,
    /// Nominal finger width, mm.
    pub finger_width: f64,
    /// Gap at corners, expressed as a multiplier of `finger_width`.
    pub finger_gap: f64,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            thickness: 3.0,
            finger_width: 10.0,
            finger_gap: 1.5,
        }
    }
}

/// Which way a lid's fingers point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabDirection {
    TabsOut,
    TabsIn,
}

/// Per-lid-face tab configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LidConfig {
    pub tab_direction: TabDirection,
    /// Inset of the lid panel from the outer dimension, mm.
    pub inset: f64,
}

impl Default for LidConfig {
    fn default() -> Self {
        Self {
            tab_direction: TabDirection::TabsOut,
            inset: 0.0,
        }
    }
}

/// The axis an assembly opens along, plus the lid configuration on each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssemblyConfig {
    pub assembly_axis: Axis,
    pub lid_positive: LidConfig,
    pub lid_negative: LidConfig,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            assembly_axis: Axis::Y,
            lid_positive: LidConfig::default(),
            lid_negative: LidConfig::default(),
        }
    }
}

impl AssemblyConfig {
    /// The two `FaceId`s that play the "lid" role for this assembly axis.
    pub fn lid_faces(&self) -> (FaceId, FaceId) {
        match self.assembly_axis {
            Axis::X => (FaceId::Right, FaceId::Left),
            Axis::Y => (FaceId::Top, FaceId::Bottom),
            Axis::Z => (FaceId::Front, FaceId::Back),
        }
    }

    /// True if `face` plays the lid role under this assembly's axis.
    pub fn is_lid(&self, face: FaceId) -> bool {
        let (pos, neg) = self.lid_faces();
        face == pos || face == neg
    }

    /// The `LidConfig` for `face`, if it is a lid.
    pub fn lid_config_for(&self, face: FaceId) -> Option<&LidConfig> {
        let (pos, neg) = self.lid_faces();
        if face == pos {
            Some(&self.lid_positive)
        } else if face == neg {
            Some(&self.lid_negative)
        } else {
            None
        }
    }
}

/// Whether a face is cut (solid) or left open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceConfig {
    pub face_id: FaceId,
    pub solid: bool,
}

/// Optional feet profile cut into downward-facing wall panels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeetConfig {
    pub enabled: bool,
    pub height: f64,
    pub width: f64,
    pub inset: f64,
    pub gap: f64,
}

impl Default for FeetConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            height: 10.0,
            width: 20.0,
            inset: 10.0,
            gap: 10.0,
        }
    }
}

/// How a split position is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    Absolute,
    Percentage,
}

/// Which side of the assembly-axis a lid belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Positive,
    Negative,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lid_faces_for_each_axis() {
        let cfg = AssemblyConfig {
            assembly_axis: Axis::X,
            ..Default::default()
        };
        assert!(cfg.is_lid(FaceId::Left));
        assert!(cfg.is_lid(FaceId::Right));
        assert!(!cfg.is_lid(FaceId::Top));
    }

    #[test]
    fn default_material_is_nonzero() {
        let m = MaterialConfig::default();
        assert!(m.thickness > 0.0);
        assert!(m.finger_width > 0.0);
    }
}
