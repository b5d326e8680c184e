//! A scene holds the primary assembly plus an optional preview clone used
//! for speculative edits: actions apply to the preview, and the caller
//! commits (replacing primary) or discards (dropping the clone) once it has
//! rendered the result.

use crate::assembly::Assembly;
use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone)]
pub struct Scene {
    pub primary: Assembly,
    pub preview: Option<Assembly>,
}

impl Scene {
    pub fn new(primary: Assembly) -> Self {
        Self { primary, preview: None }
    }

    /// Begin a preview: a deep clone of the primary assembly, IDs preserved,
    /// that subsequent actions mutate instead of the primary.
    pub fn start_preview(&mut self) {
        self.preview = Some(self.primary.clone());
    }

    /// Adopt the preview's state as the new primary.
    pub fn commit_preview(&mut self) -> EngineResult<()> {
        let preview = self.preview.take().ok_or_else(|| EngineError::InvariantViolation("no preview in progress".into()))?;
        self.primary = preview;
        Ok(())
    }

    /// Drop the preview, leaving the primary untouched.
    pub fn discard_preview(&mut self) {
        self.preview = None;
    }

    /// The assembly that actions should currently target: the preview if one
    /// is in progress, otherwise the primary.
    pub fn active_mut(&mut self) -> &mut Assembly {
        self.preview.as_mut().unwrap_or(&mut self.primary)
    }

    pub fn active(&self) -> &Assembly {
        self.preview.as_ref().unwrap_or(&self.primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jointcad_ir::{AssemblyConfig, MaterialConfig};

    fn sample() -> Assembly {
        Assembly::new(100.0, 80.0, 60.0, MaterialConfig::default(), AssemblyConfig::default())
    }

    #[test]
    fn discard_preview_leaves_primary_unchanged() {
        let mut scene = Scene::new(sample());
        let before = scene.primary.width;
        scene.start_preview();
        scene.active_mut().width = 999.0;
        scene.discard_preview();
        assert_eq!(scene.primary.width, before);
    }

    #[test]
    fn commit_preview_replaces_primary() {
        let mut scene = Scene::new(sample());
        scene.start_preview();
        scene.active_mut().width = 150.0;
        scene.commit_preview().unwrap();
        assert_eq!(scene.primary.width, 150.0);
    }

    #[test]
    fn commit_without_preview_errors() {
        let mut scene = Scene::new(sample());
        assert!(scene.commit_preview().is_err());
    }
}
