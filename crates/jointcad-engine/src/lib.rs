//! The derivation engine: turns an assembly's node tree (dimensions,
//! material, face configuration, void/divider/sub-assembly structure) into
//! concrete panel geometry, and dispatches the action stream that mutates
//! that tree.

pub mod assembly;
pub mod dispatch;
mod error;
mod fingers;
mod gender;
mod ids;
pub mod joints;
pub mod outline_ops;
pub mod panel;
pub mod scene;
pub mod subassembly;
pub mod void;

pub use error::{EngineError, EngineResult};
pub use fingers::{compute_finger_data, FingerData};
pub use panel::{EdgeState, Panel, PanelKind};
