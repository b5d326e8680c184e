//! 2D outline construction and 3D placement for jointcad panels.
//!
//! A panel's shape is an [`Outline`]: a clockwise outer polygon plus a set of
//! counter-clockwise interior holes, built in panel-local coordinates and
//! placed in assembly space via a [`Plane`]. Polygon utilities (winding,
//! bounding box, arc sampling) live in `polygon`.

mod outline;
mod plane;
mod polygon;

pub use outline::{Outline, OutlineError};
pub use plane::Plane;
pub use polygon::{
    bounding_box, ensure_clockwise, ensure_counter_clockwise, is_clockwise, polygonize_circle,
    sample_arc, signed_area,
};
