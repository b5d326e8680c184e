pub(crate) mod divider;
pub(crate) mod face;

pub use divider::derive_divider_panel;
pub use face::derive_face_panel;

use jointcad_ir::{Axis, EdgePosition, EdgeStatus, FaceId, JointGender};
use jointcad_math::Point2;
use jointcad_sketch::{Outline, Plane};

/// Which kind of source this derived panel comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelKind {
    Face { face_id: FaceId },
    Divider { void_id: String, axis: Axis, position: f64 },
}

/// One edge's derived joint state.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeState {
    pub position: EdgePosition,
    pub gender: JointGender,
    pub has_tabs: bool,
    pub world_axis: Option<Axis>,
    pub meets_face_id: Option<FaceId>,
    pub meets_divider_id: Option<String>,
    pub status: EdgeStatus,
    /// Midpoint of the edge, panel-local, offset inward by half material
    /// thickness so it sits on the joint mid-plane. `None` for edges with
    /// no mating panel.
    pub anchor_local: Option<Point2>,
}

/// Fillet eligibility for one corner, named by its two adjacent edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerEligibility {
    pub corner: EdgePosition,
    pub adjacent: EdgePosition,
    pub eligible: bool,
    pub max_radius: f64,
}

/// A derived panel: computed on demand from its owning assembly/void, never
/// stored in the node tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub id: String,
    pub kind: PanelKind,
    pub width: f64,
    pub height: f64,
    pub plane: Plane,
    pub outline: Outline,
    pub edges: Vec<EdgeState>,
    pub corner_eligibility: Vec<CornerEligibility>,
}

impl Panel {
    pub fn canonical_key(&self) -> String {
        match &self.kind {
            PanelKind::Face { face_id } => jointcad_ir::face_panel_key(*face_id),
            PanelKind::Divider { void_id, axis, position } => {
                jointcad_ir::divider_panel_key(void_id, *axis, *position)
            }
        }
    }

    pub fn edge(&self, position: EdgePosition) -> &EdgeState {
        self.edges
            .iter()
            .find(|e| e.position == position)
            .expect("every panel carries all four edges")
    }
}

/// The "outward sign" convention used when laying out a rectangle centered
/// at the origin: top/right grow in the positive direction, bottom/left in
/// the negative.
pub(crate) fn outward_sign(edge: EdgePosition) -> f64 {
    match edge {
        EdgePosition::Top | EdgePosition::Right => 1.0,
        EdgePosition::Bottom | EdgePosition::Left => -1.0,
    }
}

pub(crate) fn adjacent_edges(corner: EdgePosition) -> EdgePosition {
    // Returns the edge clockwise-following `corner`, its partner at that corner.
    match corner {
        EdgePosition::Top => EdgePosition::Right,
        EdgePosition::Right => EdgePosition::Bottom,
        EdgePosition::Bottom => EdgePosition::Left,
        EdgePosition::Left => EdgePosition::Top,
    }
}

#[derive(Clone, Copy, PartialEq)]
enum TabState {
    Gap,
    Tab,
}

impl TabState {
    fn toggled(self) -> Self {
        match self {
            TabState::Gap => TabState::Tab,
            TabState::Tab => TabState::Gap,
        }
    }
}

/// Build the point sequence for one finger-jointed edge, running from
/// `start_running` to `end_running` along the shared axis, with the
/// perpendicular coordinate alternating between `gap_coord` (base rectangle
/// level) and `tab_coord` (the other side of the joint) at the finger
/// calculator's transition points. `running_is_x` selects whether the
/// running coordinate maps to the point's x or y field. Transition points
/// whose tab region overlaps a `blocked` interval (cross-lap notch) are
/// skipped, leaving that region at `gap_coord`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn finger_edge_points(
    fd: &crate::fingers::FingerData,
    dim_axis: f64,
    start_running: f64,
    end_running: f64,
    running_is_x: bool,
    perp_gap: f64,
    perp_tab: f64,
    blocked: &[(f64, f64)],
) -> Vec<Point2> {
    let mut locals: Vec<f64> = fd.points.iter().map(|t| t - dim_axis / 2.0).collect();
    let ascending = start_running < end_running;
    if !ascending {
        locals.reverse();
    }

    let is_region_blocked = |a: f64, b: f64| {
        let (lo, hi) = (a.min(b), a.max(b));
        blocked.iter().any(|&(bl, bh)| lo < bh && hi > bl)
    };

    let make_point = |running: f64, perp: f64| {
        if running_is_x {
            Point2::new(running, perp)
        } else {
            Point2::new(perp, running)
        }
    };

    let coord = |s: TabState| if s == TabState::Tab { perp_tab } else { perp_gap };

    let mut out = vec![make_point(start_running, perp_gap)];
    let mut state = TabState::Gap;
    // Transition point index into the (possibly reversed) absolute-t sequence,
    // used only to test the originating region against `blocked`.
    let abs_points: Vec<f64> = if ascending {
        fd.points.clone()
    } else {
        fd.points.iter().rev().copied().collect()
    };

    for (i, &local) in locals.iter().enumerate() {
        let next_state = state.toggled();
        // The region this transition opens runs to the next transition point
        // (or to the far corner for the last one).
        let region_end_abs = abs_points.get(i + 1).copied().unwrap_or(if ascending {
            dim_axis
        } else {
            0.0
        });
        let effective_next = if next_state == TabState::Tab && is_region_blocked(abs_points[i], region_end_abs) {
            state
        } else {
            next_state
        };
        out.push(make_point(local, coord(state)));
        out.push(make_point(local, coord(effective_next)));
        state = effective_next;
    }
    out.push(make_point(end_running, coord(state)));
    out
}
